//! Fixed message texts posted by the member handlers.

use poise::serenity_prelude::{ChannelId, Mentionable};

pub const SERVER_NAME: &str = "Clash API Developers";

/// Suffixes appended to a departing member's display name in #general.
pub const FAREWELLS: [&str; 6] = [
    " just left the server.  Buh Bye!",
    " just left our Discord. I wonder if we will miss them.",
    " just left. What's up with that?",
    " went bye-bye. Who will fill the void?",
    " has left us. A short moment of silence.",
    " has departed. Hope they learned everything they need!",
];

pub const MEMBER_MISSING: &str = "Member does not exist.";
pub const TIMED_OUT: &str = "Action timed out.";
pub const CANCELLED: &str = "Action cancelled.";
pub const DEVELOPER_ROLE_MISSING: &str = "Developer role not found, nothing was changed.";
pub const ROLE_MENU_PROMPT: &str = "Please select the member's primary language role:";
pub const COPY_PROMPT: &str = "Do you want to copy this message to #general?";

pub fn welcome_message(mention: &str) -> String {
    format!(
        "Welcome to the {SERVER_NAME} server, {mention}! We're glad to have you!\n\
         First, please let us know what your preferred programming language is. \
         Next, if you've already started working with the API, please tell us a little about your \
         project. If you haven't started a project yet, let us know what you're interested in making.\n\
         (Once you introduce yourself, you will be granted roles to access other parts of the server.)"
    )
}

pub fn bot_invited(mention: &str) -> String {
    format!(
        "{mention} has just been invited to the server. \
         Perhaps it is time to set up a demo channel?  Try `//setup {mention} @owner`"
    )
}

pub fn joined_log(tag: &str) -> String {
    format!("{tag} just joined the server.")
}

pub fn manual_welcome_log(tag: &str, invoker: &str) -> String {
    format!(
        "{} (This message generated by the `//welcome` command initiated by {invoker}.)",
        joined_log(tag)
    )
}

pub fn left_log(tag: &str) -> String {
    format!("{tag} just left the server.")
}

pub fn developer_bot_alert(name: &str) -> String {
    format!("Who is the bonehead that assigned the Developer role to a bot? {name} is a bot.")
}

pub fn announcement(display_name: &str) -> String {
    format!("Please welcome {display_name} to the {SERVER_NAME} server.")
}

pub fn already_developer(display_name: &str) -> String {
    format!(
        "{display_name} already has the Developer role. \
         This command can only be used for members without the Developer role."
    )
}

pub fn wrong_channel(welcome: ChannelId) -> String {
    format!(
        "I'd feel a whole lot better if you ran this command in {}.",
        welcome.mention()
    )
}

pub fn guest_prompt(display_name: &str) -> String {
    format!(
        "{display_name} currently has the Guest role. \
         Would you like to remove the Guest role and add the Developer role?"
    )
}

pub fn copied_message(author: &str, content: &str) -> String {
    format!("{author} says:\n>>> {content}")
}

pub fn onboarding_dm(tutorial: ChannelId, language_roles: ChannelId, general: ChannelId) -> String {
    format!(
        "Welcome to the {SERVER_NAME} server.  We hope you find this to be a great place to \
         share and learn more about the Clash of Clans API.  You can check out {} \
         if you need some basic help.  There are some tutorials there as well as some of the more \
         common libraries that are used with various programming languages. If you use more than one \
         programming language, be sure to check out {} to assign yourself the role \
         for each language.\nLastly, say hello in {} and make some new friends!!",
        tutorial.mention(),
        language_roles.mention(),
        general.mention()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_mentions_member() {
        let text = welcome_message("<@42>");

        assert!(text.starts_with("Welcome to the Clash API Developers server, <@42>!"));
        assert!(text.ends_with("access other parts of the server.)"));
    }

    #[test]
    fn channel_references_use_mentions() {
        assert_eq!(
            wrong_channel(ChannelId::new(10)),
            "I'd feel a whole lot better if you ran this command in <#10>."
        );

        let dm = onboarding_dm(ChannelId::new(1), ChannelId::new(2), ChannelId::new(3));
        assert!(dm.contains("check out <#1> if you need"));
        assert!(dm.contains("check out <#2> to assign"));
        assert!(dm.contains("say hello in <#3>"));
    }

    #[test]
    fn copied_message_quotes_content() {
        assert_eq!(
            copied_message("Ada", "hello\nworld"),
            "Ada says:\n>>> hello\nworld"
        );
    }
}
