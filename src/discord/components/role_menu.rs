use poise::serenity_prelude::{
    ButtonStyle, CreateActionRow, CreateButton, GuildId, RoleId, UserId,
};
use tracing::warn;

use crate::discord::actions::GuildActions;
use crate::error::AppError;
use crate::members::MemberInfo;

const CUSTOM_ID_PREFIX: &str = "RoleView:";
const BUTTONS_PER_ROW: usize = 5;
const MAX_BUTTONS: usize = 25;
const NICKNAME_MAX_CHARS: usize = 32;

/// `"<display name> | <role name>"`, shortening the display name so the
/// result fits Discord's nickname limit.
pub fn tagged_nickname(display_name: &str, role_name: &str) -> String {
    let suffix = format!(" | {role_name}");
    let room = NICKNAME_MAX_CHARS.saturating_sub(suffix.chars().count());
    let nickname: String = display_name.chars().take(room).chain(suffix.chars()).collect();
    nickname.chars().take(NICKNAME_MAX_CHARS).collect()
}

/// One selectable role, bound to the member it will be granted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleButton {
    pub role_id: RoleId,
    pub role_name: String,
    guild_id: GuildId,
    target: UserId,
    target_name: String,
}

impl RoleButton {
    pub fn custom_id(&self) -> String {
        format!("{CUSTOM_ID_PREFIX}{}", self.role_id)
    }

    pub fn nickname(&self) -> String {
        tagged_nickname(&self.target_name, &self.role_name)
    }

    pub async fn grant(&self, actions: &dyn GuildActions, pressed_by: &str) -> Result<(), AppError> {
        actions
            .add_role(
                self.guild_id,
                self.target,
                self.role_id,
                &format!("{pressed_by} using a button."),
            )
            .await?;
        actions
            .set_nickname(self.guild_id, self.target, &self.nickname())
            .await
    }

    fn to_button(&self) -> CreateButton {
        CreateButton::new(self.custom_id())
            .label(self.role_name.clone())
            .style(ButtonStyle::Primary)
    }
}

/// Buttons for every resolvable role of a list, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMenu {
    buttons: Vec<RoleButton>,
}

impl RoleMenu {
    pub fn build(actions: &dyn GuildActions, target: &MemberInfo, role_ids: &[RoleId]) -> Self {
        let mut buttons = Vec::new();

        for &role_id in role_ids {
            let Some(role_name) = actions.role_name(target.guild_id, role_id) else {
                warn!(role_id = %role_id, "⚠️ [ROLES] role not found, no button for it");
                continue;
            };
            if buttons.len() == MAX_BUTTONS {
                warn!(
                    skipped = role_ids.len() - MAX_BUTTONS,
                    "⚠️ [ROLES] too many language roles for one message"
                );
                break;
            }

            buttons.push(RoleButton {
                role_id,
                role_name,
                guild_id: target.guild_id,
                target: target.id,
                target_name: target.display_name.clone(),
            });
        }

        Self { buttons }
    }

    pub fn buttons(&self) -> &[RoleButton] {
        &self.buttons
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn find(&self, custom_id: &str) -> Option<&RoleButton> {
        self.buttons
            .iter()
            .find(|button| button.custom_id() == custom_id)
    }

    /// Grants the role behind `custom_id`. The menu closes after the first
    /// successful grant; returns whether that happened.
    pub async fn press(
        &mut self,
        actions: &dyn GuildActions,
        custom_id: &str,
        pressed_by: &str,
    ) -> Result<bool, AppError> {
        let Some(button) = self.find(custom_id) else {
            return Ok(false);
        };
        button.grant(actions, pressed_by).await?;
        self.buttons.clear();
        Ok(true)
    }

    pub fn components(&self) -> Vec<CreateActionRow> {
        self.buttons
            .chunks(BUTTONS_PER_ROW)
            .map(|row| CreateActionRow::Buttons(row.iter().map(RoleButton::to_button).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingActions, member};

    fn actions() -> RecordingActions {
        RecordingActions::new()
            .with_role(RoleId::new(30), "Python")
            .with_role(RoleId::new(31), "Rust")
    }

    #[test]
    fn skips_unresolvable_roles() {
        let target = member(7, GuildId::new(900));
        let ids = [RoleId::new(31), RoleId::new(404), RoleId::new(30)];

        let menu = RoleMenu::build(&actions(), &target, &ids);

        let names: Vec<_> = menu.buttons().iter().map(|b| b.role_name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python"]);
        assert_eq!(menu.components().len(), 1);
        assert!(menu.find("RoleView:30").is_some());
        assert!(menu.find("RoleView:404").is_none());
    }

    #[test]
    fn caps_buttons_and_rows() {
        let mut actions = RecordingActions::new();
        let ids: Vec<_> = (1..=30).map(RoleId::new).collect();
        for id in &ids {
            actions = actions.with_role(*id, &format!("Lang {id}"));
        }

        let menu = RoleMenu::build(&actions, &member(7, GuildId::new(900)), &ids);

        assert_eq!(menu.buttons().len(), MAX_BUTTONS);
        assert_eq!(menu.components().len(), MAX_BUTTONS / BUTTONS_PER_ROW);
    }

    #[tokio::test]
    async fn pressing_grants_role_and_tags_nickname() {
        let actions = actions();
        let guild = GuildId::new(900);
        let target = member(7, guild);
        let menu = RoleMenu::build(&actions, &target, &[RoleId::new(31)]);

        let button = menu.find("RoleView:31").unwrap();
        button.grant(&actions, "Mod").await.unwrap();

        assert_eq!(
            actions.calls(),
            vec![
                Call::AddRole {
                    guild,
                    user: UserId::new(7),
                    role: RoleId::new(31),
                    reason: "Mod using a button.".to_string(),
                },
                Call::Nickname {
                    guild,
                    user: UserId::new(7),
                    nickname: "Member 7 | Rust".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn menu_closes_after_first_grant() {
        let actions = actions();
        let guild = GuildId::new(900);
        let mut menu = RoleMenu::build(
            &actions,
            &member(7, guild),
            &[RoleId::new(30), RoleId::new(31)],
        );

        assert!(!menu.press(&actions, "RoleView:404", "Mod").await.unwrap());
        assert!(actions.calls().is_empty());

        assert!(menu.press(&actions, "RoleView:31", "Mod").await.unwrap());
        assert!(menu.is_empty());

        assert!(!menu.press(&actions, "RoleView:30", "Mod").await.unwrap());
        assert_eq!(actions.role_mutations(), 2);
    }

    #[test]
    fn nickname_fits_limit() {
        assert_eq!(tagged_nickname("Ada", "Rust"), "Ada | Rust");

        let long = tagged_nickname("A very long display name indeed", "JavaScript");
        assert_eq!(long.chars().count(), NICKNAME_MAX_CHARS);
        assert!(long.ends_with(" | JavaScript"));

        let huge_role = tagged_nickname("Ada", &"x".repeat(40));
        assert_eq!(huge_role.chars().count(), NICKNAME_MAX_CHARS);
    }
}
