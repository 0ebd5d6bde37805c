//! Reactions to members joining, leaving and being granted the Developer role.

use std::num::NonZeroU16;
use std::sync::Arc;

use poise::serenity_prelude::{GuildId, Member, Mentionable, RoleId, User, UserId};
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::db::LanguageRoleSource;
use crate::discord::actions::{GuildActions, post_announcement, post_text};
use crate::discord::embeds::Announcement;
use crate::error::AppError;

pub mod languages;
pub mod texts;

pub use languages::MemberLanguages;

/// The parts of a guild member the handlers look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub id: UserId,
    pub guild_id: GuildId,
    pub name: String,
    pub display_name: String,
    pub discriminator: Option<NonZeroU16>,
    pub avatar_url: Option<String>,
    pub bot: bool,
    pub roles: Vec<RoleId>,
}

impl MemberInfo {
    /// Member data for someone only known as a user, e.g. after leaving.
    pub fn from_user(guild_id: GuildId, user: &User) -> Self {
        Self {
            id: user.id,
            guild_id,
            name: user.name.clone(),
            display_name: user.display_name().to_string(),
            discriminator: user.discriminator,
            avatar_url: user.avatar_url(),
            bot: user.bot,
            roles: Vec::new(),
        }
    }

    pub fn mention(&self) -> String {
        self.id.mention().to_string()
    }

    /// `display#discriminator`, with `0` for accounts without one.
    pub fn tag(&self) -> String {
        format!(
            "{}#{}",
            self.display_name,
            self.discriminator.map_or(0, NonZeroU16::get)
        )
    }

    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            display_name: member.display_name().to_string(),
            roles: member.roles.clone(),
            ..Self::from_user(member.guild_id, &member.user)
        }
    }
}

fn same_roles(old: &[RoleId], new: &[RoleId]) -> bool {
    let mut old = old.to_vec();
    let mut new = new.to_vec();
    old.sort_unstable();
    new.sort_unstable();
    old == new
}

/// Join, update and removal handlers for the supported guild.
pub struct MemberHandlers {
    settings: Arc<Settings>,
    languages: Arc<dyn LanguageRoleSource>,
}

impl MemberHandlers {
    pub fn new(settings: Arc<Settings>, languages: Arc<dyn LanguageRoleSource>) -> Self {
        Self {
            settings,
            languages,
        }
    }

    fn in_supported_guild(&self, guild_id: GuildId) -> bool {
        guild_id == self.settings.supported_guild
    }

    pub async fn member_joined(
        &self,
        actions: &dyn GuildActions,
        member: &MemberInfo,
    ) -> Result<(), AppError> {
        if !self.in_supported_guild(member.guild_id) {
            return Ok(());
        }
        info!(member = %member.tag(), bot = member.bot, "👋 [MEMBERS] member joined");

        let channels = &self.settings.channels;
        if member.bot {
            post_text(actions, channels.admin, texts::bot_invited(&member.mention())).await?;
        } else {
            post_text(
                actions,
                channels.welcome,
                texts::welcome_message(&member.mention()),
            )
            .await?;
        }

        post_text(actions, channels.mod_log, texts::joined_log(&member.tag())).await?;
        Ok(())
    }

    /// Announces members who just received the Developer role. Returns whether
    /// an announcement was posted.
    pub async fn member_updated(
        &self,
        actions: &dyn GuildActions,
        old: &MemberInfo,
        new: &MemberInfo,
    ) -> Result<bool, AppError> {
        if !self.in_supported_guild(new.guild_id) || same_roles(&old.roles, &new.roles) {
            return Ok(false);
        }

        let developer = self.settings.roles.developer;
        if old.has_role(developer) || !new.has_role(developer) {
            return Ok(false);
        }
        if actions.role_name(new.guild_id, developer).is_none() {
            warn!(role_id = %developer, "⚠️ [MEMBERS] Developer role not found, skipping announcement");
            return Ok(false);
        }

        if new.bot {
            post_text(
                actions,
                self.settings.channels.admin,
                texts::developer_bot_alert(&new.name),
            )
            .await?;
        }

        // Leave moderators time to hand out a language role as well.
        tokio::time::sleep(self.settings.announce_delay()).await;
        info!(member = %new.display_name, "🎉 [MEMBERS] new member with Developer role");

        let board = self.languages.language_roles().await?;
        let roles = match actions.member_roles(new.guild_id, new.id).await {
            Some(roles) => roles,
            None => new.roles.clone(),
        };
        let languages = MemberLanguages::matching(&board, &roles);

        let general = self.settings.channels.general;
        let announcement = Announcement::new_developer(new, &languages);
        let Some(message_id) = post_announcement(actions, general, &announcement).await? else {
            return Ok(false);
        };

        for (role_id, emoji) in languages.emojis() {
            debug!(role_id = %role_id, emoji, "[MEMBERS] reacting with language emoji");
            actions.react(general, message_id, emoji).await?;
        }

        Ok(true)
    }

    pub async fn member_left(
        &self,
        actions: &dyn GuildActions,
        member: &MemberInfo,
    ) -> Result<(), AppError> {
        if !self.in_supported_guild(member.guild_id) {
            return Ok(());
        }
        info!(member = %member.tag(), "🚪 [MEMBERS] member left");

        let farewell = texts::FAREWELLS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(texts::FAREWELLS[0]);
        let channels = &self.settings.channels;
        post_text(
            actions,
            channels.general,
            format!("{}{}", member.display_name, farewell),
        )
        .await?;
        post_text(actions, channels.mod_log, texts::left_log(&member.tag())).await?;
        Ok(())
    }

    /// Manual re-run of the welcome post, noted as such in the moderation log.
    pub async fn resend_welcome(
        &self,
        actions: &dyn GuildActions,
        member: &MemberInfo,
        invoker: &str,
    ) -> Result<(), AppError> {
        let channels = &self.settings.channels;
        post_text(
            actions,
            channels.welcome,
            texts::welcome_message(&member.mention()),
        )
        .await?;
        post_text(
            actions,
            channels.mod_log,
            texts::manual_welcome_log(&member.tag(), invoker),
        )
        .await?;
        Ok(())
    }
}
