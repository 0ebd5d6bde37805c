//! Outbound calls the handlers make against Discord.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use poise::serenity_prelude::{
    self as serenity, ChannelId, ComponentInteractionCollector, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditMember, GuildId, MessageId, ReactionType,
    RoleId, UserId,
};
use tracing::{debug, error, warn};

use super::components::{ConfirmButtons, Confirmation, RoleMenu, confirm_prompt};
use super::embeds::Announcement;
use crate::error::AppError;

#[async_trait]
pub trait GuildActions: Send + Sync {
    /// Whether the channel resolves to a live guild channel.
    fn channel_exists(&self, channel_id: ChannelId) -> bool;

    /// Name of the role if it exists in the guild.
    fn role_name(&self, guild_id: GuildId, role_id: RoleId) -> Option<String>;

    /// Current roles of a member, `None` if they can't be fetched.
    async fn member_roles(&self, guild_id: GuildId, user_id: UserId) -> Option<Vec<RoleId>>;

    async fn send_text(&self, channel_id: ChannelId, content: String)
    -> Result<MessageId, AppError>;

    async fn send_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, AppError>;

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError>;

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError>;

    async fn direct_message(&self, user_id: UserId, content: String) -> Result<(), AppError>;

    /// Posts a Yes/No prompt and waits for the first press. `None` when the
    /// prompt timed out.
    async fn confirm(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> Result<Option<Confirmation>, AppError>;

    /// Posts the role menu. Presses are handled in the background until one
    /// of them grants a role.
    async fn offer_roles(
        &self,
        channel_id: ChannelId,
        content: String,
        menu: RoleMenu,
    ) -> Result<(), AppError>;
}

/// Sends to a configured channel, or logs and skips if it doesn't resolve.
pub async fn post_text(
    actions: &dyn GuildActions,
    channel_id: ChannelId,
    content: String,
) -> Result<Option<MessageId>, AppError> {
    if !actions.channel_exists(channel_id) {
        warn!(channel_id = %channel_id, "⚠️ [DISCORD] channel not found, message skipped");
        return Ok(None);
    }
    actions.send_text(channel_id, content).await.map(Some)
}

pub async fn post_announcement(
    actions: &dyn GuildActions,
    channel_id: ChannelId,
    announcement: &Announcement,
) -> Result<Option<MessageId>, AppError> {
    if !actions.channel_exists(channel_id) {
        warn!(channel_id = %channel_id, "⚠️ [DISCORD] channel not found, announcement skipped");
        return Ok(None);
    }
    actions
        .send_announcement(channel_id, announcement)
        .await
        .map(Some)
}

/// [`GuildActions`] backed by a live gateway connection.
#[derive(Clone)]
pub struct SerenityActions {
    ctx: serenity::Context,
    prompt_timeout: Duration,
}

impl SerenityActions {
    pub fn new(ctx: serenity::Context, prompt_timeout: Duration) -> Self {
        Self {
            ctx,
            prompt_timeout,
        }
    }
}

#[async_trait]
impl GuildActions for SerenityActions {
    fn channel_exists(&self, channel_id: ChannelId) -> bool {
        self.ctx.cache.channel(channel_id).is_some()
    }

    fn role_name(&self, guild_id: GuildId, role_id: RoleId) -> Option<String> {
        self.ctx
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.roles.get(&role_id).map(|role| role.name.clone()))
    }

    async fn member_roles(&self, guild_id: GuildId, user_id: UserId) -> Option<Vec<RoleId>> {
        match guild_id.member(&self.ctx, user_id).await {
            Ok(member) => Some(member.roles),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "⚠️ [DISCORD] couldn't refresh member roles");
                None
            }
        }
    }

    async fn send_text(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> Result<MessageId, AppError> {
        let message = channel_id.say(&self.ctx, content).await?;
        Ok(message.id)
    }

    async fn send_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, AppError> {
        let message = channel_id
            .send_message(&self.ctx, CreateMessage::new().embed(announcement.to_embed()))
            .await?;
        Ok(message.id)
    }

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        let reaction = match ReactionType::try_from(emoji) {
            Ok(reaction) => reaction,
            Err(e) => {
                warn!(emoji, error = ?e, "⚠️ [DISCORD] unusable emoji, reaction skipped");
                return Ok(());
            }
        };
        channel_id
            .create_reaction(&self.ctx, message_id, reaction)
            .await?;
        Ok(())
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.ctx
            .http
            .add_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.ctx
            .http
            .remove_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError> {
        guild_id
            .edit_member(&self.ctx, user_id, EditMember::new().nickname(nickname))
            .await?;
        Ok(())
    }

    async fn direct_message(&self, user_id: UserId, content: String) -> Result<(), AppError> {
        user_id
            .direct_message(&self.ctx, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn confirm(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> Result<Option<Confirmation>, AppError> {
        let (mut buttons, pending) = confirm_prompt();
        let message = channel_id
            .send_message(
                &self.ctx,
                CreateMessage::new()
                    .content(content)
                    .components(ConfirmButtons::components()),
            )
            .await?;

        let collector = ComponentInteractionCollector::new(&self.ctx)
            .message_id(message.id)
            .timeout(self.prompt_timeout);
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            let mut presses = Box::pin(collector.stream());
            while let Some(interaction) = presses.next().await {
                let pressed = &interaction;
                let ctx = &ctx;
                let answered = buttons
                    .answer(&pressed.data.custom_id, |choice| async move {
                        let reply = CreateInteractionResponse::Message(
                            CreateInteractionResponseMessage::new()
                                .content(choice.acknowledgement())
                                .ephemeral(true),
                        );
                        if let Err(e) = pressed.create_response(ctx, reply).await {
                            warn!(error = %e, "⚠️ [PROMPT] couldn't acknowledge button press");
                        }
                    })
                    .await;
                if let Some(choice) = answered {
                    debug!(user_id = %interaction.user.id, ?choice, "[PROMPT] button pressed");
                    break;
                }
            }
        });

        Ok(pending.wait(self.prompt_timeout).await)
    }

    async fn offer_roles(
        &self,
        channel_id: ChannelId,
        content: String,
        mut menu: RoleMenu,
    ) -> Result<(), AppError> {
        let message = channel_id
            .send_message(
                &self.ctx,
                CreateMessage::new()
                    .content(content)
                    .components(menu.components()),
            )
            .await?;
        if menu.is_empty() {
            return Ok(());
        }
        debug!(
            message_id = %message.id,
            roles = menu.buttons().len(),
            "[ROLES] listening for language role presses"
        );

        let collector = ComponentInteractionCollector::new(&self.ctx).message_id(message.id);
        let actions = self.clone();
        let message_id = message.id;
        tokio::spawn(async move {
            let mut presses = Box::pin(collector.stream());
            while let Some(interaction) = presses.next().await {
                let custom_id = interaction.data.custom_id.as_str();
                if menu.find(custom_id).is_none() {
                    continue;
                }

                if let Err(e) = interaction
                    .create_response(&actions.ctx, CreateInteractionResponse::Acknowledge)
                    .await
                {
                    warn!(error = %e, "⚠️ [ROLES] couldn't acknowledge button press");
                }

                let pressed_by = interaction
                    .member
                    .as_ref()
                    .map(|member| member.display_name().to_string())
                    .unwrap_or_else(|| interaction.user.display_name().to_string());
                match menu.press(&actions, custom_id, &pressed_by).await {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => error!(error = ?e, custom_id, "❌ [ROLES] failed to grant role"),
                }
            }
            debug!(message_id = %message_id, "[ROLES] role menu closed");
        });

        Ok(())
    }
}
