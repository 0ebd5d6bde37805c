//! Moderator-driven Developer onboarding.
//!
//! Started from the "Developer" message command and applied to the author of
//! that message. Steps run in a fixed order and nothing is rolled back when a
//! later step stops the workflow: a removed Guest role stays removed.

use std::sync::Arc;

use poise::serenity_prelude::{ChannelId, GuildId};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::db::LanguageRoleSource;
use crate::discord::actions::{GuildActions, post_text};
use crate::discord::components::{Confirmation, RoleMenu};
use crate::error::AppError;
use crate::members::{MemberInfo, texts};

#[derive(Debug, Clone)]
pub struct OnboardingRequest {
    pub guild_id: GuildId,
    /// Channel the command was used in. Replies and prompts go here.
    pub channel_id: ChannelId,
    pub invoker: String,
    pub target: MemberInfo,
    pub message_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingOutcome {
    AlreadyDeveloper,
    WrongChannel,
    MissingDeveloperRole,
    GuestSwapTimedOut,
    GuestSwapCancelled,
    Completed { copied: bool },
}

impl OnboardingOutcome {
    /// One-line status for the moderator who ran the command.
    pub fn summary(self, target: &str) -> String {
        match self {
            OnboardingOutcome::AlreadyDeveloper => format!("{target} is already a Developer."),
            OnboardingOutcome::WrongChannel => "Wrong channel, nothing was changed.".to_string(),
            OnboardingOutcome::MissingDeveloperRole => {
                "The Developer role could not be found, nothing was changed.".to_string()
            }
            OnboardingOutcome::GuestSwapTimedOut => {
                format!("Onboarding of {target} stopped: the Guest prompt timed out.")
            }
            OnboardingOutcome::GuestSwapCancelled => {
                format!("Onboarding of {target} cancelled.")
            }
            OnboardingOutcome::Completed { copied: true } => {
                format!("{target} is now a Developer. Their message was copied to #general.")
            }
            OnboardingOutcome::Completed { copied: false } => {
                format!("{target} is now a Developer.")
            }
        }
    }
}

pub struct Onboarding {
    settings: Arc<Settings>,
    languages: Arc<dyn LanguageRoleSource>,
}

impl Onboarding {
    pub fn new(settings: Arc<Settings>, languages: Arc<dyn LanguageRoleSource>) -> Self {
        Self {
            settings,
            languages,
        }
    }

    pub async fn run(
        &self,
        actions: &dyn GuildActions,
        request: &OnboardingRequest,
    ) -> Result<OnboardingOutcome, AppError> {
        let target = &request.target;
        let channel = request.channel_id;
        let roles = &self.settings.roles;
        let channels = &self.settings.channels;

        if target.has_role(roles.developer) {
            actions
                .send_text(channel, texts::already_developer(&target.display_name))
                .await?;
            return Ok(OnboardingOutcome::AlreadyDeveloper);
        }
        if channel != channels.welcome {
            actions
                .send_text(channel, texts::wrong_channel(channels.welcome))
                .await?;
            return Ok(OnboardingOutcome::WrongChannel);
        }
        if actions.role_name(request.guild_id, roles.developer).is_none() {
            warn!(role_id = %roles.developer, "⚠️ [ONBOARDING] Developer role not found");
            actions
                .send_text(channel, texts::DEVELOPER_ROLE_MISSING.to_string())
                .await?;
            return Ok(OnboardingOutcome::MissingDeveloperRole);
        }

        if target.has_role(roles.vip_guest) {
            if actions.role_name(request.guild_id, roles.vip_guest).is_none() {
                warn!(role_id = %roles.vip_guest, "⚠️ [ONBOARDING] Guest role not found, keeping it");
            } else {
                let answer = actions
                    .confirm(channel, texts::guest_prompt(&target.display_name))
                    .await?;
                match answer {
                    None => {
                        actions.send_text(channel, texts::TIMED_OUT.to_string()).await?;
                        return Ok(OnboardingOutcome::GuestSwapTimedOut);
                    }
                    Some(Confirmation::Declined) => {
                        actions.send_text(channel, texts::CANCELLED.to_string()).await?;
                        return Ok(OnboardingOutcome::GuestSwapCancelled);
                    }
                    Some(Confirmation::Confirmed) => {
                        actions
                            .remove_role(
                                request.guild_id,
                                target.id,
                                roles.vip_guest,
                                "Changing to Developer role",
                            )
                            .await?;
                    }
                }
            }
        }

        debug!("[ONBOARDING] pre-checks complete");
        info!(
            member = %target.display_name,
            invoker = %request.invoker,
            "🛠️ [ONBOARDING] starting Developer role add process"
        );

        let role_ids = self.languages.language_role_ids_by_name().await?;
        let menu = RoleMenu::build(actions, target, &role_ids);
        actions
            .offer_roles(channel, texts::ROLE_MENU_PROMPT.to_string(), menu)
            .await?;

        actions
            .add_role(
                request.guild_id,
                target.id,
                roles.developer,
                &format!("Role added by {}", request.invoker),
            )
            .await?;

        let dm = texts::onboarding_dm(channels.tutorial, channels.language_roles, channels.general);
        if let Err(e) = actions.direct_message(target.id, dm).await {
            warn!(error = %e, member = %target.display_name, "⚠️ [ONBOARDING] couldn't DM new Developer");
        }

        let copied = match actions.confirm(channel, texts::COPY_PROMPT.to_string()).await? {
            Some(Confirmation::Confirmed) => {
                let copy = texts::copied_message(&target.display_name, &request.message_content);
                post_text(actions, channels.general, copy).await?.is_some()
            }
            Some(Confirmation::Declined) => false,
            None => {
                debug!("[ONBOARDING] prompt to copy message timed out");
                false
            }
        };

        Ok(OnboardingOutcome::Completed { copied })
    }
}
