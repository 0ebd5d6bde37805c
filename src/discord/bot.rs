use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Settings;
use crate::db::LanguageRoleSource;
use crate::error::AppError;
use crate::members::MemberHandlers;
use crate::onboarding::Onboarding;

use super::actions::SerenityActions;
use super::commands;
use super::handler::event_handler;

/// Shared data accessible in all commands and event handlers
pub struct Data {
    pub settings: Arc<Settings>,
    pub members: MemberHandlers,
    pub onboarding: Onboarding,
}

impl Data {
    pub fn new(settings: Arc<Settings>, languages: Arc<dyn LanguageRoleSource>) -> Self {
        Self {
            members: MemberHandlers::new(settings.clone(), languages.clone()),
            onboarding: Onboarding::new(settings.clone(), languages),
            settings,
        }
    }

    /// Discord side of the handlers for one event or command invocation.
    pub fn actions(&self, ctx: &poise::serenity_prelude::Context) -> SerenityActions {
        SerenityActions::new(ctx.clone(), self.settings.prompt_timeout())
    }
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("settings", &self.settings)
            .field("members", &"<MemberHandlers>")
            .field("onboarding", &"<Onboarding>")
            .finish()
    }
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

pub fn create_framework(data: Data) -> poise::Framework<Data, AppError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::developer(), commands::welcome()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("//".into()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    handle_error(error).await;
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                let guild_id = data.settings.guild.junkies;
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;
                info!(
                    bot_name = %ready.user.name,
                    guild_count = ready.guilds.len(),
                    command_guild = %guild_id,
                    "🤖 Bot is ready"
                );
                Ok(data)
            })
        })
        .build()
}

async fn handle_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command_name = ctx.command().name.as_str();
            error!(
                error = ?error,
                command = command_name,
                user_id = %ctx.author().id,
                "🎮 ❌ Command execution failed"
            );
            let _ = ctx.say(format!("Error: {}", error)).await;
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            warn!(
                error = %error,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Invalid command argument"
            );
            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
        }
        poise::FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                permissions = %missing_permissions,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Bot missing permissions"
            );
            let _ = ctx
                .say(format!("Missing permissions: {}", missing_permissions))
                .await;
        }
        poise::FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            if let Some(perms) = missing_permissions {
                warn!(
                    permissions = %perms,
                    user_id = %ctx.author().id,
                    command = ctx.command().name.as_str(),
                    "🎮 ⚠️ User missing permissions"
                );
                let _ = ctx
                    .say(format!("You need these permissions: {}", perms))
                    .await;
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                error = ?error,
                event = event.snake_case_name(),
                "📨 ❌ Event handler failed"
            );
        }
        other => {
            error!(error = ?other, "🎮 ❌ Unhandled framework error");
        }
    }
}
