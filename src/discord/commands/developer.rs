use poise::serenity_prelude as serenity;
use tracing::{info, instrument};

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::members::MemberInfo;
use crate::onboarding::OnboardingRequest;

/// Grant the Developer role to the author of a message
#[poise::command(
    context_menu_command = "Developer",
    guild_only,
    default_member_permissions = "MANAGE_ROLES"
)]
#[instrument(
    skip(ctx, message),
    fields(
        guild_id,
        user_id = %ctx.author().id,
        target_id = %message.author.id
    )
)]
pub async fn developer(ctx: Context<'_>, message: serenity::Message) -> Result<(), AppError> {
    let guild_id = ctx
        .guild_id()
        .ok_or(AppError::Config("Must be used in a guild".into()))?;
    tracing::Span::current().record("guild_id", guild_id.get());

    // The workflow waits on prompts, so answer the interaction right away
    ctx.defer_ephemeral().await?;

    let target = guild_id
        .member(ctx.serenity_context(), message.author.id)
        .await?;
    let invoker = match ctx.author_member().await {
        Some(member) => member.display_name().to_string(),
        None => ctx.author().display_name().to_string(),
    };

    let request = OnboardingRequest {
        guild_id,
        channel_id: ctx.channel_id(),
        invoker,
        target: MemberInfo::from(&target),
        message_content: message.content.clone(),
    };

    let actions = ctx.data().actions(ctx.serenity_context());
    let outcome = ctx.data().onboarding.run(&actions, &request).await?;
    info!(?outcome, "Developer onboarding finished");

    ctx.say(outcome.summary(&request.target.display_name))
        .await?;

    Ok(())
}
