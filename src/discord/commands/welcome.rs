use poise::serenity_prelude as serenity;
use tracing::instrument;

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::members::{MemberInfo, texts};

/// Post the welcome message for a member again
#[poise::command(prefix_command, guild_only, hide_in_help)]
#[instrument(skip(ctx, member), fields(user_id = %ctx.author().id))]
pub async fn welcome(
    ctx: Context<'_>,
    #[description = "Member to welcome"] member: Option<serenity::Member>,
) -> Result<(), AppError> {
    let Some(member) = member else {
        ctx.say(texts::MEMBER_MISSING).await?;
        return Ok(());
    };

    let invoker = match ctx.author_member().await {
        Some(author) => author.display_name().to_string(),
        None => ctx.author().display_name().to_string(),
    };

    let actions = ctx.data().actions(ctx.serenity_context());
    ctx.data()
        .members
        .resend_welcome(&actions, &MemberInfo::from(&member), &invoker)
        .await
}
