use poise::serenity_prelude as serenity;
use tracing::{debug, info};

use crate::error::AppError;
use crate::members::MemberInfo;

use super::bot::Data;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, AppError>,
    data: &Data,
) -> Result<(), AppError> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("🤖 [DISCORD] connected as {}", data_about_bot.user.name);
            info!(
                "🎮 [DISCORD] joined {} guild(s)",
                data_about_bot.guilds.len()
            );
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            let member = MemberInfo::from(new_member);
            data.members
                .member_joined(&data.actions(ctx), &member)
                .await?;
        }
        serenity::FullEvent::GuildMemberUpdate {
            old_if_available,
            new,
            ..
        } => match (old_if_available, new) {
            (Some(old), Some(new)) => {
                let old = MemberInfo::from(old);
                let new = MemberInfo::from(new);
                data.members
                    .member_updated(&data.actions(ctx), &old, &new)
                    .await?;
            }
            _ => debug!("[DISCORD] member update without cached state, ignored"),
        },
        serenity::FullEvent::GuildMemberRemoval {
            guild_id,
            user,
            member_data_if_available,
        } => {
            let member = match member_data_if_available {
                Some(member) => MemberInfo::from(member),
                None => MemberInfo::from_user(*guild_id, user),
            };
            data.members
                .member_left(&data.actions(ctx), &member)
                .await?;
        }
        _ => {}
    }

    Ok(())
}
