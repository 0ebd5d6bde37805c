use std::sync::Arc;

use poise::serenity_prelude as serenity;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use config::{Config, Settings};
use db::{LanguageRoleSource, Repository};
use discord::{Data, create_framework};
use error::AppError;

mod config;
mod db;
mod discord;
mod error;
mod logging;
mod members;
mod onboarding;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logging::init();

    let config = Config::from_env()?;
    let settings = Arc::new(Settings::load(&config.settings_path)?);
    info!(
        path = %config.settings_path,
        supported_guild = %settings.supported_guild,
        "⚙️ Settings loaded"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    db::run_migrations(&pool).await?;
    let languages: Arc<dyn LanguageRoleSource> = Arc::new(Repository::new(pool));

    let framework = create_framework(Data::new(settings, languages));
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("🌐 Connecting to Discord gateway");
    client.start().await?;

    Ok(())
}
