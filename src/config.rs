use std::env;
use std::path::Path;
use std::time::Duration;

use poise::serenity_prelude::{ChannelId, GuildId, RoleId};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Guild the member event handlers answer to. Historically hard-coded and
/// distinct from `guild.junkies`, which only scopes command registration.
pub const DEFAULT_SUPPORTED_GUILD: u64 = 566_451_504_332_931_073;

const DEFAULT_LANGUAGE_ROLES_CHANNEL: u64 = 885_216_742_903_803_925;
const DEFAULT_ANNOUNCE_DELAY_SECS: u64 = 10;
const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub settings_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".into()))?;

        let settings_path = env::var("SETTINGS_PATH").unwrap_or_else(|_| "settings.toml".into());

        Ok(Self {
            discord_token,
            database_url,
            settings_path,
        })
    }
}

/// Channel, role and guild ids of the server, plus handler timings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub channels: Channels,
    pub roles: Roles,
    pub guild: Guilds,
    #[serde(default = "default_supported_guild", deserialize_with = "snowflake")]
    pub supported_guild: GuildId,
    #[serde(default)]
    pub timing: Timing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channels {
    #[serde(deserialize_with = "snowflake")]
    pub welcome: ChannelId,
    #[serde(rename = "mod-log", alias = "mod_log", deserialize_with = "snowflake")]
    pub mod_log: ChannelId,
    #[serde(deserialize_with = "snowflake")]
    pub admin: ChannelId,
    #[serde(deserialize_with = "snowflake")]
    pub general: ChannelId,
    #[serde(deserialize_with = "snowflake")]
    pub tutorial: ChannelId,
    #[serde(
        rename = "language-roles",
        alias = "language_roles",
        default = "default_language_roles_channel",
        deserialize_with = "snowflake"
    )]
    pub language_roles: ChannelId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Roles {
    #[serde(deserialize_with = "snowflake")]
    pub developer: RoleId,
    #[serde(deserialize_with = "snowflake")]
    pub vip_guest: RoleId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Guilds {
    #[serde(deserialize_with = "snowflake")]
    pub junkies: GuildId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub announce_delay_secs: u64,
    pub prompt_timeout_secs: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            announce_delay_secs: DEFAULT_ANNOUNCE_DELAY_SECS,
            prompt_timeout_secs: DEFAULT_PROMPT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(raw)?)
    }

    /// Grace period before a new Developer is announced.
    pub fn announce_delay(&self) -> Duration {
        Duration::from_secs(self.timing.announce_delay_secs)
    }

    /// How long a Yes/No prompt waits for a press.
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.timing.prompt_timeout_secs)
    }
}

fn default_supported_guild() -> GuildId {
    GuildId::new(DEFAULT_SUPPORTED_GUILD)
}

fn default_language_roles_channel() -> ChannelId {
    ChannelId::new(DEFAULT_LANGUAGE_ROLES_CHANNEL)
}

/// Snowflakes are plain integers in the settings file. Zero is rejected since
/// serenity ids are non-zero.
fn snowflake<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<std::num::NonZeroU64>,
{
    let raw = u64::deserialize(deserializer)?;
    std::num::NonZeroU64::new(raw)
        .map(T::from)
        .ok_or_else(|| serde::de::Error::custom("ids must be non-zero"))
}
