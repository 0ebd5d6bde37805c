use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file {path} could not be read: {source}")]
    SettingsIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Settings file is invalid: {0}")]
    SettingsParse(#[from] toml::de::Error),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}
