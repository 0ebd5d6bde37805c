use sqlx::PgPool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS bot_language_board (
    role_id BIGINT PRIMARY KEY,
    role_name TEXT NOT NULL,
    emoji_repr TEXT NOT NULL
);
"#;

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
