use std::num::NonZeroU64;

use async_trait::async_trait;
use poise::serenity_prelude::RoleId;
use sqlx::PgPool;
use tracing::warn;

use super::models::LanguageRole;
use crate::error::AppError;

/// Read access to the language board, as needed by the member handlers.
#[async_trait]
pub trait LanguageRoleSource: Send + Sync {
    /// Every language role, in table order.
    async fn language_roles(&self) -> Result<Vec<LanguageRole>, AppError>;

    /// Language role ids ordered by role name.
    async fn language_role_ids_by_name(&self) -> Result<Vec<RoleId>, AppError>;
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LanguageRoleSource for Repository {
    async fn language_roles(&self) -> Result<Vec<LanguageRole>, AppError> {
        let roles = sqlx::query_as::<_, LanguageRole>(
            "SELECT role_id, role_name, emoji_repr FROM bot_language_board",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn language_role_ids_by_name(&self) -> Result<Vec<RoleId>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT role_id FROM bot_language_board ORDER BY role_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(role_ids(ids))
    }
}

fn role_ids(ids: Vec<i64>) -> Vec<RoleId> {
    ids.into_iter()
        .filter_map(|id| {
            let role = NonZeroU64::new(id as u64).map(RoleId::from);
            if role.is_none() {
                warn!(role_id = id, "⚠️ [DB] language role with invalid id skipped");
            }
            role
        })
        .collect()
}
