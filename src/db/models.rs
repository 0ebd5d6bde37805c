use std::num::NonZeroU64;

use poise::serenity_prelude::RoleId;
use sqlx::FromRow;

/// A row of the language board: a selectable programming-language role and
/// the emoji used to react with it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct LanguageRole {
    pub role_id: i64,
    pub role_name: String,
    pub emoji_repr: String,
}

impl LanguageRole {
    /// `None` for rows holding an id of 0, which no Discord role can have.
    pub fn role(&self) -> Option<RoleId> {
        NonZeroU64::new(self.role_id as u64).map(RoleId::from)
    }
}
