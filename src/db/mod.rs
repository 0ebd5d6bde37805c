mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::LanguageRole;
pub use repository::{LanguageRoleSource, Repository};
