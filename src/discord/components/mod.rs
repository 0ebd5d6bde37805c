//! Button prompts attached to bot messages.

pub mod confirm;
pub mod role_menu;

pub use confirm::{ConfirmButtons, Confirmation, confirm_prompt};
pub use role_menu::RoleMenu;
