pub mod actions;
mod bot;
pub mod commands;
pub mod components;
pub mod embeds;
mod handler;

pub use bot::{Data, create_framework};
