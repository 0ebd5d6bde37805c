mod developer;
mod welcome;

pub use developer::developer;
pub use welcome::welcome;
