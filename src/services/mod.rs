pub mod assistant;
pub mod recommendations;

pub use assistant::{Assistant, OpenRouterAssistant};
