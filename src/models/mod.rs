mod catalog;
mod recommendation;
mod user;

pub use catalog::{Mod, ModSort};
pub use recommendation::{Recommendation, RecommendationScore, ScoreSource};
pub use user::{Rating, User, UserPreferences};
