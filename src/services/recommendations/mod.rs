//! Hybrid mod recommendations.
//!
//! Two independent stages score a mod for a user: a content stage comparing
//! the user's preferences against the mod's categories and tags, and a
//! collaborative stage averaging what a supplied cohort of similar users did
//! with it. The hybrid stage blends them and ranks the catalog. Every stage is
//! pure and never touches its inputs.

pub mod collaborative;
pub mod content;
pub mod hybrid;
pub mod weights;

pub use hybrid::{combine, recommend};
