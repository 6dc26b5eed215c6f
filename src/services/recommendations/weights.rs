//! Fixed coefficients of the scoring formula.

/// Highest value a rating can take; ratings are normalised by it
pub const MAX_RATING: f64 = 5.0;

/// Share of the content score driven by category overlap
pub const CATEGORY_WEIGHT: f64 = 0.4;
/// Share of the content score driven by tag overlap
pub const TAG_WEIGHT: f64 = 0.3;
/// Share of the content score driven by the user's own earlier rating
pub const PREVIOUS_RATING_WEIGHT: f64 = 0.3;
/// Content score when nothing about the user matches the mod
pub const CONTENT_FALLBACK_SCORE: f64 = 0.5;

/// Contribution of a cohort member who downloaded the mod but never rated it
pub const UNRATED_DOWNLOAD_SCORE: f64 = 0.7;
/// Collaborative score when no cohort member downloaded the mod
pub const COLLABORATIVE_FALLBACK_SCORE: f64 = 0.5;

/// Blend of the two stages in the hybrid score
pub const CONTENT_BLEND: f64 = 0.6;
pub const COLLABORATIVE_BLEND: f64 = 0.4;
