use serde::{Deserialize, Serialize};

/// Which scoring stage produced a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Content,
    Collaborative,
}

/// Output of a single scoring stage for one mod.
///
/// `score` is a ranking statistic, not a probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationScore {
    pub score: f64,
    pub reason: String,
    pub source: ScoreSource,
}

/// One ranked entry returned by the hybrid combiner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub mod_id: String,
    pub score: f64,
    pub reason: String,
}
