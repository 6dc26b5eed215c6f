use crate::models::{Mod, RecommendationScore, ScoreSource, User};

use super::weights::{COLLABORATIVE_FALLBACK_SCORE, MAX_RATING, UNRATED_DOWNLOAD_SCORE};

const FALLBACK_REASON: &str = "Popular among other users";

/// What one cohort member says about a mod they downloaded
fn member_signal(member: &User, mod_id: &str) -> f64 {
    member
        .rating_for(mod_id)
        .map(|r| f64::from(r.rating) / MAX_RATING)
        .unwrap_or(UNRATED_DOWNLOAD_SCORE)
}

/// Averages the signal of every cohort member who downloaded the mod.
///
/// The requesting user is not consulted; it is taken for symmetry with the
/// content stage. An empty cohort, or one where nobody downloaded the mod,
/// yields the flat default.
pub fn score(_user: &User, item: &Mod, cohort: &[User]) -> RecommendationScore {
    let (total, contributors) = cohort
        .iter()
        .filter(|member| member.has_downloaded(&item.id))
        .fold((0.0, 0usize), |(total, count), member| {
            (total + member_signal(member, &item.id), count + 1)
        });

    if contributors == 0 {
        return RecommendationScore {
            score: COLLABORATIVE_FALLBACK_SCORE,
            reason: FALLBACK_REASON.to_string(),
            source: ScoreSource::Collaborative,
        };
    }

    RecommendationScore {
        score: total / contributors as f64,
        reason: format!("{} similar users enjoyed this mod", contributors),
        source: ScoreSource::Collaborative,
    }
}
