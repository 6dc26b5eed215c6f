use crate::models::{Mod, RecommendationScore, ScoreSource, User};

use super::weights::{
    CATEGORY_WEIGHT, CONTENT_FALLBACK_SCORE, MAX_RATING, PREVIOUS_RATING_WEIGHT, TAG_WEIGHT,
};

const FALLBACK_REASON: &str = "Popular in similar categories";

/// Fraction of `labels` accepted by `matches`, or zero for an empty list
fn overlap<F>(labels: &[String], matches: F) -> (usize, f64)
where
    F: Fn(&str) -> bool,
{
    if labels.is_empty() {
        return (0, 0.0);
    }
    let hits = labels.iter().filter(|label| matches(label.as_str())).count();
    (hits, hits as f64 / labels.len() as f64)
}

/// Scores how well a mod's declared categories and tags match the user's
/// stated preferences, plus whatever the user already rated it.
///
/// Each factor that matches at all is named in the reason. When none match
/// the partial sum is discarded in favour of a flat default.
pub fn score(user: &User, item: &Mod) -> RecommendationScore {
    let mut score = 0.0;
    let mut factors: Vec<&str> = Vec::with_capacity(3);

    let (category_hits, category_ratio) =
        overlap(&item.categories, |c| user.preferences.prefers_category(c));
    score += category_ratio * CATEGORY_WEIGHT;
    if category_hits > 0 {
        factors.push("categories");
    }

    let (tag_hits, tag_ratio) = overlap(&item.tags, |t| user.preferences.prefers_tag(t));
    score += tag_ratio * TAG_WEIGHT;
    if tag_hits > 0 {
        factors.push("tags");
    }

    // Any earlier rating counts as a factor, even a 1
    if let Some(previous) = user.rating_for(&item.id) {
        score += (f64::from(previous.rating) / MAX_RATING) * PREVIOUS_RATING_WEIGHT;
        factors.push("previous rating");
    }

    if factors.is_empty() {
        return RecommendationScore {
            score: CONTENT_FALLBACK_SCORE,
            reason: FALLBACK_REASON.to_string(),
            source: ScoreSource::Content,
        };
    }

    RecommendationScore {
        score,
        reason: format!("Based on your {}", factors.join(" and ")),
        source: ScoreSource::Content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use chrono::Utc;

    fn rating(mod_id: &str, value: u8) -> Rating {
        Rating {
            mod_id: mod_id.to_string(),
            rating: value,
            review: None,
            date: Utc::now(),
        }
    }

    fn police_fan() -> User {
        let mut user = User::new("u1", "modder123");
        user.preferences.categories = vec!["Vehicles".to_string()];
        user.preferences.tags = vec!["police".to_string()];
        user
    }

    fn police_pack() -> Mod {
        Mod::new("42", "Police Pack")
            .with_categories(["Vehicles"])
            .with_tags(["police", "emergency"])
    }

    #[test]
    fn test_all_three_factors() {
        let mut user = police_fan();
        user.ratings.push(rating("42", 5));

        let result = score(&user, &police_pack());
        assert!((result.score - 0.85).abs() < 1e-9);
        assert_eq!(
            result.reason,
            "Based on your categories and tags and previous rating"
        );
        assert_eq!(result.source, ScoreSource::Content);
    }

    #[test]
    fn test_partial_tag_overlap() {
        let mut user = User::new("u1", "modder123");
        user.preferences.tags = vec!["emergency".to_string()];

        let result = score(&user, &police_pack());
        assert!((result.score - 0.15).abs() < 1e-9);
        assert_eq!(result.reason, "Based on your tags");
    }

    #[test]
    fn test_no_match_falls_back() {
        let mut user = User::new("u1", "mapper");
        user.preferences.categories = vec!["Maps".to_string()];
        user.preferences.tags = vec!["desert".to_string()];

        let result = score(&user, &police_pack());
        assert_eq!(result.score, CONTENT_FALLBACK_SCORE);
        assert_eq!(result.reason, "Popular in similar categories");
    }

    #[test]
    fn test_low_previous_rating_still_counts() {
        let mut user = User::new("u1", "critic");
        user.ratings.push(rating("42", 1));

        let result = score(&user, &police_pack());
        assert!((result.score - 0.06).abs() < 1e-9);
        assert_eq!(result.reason, "Based on your previous rating");
    }

    #[test]
    fn test_rating_of_other_mod_ignored() {
        let mut user = User::new("u1", "critic");
        user.ratings.push(rating("7", 5));

        let result = score(&user, &police_pack());
        assert_eq!(result.score, CONTENT_FALLBACK_SCORE);
    }

    #[test]
    fn test_empty_attributes_contribute_zero() {
        let user = police_fan();
        let bare = Mod::new("9", "Untagged");

        let result = score(&user, &bare);
        assert!(result.score.is_finite());
        assert_eq!(result.score, CONTENT_FALLBACK_SCORE);
        assert_eq!(result.reason, "Popular in similar categories");
    }

    #[test]
    fn test_empty_categories_with_matching_tags() {
        let user = police_fan();
        let item = Mod::new("9", "Sirens").with_tags(["police"]);

        let result = score(&user, &item);
        assert!((result.score - 0.3).abs() < 1e-9);
        assert_eq!(result.reason, "Based on your tags");
    }

    #[test]
    fn test_duplicate_ratings_use_first_entry() {
        let mut user = User::new("u1", "critic");
        user.ratings.push(rating("42", 5));
        user.ratings.push(rating("42", 1));

        let result = score(&user, &police_pack());
        assert!((result.score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_inputs_untouched() {
        let user = police_fan();
        let item = police_pack();
        let (user_before, item_before) = (user.clone(), item.clone());
        let _ = score(&user, &item);
        assert_eq!(user, user_before);
        assert_eq!(item, item_before);
    }
}
