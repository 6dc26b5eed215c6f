use tracing::instrument;

use crate::models::{Mod, Recommendation, User};

use super::weights::{COLLABORATIVE_BLEND, CONTENT_BLEND};
use super::{collaborative, content};

/// Blends both stages for one mod.
///
/// The reason comes from the content stage only when it scored strictly
/// higher; ties go to the collaborative reason.
pub fn combine(user: &User, item: &Mod, cohort: &[User]) -> Recommendation {
    let content = content::score(user, item);
    let collaborative = collaborative::score(user, item, cohort);

    let score = content.score * CONTENT_BLEND + collaborative.score * COLLABORATIVE_BLEND;
    let reason = if content.score > collaborative.score {
        content.reason
    } else {
        collaborative.reason
    };

    Recommendation {
        mod_id: item.id.clone(),
        score,
        reason,
    }
}

/// Ranks every mod in the catalog for the user, highest score first.
///
/// Exactly one entry per catalog mod. Equal scores keep catalog order.
#[instrument(skip_all, fields(user_id = %user.id))]
pub fn recommend(user: &User, catalog: &[Mod], cohort: &[User]) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = catalog
        .iter()
        .map(|item| combine(user, item, cohort))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        catalog_size = catalog.len(),
        cohort_size = cohort.len(),
        top_score = ranked.first().map(|r| r.score),
        "Ranked catalog"
    );

    ranked
}
