use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mod listed in the marketplace catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    /// Category labels; scoring treats an empty list as contributing nothing
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub downloads: u64,
    /// Submission time; entries loaded without one are stamped on read
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Listing order for the catalog. Without one, catalog order is kept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModSort {
    /// Most recently submitted first; equal timestamps put later submissions first
    Newest,
    /// Most downloaded first; equal counts keep catalog order
    Popular,
}

impl ModSort {
    pub fn apply(self, mods: &mut [Mod]) {
        match self {
            ModSort::Newest => {
                mods.reverse();
                mods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ModSort::Popular => mods.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
        }
    }
}

impl Mod {
    /// Creates a mod with no categories or tags
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            author: String::new(),
            version: String::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            downloads: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Case-insensitive substring match on the name or the description
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_builder() {
        let item = Mod::new("42", "Realistic Police Vehicles")
            .with_categories(["Vehicles"])
            .with_tags(["police", "emergency"]);
        assert!(item.in_category("Vehicles"));
        assert!(!item.in_category("Scripts"));
        assert_eq!(item.tags.len(), 2);
        assert_eq!(item.downloads, 0);
    }

    #[test]
    fn test_matches_search_ignores_case() {
        let item = Mod::new("1", "Advanced RP Interactions");
        assert!(item.matches_search("rp inter"));
        assert!(!item.matches_search("police"));
    }

    #[test]
    fn test_matches_search_looks_at_description() {
        let mut item = Mod::new("1", "ELS Pack");
        item.description = "Police sirens and lightbars".to_string();
        assert!(item.matches_search("SIRENS"));
        assert!(!item.matches_search("desert"));
    }

    #[test]
    fn test_created_at_defaults_when_missing() {
        let before = Utc::now();
        let item: Mod = serde_json::from_str(r#"{"id":"1","name":"Map"}"#).unwrap();
        assert!(item.created_at >= before);
        assert!(item.categories.is_empty());
    }

    fn ids(mods: &[Mod]) -> Vec<&str> {
        mods.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_sort_popular_is_stable() {
        let mut mods: Vec<Mod> = ["a", "b", "c", "d"].iter().map(|id| Mod::new(*id, *id)).collect();
        mods[1].downloads = 3;
        mods[3].downloads = 3;
        mods[2].downloads = 1;

        ModSort::Popular.apply(&mut mods);
        assert_eq!(ids(&mods), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_sort_newest() {
        let base = Utc::now();
        let mut mods: Vec<Mod> = ["a", "b", "c"].iter().map(|id| Mod::new(*id, *id)).collect();
        mods[0].created_at = base - Duration::days(1);
        mods[1].created_at = base;
        mods[2].created_at = base;

        ModSort::Newest.apply(&mut mods);
        assert_eq!(ids(&mods), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_parses_lowercase() {
        let sort: ModSort = serde_json::from_str("\"popular\"").unwrap();
        assert_eq!(sort, ModSort::Popular);
    }
}
