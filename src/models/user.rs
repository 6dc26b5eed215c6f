use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories and tags a user has said they care about
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UserPreferences {
    pub fn prefers_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn prefers_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A user's rating of a single mod
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub mod_id: String,
    /// 1 to 5 inclusive
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
    pub date: DateTime<Utc>,
}

/// A marketplace user profile as handed to the scorer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub download_history: Vec<String>,
}

impl User {
    /// Creates a user with no preferences, ratings or downloads
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            bio: None,
            preferences: UserPreferences::default(),
            ratings: Vec::new(),
            download_history: Vec::new(),
        }
    }

    /// First rating recorded for the mod, if any.
    ///
    /// Duplicate entries are not merged: whichever appears first in `ratings` wins.
    pub fn rating_for(&self, mod_id: &str) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.mod_id == mod_id)
    }

    pub fn has_downloaded(&self, mod_id: &str) -> bool {
        self.download_history.iter().any(|id| id == mod_id)
    }

    /// Adds the mod to the download history. Returns false if it was already there.
    pub fn record_download(&mut self, mod_id: &str) -> bool {
        if self.has_downloaded(mod_id) {
            return false;
        }
        self.download_history.push(mod_id.to_string());
        true
    }

    /// Rates a mod, replacing any earlier rating of the same mod in place
    pub fn rate(&mut self, mod_id: &str, rating: u8, review: Option<String>) {
        let date = Utc::now();
        if let Some(existing) = self.ratings.iter_mut().find(|r| r.mod_id == mod_id) {
            existing.rating = rating;
            existing.review = review;
            existing.date = date;
        } else {
            self.ratings.push(Rating {
                mod_id: mod_id.to_string(),
                rating,
                review,
                date,
            });
        }
    }
}
