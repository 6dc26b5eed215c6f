use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Mod, User};
use crate::services::Assistant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    /// Chat backend; `None` disables the assistant endpoint
    pub assistant: Option<Arc<dyn Assistant>>,
}

/// Users and the mod catalog, already loaded
pub struct AppStateInner {
    pub users: HashMap<String, User>,
    /// Insertion order is catalog order, which decides ranking ties
    pub catalog: Vec<Mod>,
}

impl AppStateInner {
    pub fn find_mod(&self, id: &str) -> Option<&Mod> {
        self.catalog.iter().find(|m| m.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates empty state with the assistant disabled
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                users: HashMap::new(),
                catalog: Vec::new(),
            })),
            assistant: None,
        }
    }

    pub fn with_assistant(mut self, assistant: Arc<dyn Assistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }
}
