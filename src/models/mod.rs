//! Model catalog and discovery.

pub mod discovery;

pub use discovery::{fetch_models, list_models};

use serde::{Deserialize, Serialize};

/// Models offered when discovery is skipped or fails.
pub const FALLBACK_MODELS: [&str; 2] = ["gpt-4o", "gpt-3.5-turbo"];

/// Model used when a request's configuration carries no `Model` option.
pub const DEFAULT_REQUEST_MODEL: &str = "gpt-3.5-turbo";

/// Ordered set of chat-capable model identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct ModelCatalog {
    ids: Vec<String>,
}

impl ModelCatalog {
    /// Build a catalog, dropping embedding models and duplicates while
    /// keeping the given order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for id in ids.into_iter().map(Into::into) {
            if is_embedding_model(&id) || out.contains(&id) {
                continue;
            }
            out.push(id);
        }
        Self { ids: out }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_MODELS)
    }

    /// First entry, used as the dropdown default.
    pub fn first(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|m| m == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }
}

impl From<Vec<String>> for ModelCatalog {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

impl From<ModelCatalog> for Vec<String> {
    fn from(catalog: ModelCatalog) -> Self {
        catalog.ids
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Whether an identifier names an embedding-only model.
pub fn is_embedding_model(id: &str) -> bool {
    id.contains("embedding")
}
