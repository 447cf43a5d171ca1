//! Remote model discovery via `GET /models`.

use serde::Deserialize;
use tracing::{debug, warn};

use super::ModelCatalog;
use crate::error::Result;
use crate::provider::http::{bearer_headers, endpoint, error_for_status, shared_client};

#[derive(Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

/// Fetch the provider's model list.
///
/// Returns every non-embedding model id in the provider's order. Transport,
/// status, and body failures are reported, never hidden.
pub async fn fetch_models(
    client: &reqwest::Client,
    api_key: &str,
    base_url: &str,
) -> Result<ModelCatalog> {
    let url = endpoint(base_url, "models");
    debug!(%url, "fetching model list");

    let resp = client
        .get(&url)
        .headers(bearer_headers(api_key))
        .send()
        .await?;
    let resp = error_for_status(resp).await?;

    let body = resp.bytes().await?;
    let list: ModelList = serde_json::from_slice(&body)?;
    let catalog = ModelCatalog::new(list.data.into_iter().map(|m| m.id));

    debug!(count = catalog.len(), "discovered models");
    Ok(catalog)
}

/// Discover models, degrading to [`ModelCatalog::fallback`] on any failure.
///
/// Without a credential no request is made.
pub async fn list_models(api_key: Option<&str>, base_url: &str) -> ModelCatalog {
    let Some(api_key) = api_key else {
        return ModelCatalog::fallback();
    };

    match fetch_models(shared_client(), api_key, base_url).await {
        Ok(catalog) if catalog.is_empty() => {
            warn!("Provider returned no chat models, using defaults");
            ModelCatalog::fallback()
        }
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "Failed to fetch OpenAI models, using defaults");
            ModelCatalog::fallback()
        }
    }
}
