//! Configuration: ambient environment values and the generator option surface.

pub mod options;

pub use options::{
    GeneratorConfig, InputConfig, InputField, API_KEY_OPTION, MODEL_OPTION, SYSTEM_MESSAGE_OPTION,
    URL_OPTION,
};

use bon::Builder;

/// Production endpoint used when no base URL is configured anywhere.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "OPENAI_MODEL";

/// Values resolved from the process environment at startup.
///
/// Assembled once and handed to the generator explicitly; nothing in the
/// crate reads the environment on its own after that.
///
/// ```
/// use ragstream::config::AmbientConfig;
///
/// let ambient = AmbientConfig::builder()
///     .api_key("sk-test")
///     .base_url("http://localhost:8080/v1")
///     .build();
/// assert_eq!(ambient.resolved_base_url(), "http://localhost:8080/v1");
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct AmbientConfig {
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(into)]
    pub base_url: Option<String>,
    /// Overrides the first discovered model as the dropdown default.
    #[builder(into)]
    pub default_model: Option<String>,
}

impl AmbientConfig {
    /// Load from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: read(API_KEY_ENV),
            base_url: read(BASE_URL_ENV),
            default_model: read(MODEL_ENV),
        }
    }

    /// Base URL, falling back to the production endpoint.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
