//! Error types for ragstream.

use thiserror::Error;

/// Primary error type for all generator operations.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Upstream request failed (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Upstream,
    Network,
    Decode,
}

impl GeneratorError {
    /// Create an upstream error from a status code and response body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::MissingCredential(_) => ErrorCategory::Authentication,
            Self::Upstream { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                _ => ErrorCategory::Upstream,
            },
            Self::Network(_) => ErrorCategory::Network,
            Self::Decode(_) => ErrorCategory::Decode,
        }
    }

    /// HTTP status carried by an upstream failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_includes_status_and_body() {
        let err = GeneratorError::upstream(429, "slow down");
        assert_eq!(
            err.to_string(),
            "Upstream request failed (status 429): slow down"
        );
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn auth_statuses_classify_as_authentication() {
        assert_eq!(
            GeneratorError::upstream(401, "").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            GeneratorError::upstream(500, "").category(),
            ErrorCategory::Upstream
        );
        assert_eq!(
            GeneratorError::MissingCredential("x".into()).category(),
            ErrorCategory::Authentication
        );
    }
}
