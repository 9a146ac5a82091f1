//! CLI error types.

use quire_config::ConfigError;
use quire_content::ContentError;
use quire_route::RouteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Route(#[from] RouteError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_config_error_message_passes_through() {
        let err = CliError::from(ConfigError::NotFound(PathBuf::from("/x/quire.toml")));
        assert!(err.to_string().contains("/x/quire.toml"));
    }

    #[test]
    fn test_content_error_message_passes_through() {
        let err = CliError::from(ContentError::unknown_collection("blog"));
        assert!(err.to_string().contains("blog"));
    }
}
