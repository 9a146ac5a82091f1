//! Route error types.

use quire_content::ContentError;

/// Error building route data.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Edit link target is not an absolute URL.
    #[error("Invalid edit URL `{url}`: {source}")]
    InvalidEditUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Request URL cannot be parsed.
    #[error("Invalid request URL `{url}`: {source}")]
    InvalidRequestUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Content store failure.
    #[error(transparent)]
    Content(#[from] ContentError),
}
