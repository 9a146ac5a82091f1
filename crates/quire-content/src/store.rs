//! Content store trait and error types.
//!
//! A [`ContentStore`] holds the entries of one or more collections. Entry
//! identifiers are collection-relative paths without extension:
//! - `"index"` - home page
//! - `"guides/intro"` - nested page
//! - `"404"` - user-authored not-found page

use std::path::PathBuf;

use crate::entry::{ContentEntry, RenderedContent};
use crate::markdown;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Entry or directory does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Frontmatter is malformed.
    InvalidFrontmatter,
    /// Store has no collection with this name.
    UnknownCollection,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            message: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an unknown-collection error.
    #[must_use]
    pub fn unknown_collection(name: &str) -> Self {
        Self::new(ContentErrorKind::UnknownCollection).with_message(format!("`{name}`"))
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ContentErrorKind::PermissionDenied,
            _ => ContentErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::PermissionDenied => "Permission denied",
            ContentErrorKind::InvalidFrontmatter => "Invalid frontmatter",
            ContentErrorKind::UnknownCollection => "Unknown collection",
            ContentErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        } else if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to content collections.
///
/// Implementations load entries up front; lookups never touch the backend
/// again except through [`ContentStore::render`].
pub trait ContentStore: Send + Sync {
    /// All entries of a collection, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the collection is unknown to this store.
    fn entries(&self, collection: &str) -> Result<&[ContentEntry], ContentError>;

    /// Look up one entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the collection is unknown to this store.
    fn get(&self, collection: &str, id: &str) -> Result<Option<ContentEntry>, ContentError> {
        Ok(self
            .entries(collection)?
            .iter()
            .find(|entry| entry.id == id)
            .cloned())
    }

    /// Render an entry body to HTML and collect its headings.
    fn render(&self, entry: &ContentEntry) -> RenderedContent {
        markdown::render(&entry.body)
    }
}
