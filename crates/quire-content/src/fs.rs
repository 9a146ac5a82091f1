//! Filesystem-backed content store.

use std::fs;
use std::path::{Path, PathBuf};

use quire_config::SiteConfig;

use crate::entry::{ContentEntry, DOCS_COLLECTION};
use crate::store::{ContentError, ContentStore};

const BACKEND: &str = "Fs";
const EXTENSIONS: &[&str] = &["md", "mdx"];

/// Content store reading the docs collection from a directory.
///
/// The directory is scanned once in [`FsContentStore::load`]; later edits
/// on disk are not picked up.
#[derive(Debug)]
pub struct FsContentStore {
    source_dir: PathBuf,
    entries: Vec<ContentEntry>,
}

impl FsContentStore {
    /// Scan `source_dir` and parse every markdown file.
    ///
    /// Hidden (`.`) and private (`_`) files and directories are skipped.
    /// Unreadable files are logged and skipped. A missing directory yields
    /// an empty store.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - absolute collection directory
    /// * `collection_path` - the same directory relative to the project root
    /// * `include_drafts` - keep entries with `draft: true`
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if a file has malformed frontmatter.
    pub fn load(
        source_dir: impl Into<PathBuf>,
        collection_path: &str,
        include_drafts: bool,
    ) -> Result<Self, ContentError> {
        let source_dir = source_dir.into();
        let mut files = Vec::new();
        if source_dir.is_dir() {
            scan_directory(&source_dir, "", &mut files);
        } else {
            tracing::warn!(path = %source_dir.display(), "Content directory does not exist");
        }

        let mut entries = Vec::with_capacity(files.len());
        for (rel_path, path) in files {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable content file");
                    continue;
                }
            };
            let entry = ContentEntry::parse(DOCS_COLLECTION, collection_path, &rel_path, &source)
                .map_err(|e| e.with_backend(BACKEND))?;
            if entry.data.draft && !include_drafts {
                tracing::debug!(id = %entry.id, "Skipping draft");
                continue;
            }
            entries.push(entry);
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::info!(
            count = entries.len(),
            dir = %source_dir.display(),
            "Loaded content entries"
        );
        Ok(Self {
            source_dir,
            entries,
        })
    }

    /// Load the docs collection described by a site configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if a file has malformed frontmatter.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ContentError> {
        Self::load(
            config.source_dir(),
            &config.collection_path(),
            config.include_drafts,
        )
    }

    /// Directory this store was loaded from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

impl ContentStore for FsContentStore {
    fn entries(&self, collection: &str) -> Result<&[ContentEntry], ContentError> {
        if collection == DOCS_COLLECTION {
            Ok(&self.entries)
        } else {
            Err(ContentError::unknown_collection(collection).with_backend(BACKEND))
        }
    }
}

/// Collect `(relative path, absolute path)` pairs for markdown files.
fn scan_directory(dir: &Path, prefix: &str, files: &mut Vec<(String, PathBuf)>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        let rel = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel, files);
        } else if path
            .extension()
            .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        {
            files.push((rel, path));
        }
    }
}
