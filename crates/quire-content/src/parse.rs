//! Building entries from markdown sources.

use crate::entry::ContentEntry;
use crate::frontmatter;
use crate::markdown::{self, slugify, titlecase_from_slug};
use crate::store::{ContentError, ContentErrorKind};

impl ContentEntry {
    /// Build an entry from a markdown source.
    ///
    /// # Arguments
    ///
    /// * `collection` - collection name (e.g., "docs")
    /// * `collection_path` - project-relative collection root (e.g., "src/content/docs")
    /// * `rel_path` - `/`-separated path inside the collection (e.g., "guides/intro.md")
    /// * `source` - file contents
    ///
    /// Title resolution: frontmatter `title` > first H1 > title-cased file stem.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] with kind `InvalidFrontmatter` if the YAML
    /// block cannot be parsed.
    pub fn parse(
        collection: &str,
        collection_path: &str,
        rel_path: &str,
        source: &str,
    ) -> Result<Self, ContentError> {
        let file_path = join_path(collection_path, rel_path);
        let (yaml, body) = frontmatter::split(source);
        let mut data = match yaml {
            Some(yaml) => frontmatter::parse(yaml).map_err(|message| {
                ContentError::new(ContentErrorKind::InvalidFrontmatter)
                    .with_message(message)
                    .with_path(&file_path)
            })?,
            None => Default::default(),
        };

        let id = id_from_path(rel_path);
        if data.title.trim().is_empty() {
            let rendered = markdown::render(body);
            data.title = markdown::first_h1(&rendered.headings)
                .map_or_else(|| title_from_id(&id), ToOwned::to_owned);
        }

        Ok(Self {
            slug: slug_from_id(&id),
            id,
            collection: collection.to_owned(),
            data,
            body: body.to_owned(),
            file_path,
        })
    }
}

fn join_path(collection_path: &str, rel_path: &str) -> String {
    let root = collection_path.trim_end_matches('/');
    if root.is_empty() {
        rel_path.to_owned()
    } else {
        format!("{root}/{rel_path}")
    }
}

/// `guides/intro.md` -> `guides/intro`.
pub(crate) fn id_from_path(rel_path: &str) -> String {
    let rel_path = rel_path.trim_start_matches('/');
    match rel_path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.is_empty() => stem.to_owned(),
        _ => rel_path.to_owned(),
    }
}

/// `Guides/Getting Started` -> `guides/getting-started`, `guides/index` -> `guides`.
pub(crate) fn slug_from_id(id: &str) -> String {
    let mut segments: Vec<String> = id
        .split('/')
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

fn title_from_id(id: &str) -> String {
    let mut segments = id.rsplit('/');
    let stem = segments.next().unwrap_or(id);
    if stem != "index" {
        return titlecase_from_slug(stem);
    }
    match segments.next() {
        Some(parent) => titlecase_from_slug(parent),
        None => "Home".to_owned(),
    }
}
