//! Last-updated and edit-link policies.

use std::path::Path;

use chrono::{DateTime, Utc};
use quire_config::SiteConfig;
use quire_content::{ContentEntry, EditUrl, LastUpdated};
use quire_vcs::HistoryQuery;
use url::Url;

use crate::error::RouteError;

/// Last-updated date of an entry.
///
/// The entry's `lastUpdated` takes precedence over the site toggle. An
/// explicit date is used as-is; otherwise history is queried, and a failed
/// query yields `None`.
pub fn last_updated(
    config: &SiteConfig,
    entry: &ContentEntry,
    history: &dyn HistoryQuery,
) -> Option<DateTime<Utc>> {
    let requested = entry
        .data
        .last_updated
        .map_or(config.last_updated, |value| value.is_requested());
    if !requested {
        return None;
    }
    if let Some(LastUpdated::Date(date)) = entry.data.last_updated {
        return Some(date);
    }

    match history.newest_commit_date(Path::new(&entry.file_path)) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(file = %entry.file_path, error = %e, "No last-updated date");
            None
        }
    }
}

/// Edit link of an entry.
///
/// `editUrl: false` always wins. A frontmatter URL is used verbatim;
/// otherwise the site base URL is joined with the entry's file path.
///
/// # Errors
///
/// Returns [`RouteError::InvalidEditUrl`] if the resulting string is not an
/// absolute URL.
pub fn edit_url(config: &SiteConfig, entry: &ContentEntry) -> Result<Option<Url>, RouteError> {
    let target = match &entry.data.edit_url {
        EditUrl::Disabled => return Ok(None),
        EditUrl::Explicit(url) if !url.is_empty() => url.clone(),
        EditUrl::Explicit(_) | EditUrl::Unset => match config.edit_link_base.as_deref() {
            Some(base) if !base.is_empty() => {
                format!("{}{}", ensure_trailing_slash(base), entry.file_path)
            }
            _ => return Ok(None),
        },
    };

    Url::parse(&target)
        .map(Some)
        .map_err(|source| RouteError::InvalidEditUrl {
            url: target,
            source,
        })
}

fn ensure_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_owned()
    } else {
        format!("{base}/")
    }
}
