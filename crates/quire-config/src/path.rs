//! Site-relative path formatting.

use serde::Deserialize;

/// How generated links treat trailing slashes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Always end page links with `/`.
    Always,
    /// Never end page links with `/` (the site root stays `/`).
    Never,
    /// Accept both forms on input; emit directory-style links.
    #[default]
    Ignore,
}

/// Join `base` and `path` into an absolute site path.
///
/// Examples with `TrailingSlash::Ignore`:
/// - `("/", "")` -> `"/"`
/// - `("/", "fr")` -> `"/fr/"`
/// - `("/docs", "/guides/intro/")` -> `"/docs/guides/intro/"`
pub(crate) fn format_path(base: &str, trailing_slash: TrailingSlash, path: &str) -> String {
    let segments: Vec<&str> = base
        .split('/')
        .chain(path.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_owned();
    }

    let joined = segments.join("/");
    match trailing_slash {
        TrailingSlash::Never => format!("/{joined}"),
        TrailingSlash::Always | TrailingSlash::Ignore => format!("/{joined}/"),
    }
}

/// Strip `base` from the start of a request pathname.
///
/// Returns the remainder without leading or trailing slashes, or `None`
/// when the pathname lies outside `base`.
pub(crate) fn strip_base<'a>(base: &str, pathname: &'a str) -> Option<&'a str> {
    let base = base.trim_matches('/');
    let pathname = pathname.trim_matches('/');
    if base.is_empty() {
        return Some(pathname);
    }
    if pathname == base {
        return Some("");
    }
    pathname
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
}
