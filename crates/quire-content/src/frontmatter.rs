//! Frontmatter extraction.
//!
//! Markdown sources may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Getting started
//! sidebar:
//!   order: 1
//! ---
//! # Body
//! ```

use crate::entry::EntryData;

/// Split a source into its frontmatter YAML and body.
///
/// Returns `(None, source)` when the source has no fenced block or the
/// closing fence is missing.
pub(crate) fn split(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = strip_fence_line(source) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, source)
}

/// Strip an opening `---` line, returning what follows it.
fn strip_fence_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix("---")?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Parse frontmatter YAML into [`EntryData`].
///
/// Empty frontmatter yields defaults.
///
/// # Errors
///
/// Returns the YAML error message if the block is malformed or a field has
/// the wrong shape.
pub(crate) fn parse(yaml: &str) -> Result<EntryData, String> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(EntryData::default());
    }
    serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML: {e}"))
}
