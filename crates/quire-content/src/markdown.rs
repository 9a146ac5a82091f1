//! Markdown rendering with heading anchors.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::entry::{Heading, RenderedContent};

/// Render markdown to HTML, assigning anchor ids to every heading.
///
/// Explicit ids (`# Title {#custom}`) are kept; the rest are slugified from
/// the heading text and deduplicated with a `-n` suffix.
#[must_use]
pub fn render(markdown: &str) -> RenderedContent {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_FOOTNOTES;

    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, options).collect();
    let mut ids = HeadingIds::default();
    let mut headings = Vec::new();

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level;
        let explicit = id.as_ref().map(ToString::to_string);

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let text = text.trim().to_owned();
        let slug = ids.assign(explicit, &text);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug.clone()));
        }
        headings.push(Heading {
            depth: heading_level_to_num(level),
            slug,
            text,
        });
        i = end + 1;
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    RenderedContent {
        html: out,
        headings,
    }
}

/// Text of the first level-1 heading, if any.
#[must_use]
pub fn first_h1(headings: &[Heading]) -> Option<&str> {
    headings
        .iter()
        .find(|h| h.depth == 1)
        .map(|h| h.text.as_str())
        .filter(|t| !t.is_empty())
}

/// Tracks assigned anchor ids within one document.
#[derive(Default)]
struct HeadingIds {
    counts: HashMap<String, usize>,
}

impl HeadingIds {
    fn assign(&mut self, explicit: Option<String>, text: &str) -> String {
        if let Some(id) = explicit {
            self.counts.entry(id.clone()).or_default();
            return id;
        }
        let base = slugify(text);
        let count = self.counts.entry(base.clone()).or_default();
        let id = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        id
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases, keeps Unicode letters and digits, collapses whitespace,
/// dashes and underscores into single dashes and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }
    result
}

/// Convert a file stem (`setup-guide`, `my_page`) to title case.
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
