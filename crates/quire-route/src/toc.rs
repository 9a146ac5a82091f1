//! Table of contents.
//!
//! The policy decides whether a page gets a table of contents and with
//! which heading window; a [`TocBuilder`] turns headings into the tree.

use quire_config::{SiteConfig, TocConfig, TocSetting};
use quire_content::{ContentEntry, Heading, Template};
use serde::Serialize;

use crate::i18n::TranslationLookup;

/// Anchor of the page title, used by the overview item.
pub const PAGE_TITLE_ID: &str = "_top";

/// Node of the table-of-contents tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub depth: u8,
    pub slug: String,
    pub text: String,
    pub children: Vec<TocItem>,
}

/// Options passed to a [`TocBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocOptions {
    pub min_heading_level: u8,
    pub max_heading_level: u8,
    /// Text of the leading overview item.
    pub title: String,
}

/// Table of contents of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocResult {
    pub min_heading_level: u8,
    pub max_heading_level: u8,
    pub items: Vec<TocItem>,
}

/// Builds a heading tree.
pub trait TocBuilder: Send + Sync {
    fn build(&self, headings: &[Heading], options: &TocOptions) -> Vec<TocItem>;
}

/// Nests each heading under the closest preceding heading of lower depth.
///
/// The tree starts with an overview item linking to the page title.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedToc;

impl TocBuilder for NestedToc {
    fn build(&self, headings: &[Heading], options: &TocOptions) -> Vec<TocItem> {
        let mut items = vec![TocItem {
            depth: 2,
            slug: PAGE_TITLE_ID.to_owned(),
            text: options.title.clone(),
            children: Vec::new(),
        }];

        let window = options.min_heading_level..=options.max_heading_level;
        for heading in headings.iter().filter(|h| window.contains(&h.depth)) {
            inject_child(
                &mut items,
                TocItem {
                    depth: heading.depth,
                    slug: heading.slug.clone(),
                    text: heading.text.clone(),
                    children: Vec::new(),
                },
            );
        }
        items
    }
}

fn inject_child(items: &mut Vec<TocItem>, item: TocItem) {
    match items.last_mut() {
        Some(last) if last.depth < item.depth => inject_child(&mut last.children, item),
        _ => items.push(item),
    }
}

/// Table of contents for an entry, if it should have one.
///
/// Splash pages never get one. Otherwise the entry's `tableOfContents`
/// overrides the site default.
pub fn table_of_contents(
    config: &SiteConfig,
    entry: &ContentEntry,
    lang: &str,
    headings: &[Heading],
    translations: &dyn TranslationLookup,
    builder: &dyn TocBuilder,
) -> Option<TocResult> {
    if entry.data.template == Template::Splash {
        return None;
    }

    let setting = entry
        .data
        .table_of_contents
        .as_ref()
        .unwrap_or(&config.table_of_contents);
    let TocSetting::Enabled(TocConfig {
        min_heading_level,
        max_heading_level,
    }) = *setting
    else {
        return None;
    };

    let options = TocOptions {
        min_heading_level,
        max_heading_level,
        title: translations.translate(lang, "tableOfContents.overview"),
    };
    Some(TocResult {
        min_heading_level,
        max_heading_level,
        items: builder.build(headings, &options),
    })
}
