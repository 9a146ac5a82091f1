//! Content entry types.
//!
//! A [`ContentEntry`] is one page of a collection: identity (`id`, `slug`,
//! `collection`), parsed frontmatter ([`EntryData`]), the markdown body and
//! the project-relative `file_path` used for edit links and history lookups.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use quire_config::TocSetting;
use serde::{Deserialize, Serialize, Serializer};

/// Name of the documentation collection.
pub const DOCS_COLLECTION: &str = "docs";

/// A single page of a content collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Stable identifier: path inside the collection without extension.
    pub id: String,
    /// URL slug without leading or trailing slash (`""` for the home page).
    pub slug: String,
    /// Collection name.
    pub collection: String,
    /// Parsed frontmatter.
    pub data: EntryData,
    /// Markdown body without frontmatter.
    pub body: String,
    /// Source location relative to the project root, `/`-separated.
    pub file_path: String,
}

/// Page layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Doc,
    /// Landing-page layout without sidebar or table of contents.
    Splash,
}

/// Frontmatter fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryData {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template: Template,
    /// Per-page table-of-contents override. `None` defers to site config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<TocSetting>,
    pub edit_url: EditUrl,
    /// Per-page last-updated override. `None` defers to site config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<LastUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    pub draft: bool,
    pub sidebar: SidebarOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PrevNextLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PrevNextLink>,
    /// Whether the page is indexed for search.
    pub pagefind: bool,
}

impl Default for EntryData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            template: Template::Doc,
            table_of_contents: None,
            edit_url: EditUrl::Unset,
            last_updated: None,
            hero: None,
            draft: false,
            sidebar: SidebarOptions::default(),
            prev: None,
            next: None,
            pagefind: true,
        }
    }
}

/// Edit link override.
///
/// Frontmatter accepts `editUrl: false`, `editUrl: true` (same as unset) or a
/// URL string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EditUrlRaw", into = "EditUrlRaw")]
pub enum EditUrl {
    /// Use the site-wide base URL, if any.
    #[default]
    Unset,
    /// Use this URL verbatim.
    Explicit(String),
    /// Never show an edit link.
    Disabled,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EditUrlRaw {
    Flag(bool),
    Url(String),
}

impl From<EditUrlRaw> for EditUrl {
    fn from(raw: EditUrlRaw) -> Self {
        match raw {
            EditUrlRaw::Flag(true) => Self::Unset,
            EditUrlRaw::Flag(false) => Self::Disabled,
            EditUrlRaw::Url(url) => Self::Explicit(url),
        }
    }
}

impl From<EditUrl> for EditUrlRaw {
    fn from(edit_url: EditUrl) -> Self {
        match edit_url {
            EditUrl::Unset => Self::Flag(true),
            EditUrl::Disabled => Self::Flag(false),
            EditUrl::Explicit(url) => Self::Url(url),
        }
    }
}

/// Last-updated override.
///
/// `lastUpdated: true|false` toggles the history lookup for this page; a
/// date (`2024-05-01` or RFC 3339) is used as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LastUpdatedRaw")]
pub enum LastUpdated {
    Flag(bool),
    Date(DateTime<Utc>),
}

impl LastUpdated {
    /// Whether this override asks for a last-updated value at all.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Date(_) => true,
        }
    }
}

impl Serialize for LastUpdated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(enabled) => serializer.serialize_bool(*enabled),
            Self::Date(date) => date.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LastUpdatedRaw {
    Flag(bool),
    Date(String),
}

impl TryFrom<LastUpdatedRaw> for LastUpdated {
    type Error = String;

    fn try_from(raw: LastUpdatedRaw) -> Result<Self, Self::Error> {
        match raw {
            LastUpdatedRaw::Flag(enabled) => Ok(Self::Flag(enabled)),
            LastUpdatedRaw::Date(value) => parse_date(&value)
                .map(Self::Date)
                .ok_or_else(|| format!("invalid lastUpdated date: {value}")),
        }
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Hero block for splash pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub actions: Vec<HeroAction>,
}

/// Call-to-action link in a hero block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroAction {
    pub text: String,
    pub link: String,
    #[serde(default = "default_action_variant")]
    pub variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn default_action_variant() -> String {
    "primary".to_owned()
}

/// Sidebar presentation options for an entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
    /// Sort key; lower first. Unordered entries sort after ordered ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Label overriding the page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Exclude from autogenerated sidebars.
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Extra HTML attributes for the sidebar link.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

/// Small label rendered next to a sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BadgeRaw")]
pub struct Badge {
    pub text: String,
    pub variant: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BadgeRaw {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        variant: Option<String>,
    },
}

impl From<BadgeRaw> for Badge {
    fn from(raw: BadgeRaw) -> Self {
        let (text, variant) = match raw {
            BadgeRaw::Text(text) => (text, None),
            BadgeRaw::Full { text, variant } => (text, variant),
        };
        Self {
            text,
            variant: variant.unwrap_or_else(|| "default".to_owned()),
        }
    }
}

/// Per-page previous/next link override.
///
/// - `false` hides the link, `true` shows it even when pagination is off
/// - a string replaces the label
/// - an object replaces the link and/or label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrevNextLink {
    Flag(bool),
    Label(String),
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

/// A heading found in an entry's body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1-6.
    pub depth: u8,
    /// Anchor id.
    pub slug: String,
    /// Plain text.
    pub text: String,
}

/// Output of rendering an entry body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedContent {
    pub html: String,
    pub headings: Vec<Heading>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn yaml(source: &str) -> EntryData {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn test_defaults() {
        let data = yaml("title: Guide");
        assert_eq!(data.title, "Guide");
        assert_eq!(data.template, Template::Doc);
        assert_eq!(data.edit_url, EditUrl::Unset);
        assert!(data.table_of_contents.is_none());
        assert!(data.last_updated.is_none());
        assert!(data.pagefind);
        assert!(!data.draft);
    }

    #[test]
    fn test_edit_url_variants() {
        assert_eq!(yaml("editUrl: false").edit_url, EditUrl::Disabled);
        assert_eq!(yaml("editUrl: true").edit_url, EditUrl::Unset);
        assert_eq!(
            yaml("editUrl: https://x/y").edit_url,
            EditUrl::Explicit("https://x/y".to_owned())
        );
    }

    #[test]
    fn test_toc_override() {
        assert_eq!(
            yaml("tableOfContents: false").table_of_contents,
            Some(TocSetting::Disabled)
        );
        let data = yaml("tableOfContents:\n  minHeadingLevel: 1\n  maxHeadingLevel: 4");
        let config = data.table_of_contents.unwrap();
        assert_eq!(config.config().unwrap().max_heading_level, 4);
    }

    #[test]
    fn test_last_updated_flag_and_dates() {
        assert_eq!(
            yaml("lastUpdated: false").last_updated,
            Some(LastUpdated::Flag(false))
        );

        let Some(LastUpdated::Date(date)) = yaml("lastUpdated: 2024-05-01").last_updated else {
            panic!("expected a date");
        };
        assert_eq!(date.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        let Some(LastUpdated::Date(date)) =
            yaml("lastUpdated: '2024-05-01T10:30:00+02:00'").last_updated
        else {
            panic!("expected a date");
        };
        assert_eq!(date.to_rfc3339(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn test_last_updated_invalid_date() {
        let result: Result<EntryData, _> = serde_yaml::from_str("lastUpdated: yesterday");
        assert!(result.is_err());
    }

    #[test]
    fn test_last_updated_is_requested() {
        assert!(!LastUpdated::Flag(false).is_requested());
        assert!(LastUpdated::Flag(true).is_requested());
        assert!(LastUpdated::Date(Utc::now()).is_requested());
    }

    #[test]
    fn test_splash_with_hero() {
        let data = yaml(
            "template: splash\nhero:\n  tagline: Welcome\n  actions:\n    - text: Start\n      link: /guides/",
        );
        assert_eq!(data.template, Template::Splash);
        let hero = data.hero.unwrap();
        assert_eq!(hero.tagline.as_deref(), Some("Welcome"));
        assert_eq!(hero.actions[0].variant, "primary");
    }

    #[test]
    fn test_sidebar_badge_forms() {
        let data = yaml("sidebar:\n  order: 2\n  badge: New");
        assert_eq!(data.sidebar.order, Some(2));
        assert_eq!(
            data.sidebar.badge,
            Some(Badge {
                text: "New".to_owned(),
                variant: "default".to_owned(),
            })
        );

        let data = yaml("sidebar:\n  badge:\n    text: Beta\n    variant: caution");
        assert_eq!(data.sidebar.badge.unwrap().variant, "caution");
    }

    #[test]
    fn test_prev_next_forms() {
        assert_eq!(yaml("prev: false").prev, Some(PrevNextLink::Flag(false)));
        assert_eq!(
            yaml("next: Continue").next,
            Some(PrevNextLink::Label("Continue".to_owned()))
        );
        assert_eq!(
            yaml("next:\n  link: /faq/\n  label: FAQ").next,
            Some(PrevNextLink::Link {
                link: Some("/faq/".to_owned()),
                label: Some("FAQ".to_owned()),
            })
        );
    }

    #[test]
    fn test_edit_url_serializes_like_frontmatter() {
        let data = EntryData {
            edit_url: EditUrl::Disabled,
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["editUrl"], serde_json::json!(false));
        assert!(json.get("lastUpdated").is_none());
    }
}
