//! UI string translations.
//!
//! Built-in English strings are overlaid by `[translations.<lang>]` tables
//! from `quire.toml`. Lookups fall back from the requested language to the
//! site's default language, then to English, then to the key itself.

use std::collections::{BTreeMap, HashMap};

use quire_config::SiteConfig;

const BUILTIN_LANG: &str = "en";

const BUILTIN_STRINGS: &[(&str, &str)] = &[
    ("skipLink.label", "Skip to content"),
    ("search.label", "Search"),
    ("search.ctrlKey", "Ctrl"),
    ("search.cancelLabel", "Cancel"),
    ("themeSelect.accessibleLabel", "Select theme"),
    ("themeSelect.dark", "Dark"),
    ("themeSelect.light", "Light"),
    ("themeSelect.auto", "Auto"),
    ("languageSelect.accessibleLabel", "Select language"),
    ("menuButton.accessibleLabel", "Menu"),
    ("sidebarNav.accessibleLabel", "Main"),
    ("tableOfContents.onThisPage", "On this page"),
    ("tableOfContents.overview", "Overview"),
    (
        "i18n.untranslatedContent",
        "This content is not available in your language yet.",
    ),
    ("page.editLink", "Edit page"),
    ("page.lastUpdated", "Last updated:"),
    ("page.previousLink", "Previous"),
    ("page.nextLink", "Next"),
    ("page.draft", "This content is a draft and will not be included in production builds."),
    (
        "404.text",
        "Page not found. Check the URL or try using the search bar.",
    ),
    ("aside.note", "Note"),
    ("aside.tip", "Tip"),
    ("aside.caution", "Caution"),
    ("aside.danger", "Danger"),
    ("fileTree.directory", "Directory"),
];

/// Translation lookup: `(lang, key) -> string`.
pub trait TranslationLookup: Send + Sync {
    /// Localized string for `key` in `lang`.
    fn translate(&self, lang: &str, key: &str) -> String;
}

/// Translation tables keyed by language.
#[derive(Debug, Clone)]
pub struct Translations {
    default_lang: String,
    tables: HashMap<String, BTreeMap<String, String>>,
}

impl Translations {
    /// Build from site configuration.
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        Self::from_tables(&config.default_locale.lang, config.translations.clone())
    }

    /// Build from explicit user tables.
    #[must_use]
    pub fn from_tables(
        default_lang: &str,
        user: BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        let mut tables: HashMap<String, BTreeMap<String, String>> = HashMap::new();
        tables.insert(
            BUILTIN_LANG.to_owned(),
            BUILTIN_STRINGS
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        );
        for (lang, strings) in user {
            tables.entry(lang).or_default().extend(strings);
        }
        Self {
            default_lang: default_lang.to_owned(),
            tables,
        }
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.tables
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl TranslationLookup for Translations {
    fn translate(&self, lang: &str, key: &str) -> String {
        [lang, self.default_lang.as_str(), BUILTIN_LANG]
            .into_iter()
            .find_map(|candidate| self.lookup(candidate, key))
            .unwrap_or(key)
            .to_owned()
    }
}
