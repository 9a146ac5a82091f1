//! Locale descriptors.

use serde::{Deserialize, Serialize};

/// Locale key used for content stored at the collection root.
pub const ROOT_LOCALE: &str = "root";

/// Languages written right to left.
const RTL_LANGUAGES: &[&str] = &["ar", "dv", "fa", "he", "ks", "ku", "ps", "sd", "ug", "ur", "yi"];

/// Text direction of a language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Guess the direction from a BCP-47 tag by its primary subtag.
    #[must_use]
    pub fn for_lang(lang: &str) -> Self {
        let primary = lang.split(['-', '_']).next().unwrap_or(lang);
        if RTL_LANGUAGES
            .iter()
            .any(|rtl| rtl.eq_ignore_ascii_case(primary))
        {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }
}

/// A configured locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Label shown in language pickers.
    pub label: String,
    /// BCP-47 language tag.
    pub lang: String,
    /// Writing direction.
    pub dir: TextDirection,
}

/// The site's default locale.
///
/// `locale` is `None` when default content lives at the collection root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultLocale {
    pub locale: Option<String>,
    pub label: String,
    pub lang: String,
    pub dir: TextDirection,
}

impl DefaultLocale {
    /// Built-in default used when no locales are configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            locale: None,
            label: "English".to_owned(),
            lang: "en".to_owned(),
            dir: TextDirection::Ltr,
        }
    }

    /// Build from a configured locale entry.
    ///
    /// The `root` key maps to `locale: None`.
    #[must_use]
    pub fn from_entry(key: &str, locale: &LocaleConfig) -> Self {
        Self {
            locale: (key != ROOT_LOCALE).then(|| key.to_owned()),
            label: locale.label.clone(),
            lang: locale.lang.clone(),
            dir: locale.dir,
        }
    }
}

impl Default for DefaultLocale {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Locale entry as written in `quire.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LocaleRaw {
    pub label: Option<String>,
    pub lang: Option<String>,
    pub dir: Option<TextDirection>,
}

impl LocaleRaw {
    /// Fill in defaults: `lang` from the key (`en` for root), `dir` from `lang`.
    pub(crate) fn resolve(&self, key: &str) -> LocaleConfig {
        let lang = self.lang.clone().unwrap_or_else(|| {
            if key == ROOT_LOCALE {
                "en".to_owned()
            } else {
                key.to_owned()
            }
        });
        let dir = self.dir.unwrap_or_else(|| TextDirection::for_lang(&lang));
        let label = self.label.clone().unwrap_or_else(|| lang.clone());
        LocaleConfig { label, lang, dir }
    }
}
