//! Site configuration for Quire.
//!
//! Parses `quire.toml` with serde, resolves it into an immutable
//! [`SiteConfig`] and provides auto-discovery of the config file in parent
//! directories. The resolved value is loaded once per process and shared
//! read-only (typically as `Arc<SiteConfig>`).
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `edit_link.base_url`

mod expand;
mod locale;
mod path;
mod toc;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use locale::{DefaultLocale, LocaleConfig, ROOT_LOCALE, TextDirection};
pub use path::TrailingSlash;
pub use toc::{TocConfig, TocSetting};

use locale::LocaleRaw;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Default collection directory, relative to the project root.
const DEFAULT_DOCS_DIR: &str = "src/content/docs";

/// Title used when `site.title` is not configured.
const DEFAULT_TITLE: &str = "Documentation";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override draft inclusion.
    pub include_drafts: Option<bool>,
    /// Override the last-updated toggle.
    pub last_updated: Option<bool>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`edit_link.base_url`").
        field: String,
        /// Error message (e.g., "${`EDIT_BASE`} not set").
        message: String,
    },
}

/// Resolved, read-only site configuration.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Site title keyed by language tag. Always contains the default language.
    pub title: BTreeMap<String, String>,
    /// Base path the site is served under (e.g. `/` or `/docs`).
    pub base: String,
    /// Trailing slash policy for generated links.
    pub trailing_slash: TrailingSlash,
    /// Default locale descriptor.
    pub default_locale: DefaultLocale,
    /// Configured locales keyed by directory name (`root` for the collection root).
    pub locales: BTreeMap<String, LocaleConfig>,
    /// Whether previous/next links are shown by default.
    pub pagination: bool,
    /// Default table-of-contents setting.
    pub table_of_contents: TocSetting,
    /// Base URL for "edit this page" links.
    pub edit_link_base: Option<String>,
    /// Whether pages show a last-updated date by default.
    pub last_updated: bool,
    /// Include entries marked `draft: true`.
    pub include_drafts: bool,
    /// UI string overrides keyed by language, then by translation key.
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
    /// Project root (directory of `quire.toml`).
    pub project_root: PathBuf,
    /// Docs collection directory, relative to `project_root` when possible.
    pub docs_dir: PathBuf,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    site: SiteSection,
    docs: DocsSection,
    table_of_contents: Option<TocSetting>,
    edit_link: EditLinkSection,
    locales: BTreeMap<String, LocaleRaw>,
    translations: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteSection {
    title: Option<TitleRaw>,
    base: String,
    trailing_slash: TrailingSlash,
    default_locale: Option<String>,
    pagination: bool,
    last_updated: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: None,
            base: "/".to_owned(),
            trailing_slash: TrailingSlash::default(),
            default_locale: None,
            pagination: true,
            last_updated: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocsSection {
    source_dir: Option<String>,
    include_drafts: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditLinkSection {
    base_url: Option<String>,
}

/// `site.title` is either one string or a per-language table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TitleRaw {
    Single(String),
    PerLang(BTreeMap<String, String>),
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resolved configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse and resolve configuration text.
    ///
    /// Relative paths are resolved against `project_root`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, env expansion, or validation fails.
    pub fn from_toml_str(content: &str, project_root: &Path) -> Result<Self, ConfigError> {
        let mut raw: RawConfig = toml::from_str(content)?;
        raw.expand_env_vars()?;
        let config = Self::resolve(raw, project_root)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        let default_locale = DefaultLocale::builtin();
        Self {
            title: BTreeMap::from([(default_locale.lang.clone(), DEFAULT_TITLE.to_owned())]),
            base: "/".to_owned(),
            trailing_slash: TrailingSlash::default(),
            default_locale,
            locales: BTreeMap::new(),
            pagination: true,
            table_of_contents: TocSetting::default(),
            edit_link_base: None,
            last_updated: false,
            include_drafts: false,
            translations: BTreeMap::new(),
            project_root: base.to_path_buf(),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            config_path: None,
        }
    }

    /// Absolute (or cwd-relative) directory holding the docs collection.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(&self.docs_dir)
    }

    /// Collection root relative to the project root, with `/` separators.
    ///
    /// Used to build project-relative `file_path` values for entries.
    #[must_use]
    pub fn collection_path(&self) -> String {
        self.docs_dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether more than one locale is configured.
    #[must_use]
    pub fn is_multilingual(&self) -> bool {
        self.locales.len() > 1
    }

    /// Format a site-relative link honoring `base` and `trailing_slash`.
    #[must_use]
    pub fn format_path(&self, path: &str) -> String {
        path::format_path(&self.base, self.trailing_slash, path)
    }

    /// Strip `base` from a request pathname.
    ///
    /// Returns the remaining path without surrounding slashes, or `None`
    /// when the pathname is outside the site.
    #[must_use]
    pub fn strip_base<'a>(&self, pathname: &'a str) -> Option<&'a str> {
        path::strip_base(&self.base, pathname)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`SiteConfig::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_title()?;
        self.validate_toc()?;
        self.validate_edit_link()?;
        Ok(())
    }

    fn validate_title(&self) -> Result<(), ConfigError> {
        let lang = &self.default_locale.lang;
        match self.title.get(lang) {
            Some(title) => require_non_empty(title, "site.title"),
            None => Err(ConfigError::Validation(format!(
                "site.title must include an entry for the default language \"{lang}\""
            ))),
        }
    }

    fn validate_toc(&self) -> Result<(), ConfigError> {
        if let Some(config) = self.table_of_contents.config() {
            config
                .validate()
                .map_err(|e| ConfigError::Validation(format!("table_of_contents: {e}")))?;
        }
        Ok(())
    }

    fn validate_edit_link(&self) -> Result<(), ConfigError> {
        if let Some(ref base_url) = self.edit_link_base {
            require_non_empty(base_url, "edit_link.base_url")?;
            require_http_url(base_url, "edit_link.base_url")?;
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_dir = source_dir
                .strip_prefix(&self.project_root)
                .map_or_else(|_| source_dir.clone(), Path::to_path_buf);
        }
        if let Some(include_drafts) = settings.include_drafts {
            self.include_drafts = include_drafts;
        }
        if let Some(last_updated) = settings.last_updated {
            self.last_updated = last_updated;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Turn the raw file contents into a resolved configuration.
    fn resolve(raw: RawConfig, project_root: &Path) -> Result<Self, ConfigError> {
        let locales: BTreeMap<String, LocaleConfig> = raw
            .locales
            .iter()
            .map(|(key, locale)| (key.clone(), locale.resolve(key)))
            .collect();
        let default_locale = resolve_default_locale(&locales, raw.site.default_locale.as_deref())?;

        let title = match raw.site.title {
            Some(TitleRaw::Single(title)) => BTreeMap::from([(default_locale.lang.clone(), title)]),
            Some(TitleRaw::PerLang(titles)) => titles,
            None => BTreeMap::from([(default_locale.lang.clone(), DEFAULT_TITLE.to_owned())]),
        };

        Ok(Self {
            title,
            base: raw.site.base,
            trailing_slash: raw.site.trailing_slash,
            default_locale,
            locales,
            pagination: raw.site.pagination,
            table_of_contents: raw.table_of_contents.unwrap_or_default(),
            edit_link_base: raw.edit_link.base_url,
            last_updated: raw.site.last_updated,
            include_drafts: raw.docs.include_drafts,
            translations: raw.translations,
            project_root: project_root.to_path_buf(),
            docs_dir: PathBuf::from(raw.docs.source_dir.as_deref().unwrap_or(DEFAULT_DOCS_DIR)),
            config_path: None,
        })
    }
}

impl RawConfig {
    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;

        if let Some(ref url) = self.edit_link.base_url {
            self.edit_link.base_url = Some(expand::expand_env(url, "edit_link.base_url")?);
        }

        Ok(())
    }
}

/// Pick the default locale.
///
/// Precedence: explicit `site.default_locale`, then the `root` locale, then
/// the only configured locale. With no locales the built-in default is used.
fn resolve_default_locale(
    locales: &BTreeMap<String, LocaleConfig>,
    requested: Option<&str>,
) -> Result<DefaultLocale, ConfigError> {
    if locales.is_empty() {
        if let Some(key) = requested
            && key != ROOT_LOCALE
        {
            return Err(ConfigError::Validation(format!(
                "site.default_locale \"{key}\" has no matching [locales.{key}] section"
            )));
        }
        return Ok(DefaultLocale::builtin());
    }

    let key = match requested {
        Some(key) => key,
        None if locales.contains_key(ROOT_LOCALE) => ROOT_LOCALE,
        None if locales.len() == 1 => locales.keys().next().map_or(ROOT_LOCALE, String::as_str),
        None => {
            return Err(ConfigError::Validation(
                "site.default_locale is required when several locales are configured without a root locale".to_owned(),
            ));
        }
    };

    let locale = locales.get(key).ok_or_else(|| {
        ConfigError::Validation(format!(
            "site.default_locale \"{key}\" has no matching [locales.{key}] section"
        ))
    })?;

    Ok(DefaultLocale::from_entry(key, locale))
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(toml: &str) -> SiteConfig {
        SiteConfig::from_toml_str(toml, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default_with_base(Path::new("/test"));
        assert_eq!(config.title.get("en").map(String::as_str), Some("Documentation"));
        assert_eq!(config.base, "/");
        assert!(config.pagination);
        assert!(!config.last_updated);
        assert_eq!(config.table_of_contents, TocSetting::default());
        assert_eq!(config.default_locale, DefaultLocale::builtin());
        assert_eq!(
            config.source_dir(),
            PathBuf::from("/test/src/content/docs")
        );
        assert_eq!(config.collection_path(), "src/content/docs");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse("");
        assert_eq!(config.title.len(), 1);
        assert!(config.edit_link_base.is_none());
        assert!(!config.is_multilingual());
    }

    #[test]
    fn test_parse_single_title_keyed_by_default_lang() {
        let config = parse(
            r#"
[site]
title = "Mes Docs"
default_locale = "fr"

[locales.fr]
label = "Français"
"#,
        );
        assert_eq!(config.title.get("fr").map(String::as_str), Some("Mes Docs"));
        assert_eq!(config.default_locale.locale.as_deref(), Some("fr"));
        assert_eq!(config.default_locale.lang, "fr");
    }

    #[test]
    fn test_parse_title_map() {
        let config = parse(
            r#"
[site]
title = { en = "Docs", fr = "Docs FR" }
"#,
        );
        assert_eq!(config.title.get("fr").map(String::as_str), Some("Docs FR"));
    }

    #[test]
    fn test_title_map_requires_default_lang() {
        let err = SiteConfig::from_toml_str(
            r#"
[site]
title = { fr = "Docs FR" }
"#,
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("\"en\""));
    }

    #[test]
    fn test_parse_toc_disabled() {
        let config = parse("table_of_contents = false");
        assert_eq!(config.table_of_contents, TocSetting::Disabled);
    }

    #[test]
    fn test_parse_toc_window() {
        let config = parse(
            r"
[table_of_contents]
min_heading_level = 1
max_heading_level = 4
",
        );
        assert_eq!(
            config.table_of_contents,
            TocSetting::Enabled(TocConfig {
                min_heading_level: 1,
                max_heading_level: 4,
            })
        );
    }

    #[test]
    fn test_invalid_toc_window_rejected() {
        let err = SiteConfig::from_toml_str(
            r"
[table_of_contents]
min_heading_level = 5
max_heading_level = 2
",
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("table_of_contents"));
    }

    #[test]
    fn test_parse_edit_link() {
        let config = parse(
            r#"
[edit_link]
base_url = "https://github.com/org/repo/edit/main/"
"#,
        );
        assert_eq!(
            config.edit_link_base.as_deref(),
            Some("https://github.com/org/repo/edit/main/")
        );
    }

    #[test]
    fn test_edit_link_requires_http() {
        let err = SiteConfig::from_toml_str(
            r#"
[edit_link]
base_url = "github.com/org/repo"
"#,
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("edit_link.base_url"));
    }

    #[test]
    fn test_root_locale_is_default() {
        let config = parse(
            r#"
[locales.root]
label = "English"
lang = "en"

[locales.ar]
label = "العربية"
"#,
        );
        assert!(config.is_multilingual());
        assert!(config.default_locale.locale.is_none());
        assert_eq!(config.default_locale.lang, "en");
        assert_eq!(config.locales["ar"].dir, TextDirection::Rtl);
    }

    #[test]
    fn test_several_locales_without_root_need_default() {
        let err = SiteConfig::from_toml_str(
            r"
[locales.en]
[locales.fr]
",
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("default_locale"));
    }

    #[test]
    fn test_unknown_default_locale_rejected() {
        let err = SiteConfig::from_toml_str(
            r#"
[site]
default_locale = "de"

[locales.en]
"#,
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("\"de\""));
    }

    #[test]
    fn test_docs_dir_resolution() {
        let config = parse(
            r#"
[docs]
source_dir = "content"
include_drafts = true
"#,
        );
        assert_eq!(config.source_dir(), PathBuf::from("/project/content"));
        assert_eq!(config.collection_path(), "content");
        assert!(config.include_drafts);
    }

    #[test]
    fn test_translations_parsed() {
        let config = parse(
            r#"
[translations.fr]
"404.text" = "Page introuvable."
"#,
        );
        assert_eq!(
            config.translations["fr"]["404.text"],
            "Page introuvable."
        );
    }

    #[test]
    fn test_format_path_uses_base() {
        let config = parse(
            r#"
[site]
base = "/docs"
trailing_slash = "never"
"#,
        );
        assert_eq!(config.format_path("fr"), "/docs/fr");
        assert_eq!(config.format_path("/"), "/docs");
        assert_eq!(config.strip_base("/docs/guides/"), Some("guides"));
    }

    #[test]
    fn test_apply_cli_settings_source_dir_inside_project() {
        let mut config = SiteConfig::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/project/content/docs")),
            ..Default::default()
        });
        assert_eq!(config.docs_dir, PathBuf::from("content/docs"));
        assert_eq!(config.collection_path(), "content/docs");
    }

    #[test]
    fn test_apply_cli_settings_source_dir_outside_project() {
        let mut config = SiteConfig::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/docs")),
            ..Default::default()
        });
        assert_eq!(config.source_dir(), PathBuf::from("/elsewhere/docs"));
    }

    #[test]
    fn test_apply_cli_settings_toggles() {
        let mut config = SiteConfig::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            include_drafts: Some(true),
            last_updated: Some(true),
            ..Default::default()
        });
        assert!(config.include_drafts);
        assert!(config.last_updated);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = SiteConfig::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_dir, PathBuf::from("src/content/docs"));
        assert!(!config.include_drafts);
    }

    #[test]
    fn test_expand_env_vars_edit_link() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUIRE_TEST_REPO", "org/repo");
        }
        let config = parse(
            r#"
[edit_link]
base_url = "https://github.com/${QUIRE_TEST_REPO}/edit/main"
"#,
        );
        assert_eq!(
            config.edit_link_base.as_deref(),
            Some("https://github.com/org/repo/edit/main")
        );
        unsafe {
            std::env::remove_var("QUIRE_TEST_REPO");
        }
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = SiteConfig::load(Some(Path::new("/nonexistent/quire.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_sets_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        std::fs::write(&path, "[site]\ntitle = \"From File\"\n").unwrap();

        let config = SiteConfig::load(Some(&path), None).unwrap();

        assert_eq!(config.project_root, dir.path());
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.title["en"], "From File");
    }
}
