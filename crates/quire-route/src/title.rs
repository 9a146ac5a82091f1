//! Site title lookup.

use quire_config::SiteConfig;

/// Site title in `lang`, falling back to the default language's title.
#[must_use]
pub fn site_title<'a>(config: &'a SiteConfig, lang: &str) -> &'a str {
    config
        .title
        .get(lang)
        .or_else(|| config.title.get(&config.default_locale.lang))
        .map_or("", String::as_str)
}

/// Link target of the site title: the locale's home page, or the site root.
#[must_use]
pub fn site_title_href(config: &SiteConfig, locale: Option<&str>) -> String {
    config.format_path(locale.unwrap_or("/"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use quire_config::TrailingSlash;

    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default_with_base(Path::new("/project"));
        config.title = BTreeMap::from([
            ("en".to_owned(), "Docs".to_owned()),
            ("fr".to_owned(), "Documentation".to_owned()),
        ]);
        config
    }

    #[test]
    fn test_title_for_lang() {
        assert_eq!(site_title(&config(), "fr"), "Documentation");
    }

    #[test]
    fn test_title_falls_back_to_default_lang() {
        assert_eq!(site_title(&config(), "de"), "Docs");
    }

    #[test]
    fn test_href_root_and_locale() {
        let config = config();
        assert_eq!(site_title_href(&config, None), "/");
        assert_eq!(site_title_href(&config, Some("fr")), "/fr/");
    }

    #[test]
    fn test_href_honors_base_and_trailing_slash() {
        let mut config = config();
        config.base = "/docs/".to_owned();
        config.trailing_slash = TrailingSlash::Never;
        assert_eq!(site_title_href(&config, None), "/docs");
        assert_eq!(site_title_href(&config, Some("fr")), "/docs/fr");
    }
}
