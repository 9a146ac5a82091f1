//! Slug-to-route resolution.
//!
//! Every docs entry becomes one [`Route`]. The first slug segment selects
//! the locale when it matches a configured locale key; everything else
//! belongs to the root locale.
//!
//! On multilingual sites, pages of the default locale that have no
//! translation get a fallback route in every other locale:
//!
//! ```text
//! guides/intro        (root, en)
//! fr/guides/intro     (fallback: fr meta, en entry)
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use quire_config::{ROOT_LOCALE, SiteConfig, TextDirection};
use quire_content::ContentEntry;
use serde::Serialize;
use url::Url;

use crate::not_found::NOT_FOUND_ID;

/// Locale metadata attached to a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleMeta {
    pub lang: String,
    pub dir: TextDirection,
    /// Locale key; absent for the root locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl LocaleMeta {
    /// Metadata for a locale key (`None` = root).
    ///
    /// Unknown keys and an unconfigured root fall back to the default locale.
    #[must_use]
    pub fn for_locale(config: &SiteConfig, locale: Option<&str>) -> Self {
        let key = locale.unwrap_or(ROOT_LOCALE);
        match config.locales.get(key) {
            Some(entry) => Self {
                lang: entry.lang.clone(),
                dir: entry.dir,
                locale: locale.map(ToOwned::to_owned),
            },
            None => Self::default_locale(config),
        }
    }

    /// Metadata of the site's default locale.
    #[must_use]
    pub fn default_locale(config: &SiteConfig) -> Self {
        let default = &config.default_locale;
        Self {
            lang: default.lang.clone(),
            dir: default.dir,
            locale: default.locale.clone().filter(|l| l != ROOT_LOCALE),
        }
    }
}

/// A resolved page route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    /// URL slug without surrounding slashes.
    pub slug: String,
    pub entry: ContentEntry,
    /// Locale the route is served under.
    #[serde(flatten)]
    pub meta: LocaleMeta,
    /// Locale the entry was written in. Differs from `meta` on fallbacks.
    pub entry_meta: LocaleMeta,
    /// Route serves default-locale content for a missing translation.
    pub is_fallback: bool,
}

impl Route {
    /// Route for an entry, served in the locale its slug belongs to.
    #[must_use]
    pub fn from_entry(config: &SiteConfig, entry: ContentEntry) -> Self {
        let meta = LocaleMeta::for_locale(config, locale_of_slug(config, &entry.slug));
        Self {
            id: entry.id.clone(),
            slug: entry.slug.clone(),
            entry,
            entry_meta: meta.clone(),
            meta,
            is_fallback: false,
        }
    }
}

/// Locale key of a slug, if its first segment names a configured locale.
#[must_use]
pub fn locale_of_slug<'a>(config: &SiteConfig, slug: &'a str) -> Option<&'a str> {
    let first = slug.split('/').next().filter(|s| !s.is_empty())?;
    (first != ROOT_LOCALE && config.locales.contains_key(first)).then_some(first)
}

/// Move `slug` from locale `from` to locale `to`.
///
/// ```text
/// ("guides/intro", None, Some("fr")) -> "fr/guides/intro"
/// ("en", Some("en"), Some("fr"))      -> "fr"
/// ("fr/faq", Some("fr"), None)        -> "faq"
/// ```
#[must_use]
pub fn localized_slug(slug: &str, from: Option<&str>, to: Option<&str>) -> String {
    let rest = match from {
        Some(from) if slug == from => "",
        Some(from) => slug
            .strip_prefix(from)
            .and_then(|r| r.strip_prefix('/'))
            .unwrap_or(slug),
        None => slug,
    };
    match (to, rest.is_empty()) {
        (Some(to), true) => to.to_owned(),
        (Some(to), false) => format!("{to}/{rest}"),
        (None, _) => rest.to_owned(),
    }
}

/// Decoded pathname of a request URL.
///
/// `Url::path` keeps non-ASCII characters percent-encoded; slugs do not.
#[must_use]
pub fn request_path(url: &Url) -> Cow<'_, str> {
    percent_decode_str(url.path()).decode_utf8_lossy()
}

/// Route table for the docs collection.
pub struct Router {
    config: Arc<SiteConfig>,
    routes: Vec<Route>,
    by_slug: HashMap<String, usize>,
}

impl Router {
    /// Build routes for `entries`, adding locale fallbacks when the site is
    /// multilingual.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, entries: &[ContentEntry]) -> Self {
        let mut routes: Vec<Route> = entries
            .iter()
            .filter(|entry| entry.id != NOT_FOUND_ID)
            .map(|entry| Route::from_entry(&config, entry.clone()))
            .collect();

        if config.is_multilingual() {
            let fallbacks = fallback_routes(&config, &routes);
            tracing::debug!(count = fallbacks.len(), "Generated fallback routes");
            routes.extend(fallbacks);
        }

        let by_slug = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.slug.clone(), i))
            .collect();

        Self {
            config,
            routes,
            by_slug,
        }
    }

    /// All routes, entry routes first.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route serving a request pathname (e.g. `/docs/guides/intro/`).
    #[must_use]
    pub fn resolve(&self, pathname: &str) -> Option<&Route> {
        let slug = self.config.strip_base(pathname)?;
        let slug = slug.strip_suffix("index.html").unwrap_or(slug);
        let slug = slug.trim_end_matches('/').trim_end_matches(".html");
        let route = self.by_slug.get(slug).map(|&i| &self.routes[i]);
        tracing::debug!(pathname, slug, found = route.is_some(), "Resolved route");
        route
    }
}

/// Fallback routes for default-locale pages missing in other locales.
fn fallback_routes(config: &SiteConfig, routes: &[Route]) -> Vec<Route> {
    let default_locale = config.default_locale.locale.as_deref();
    let mut fallbacks = Vec::new();

    for key in config.locales.keys() {
        let target = (key != ROOT_LOCALE).then_some(key.as_str());
        if target == default_locale {
            continue;
        }
        let meta = LocaleMeta::for_locale(config, target);

        for route in routes
            .iter()
            .filter(|r| r.meta.locale.as_deref() == default_locale)
        {
            let slug = localized_slug(&route.slug, default_locale, target);
            if routes.iter().any(|r| r.slug == slug) {
                continue;
            }
            fallbacks.push(Route {
                id: localized_slug(&route.id, default_locale, target),
                slug,
                entry: route.entry.clone(),
                meta: meta.clone(),
                entry_meta: route.entry_meta.clone(),
                is_fallback: true,
            });
        }
    }
    fallbacks
}
