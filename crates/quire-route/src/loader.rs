//! Page loading.
//!
//! [`PageLoader`] wires the router, content store and aggregator: it takes
//! a request URL and returns everything needed to render the page.

use std::sync::Arc;

use quire_config::SiteConfig;
use quire_content::{ContentStore, DOCS_COLLECTION};
use quire_vcs::HistoryQuery;
use serde::Serialize;
use url::Url;

use crate::error::RouteError;
use crate::i18n::Translations;
use crate::not_found::not_found_route;
use crate::route_data::{RouteData, RouteDataAggregator, RouteProps};
use crate::routing::{Route, Router, request_path};
use crate::sidebar::AutoSidebar;

/// Origin used to resolve path-only request URLs.
const LOCAL_ORIGIN: &str = "http://localhost";

/// A loaded page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub route: RouteData,
    /// Rendered body.
    pub html: String,
    /// No route matched; `route` holds the not-found page.
    pub not_found: bool,
}

/// Resolves request URLs to [`PageData`].
pub struct PageLoader {
    store: Arc<dyn ContentStore>,
    router: Router,
    translations: Arc<Translations>,
    aggregator: RouteDataAggregator,
}

impl PageLoader {
    /// Build routes and the default sidebar from the store's docs collection.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Content`] if the docs collection cannot be read.
    pub fn new(
        config: Arc<SiteConfig>,
        store: Arc<dyn ContentStore>,
        history: Arc<dyn HistoryQuery>,
    ) -> Result<Self, RouteError> {
        let router = Router::new(Arc::clone(&config), store.entries(DOCS_COLLECTION)?);
        let translations = Arc::new(Translations::new(&config));
        let sidebar = Arc::new(AutoSidebar::new(Arc::clone(&config), router.routes()));
        let aggregator = RouteDataAggregator::new(
            config,
            Arc::clone(&translations) as _,
            sidebar,
            history,
        );

        tracing::info!(routes = router.routes().len(), "Page loader ready");
        Ok(Self {
            store,
            router,
            translations,
            aggregator,
        })
    }

    /// Replace the aggregator, e.g. to plug in a custom sidebar.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: RouteDataAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// All routes.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        self.router.routes()
    }

    /// Load the page for a request URL.
    ///
    /// Accepts absolute URLs and site paths (`/guides/intro/`). Unknown
    /// paths load the not-found page with `not_found` set.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if the URL is malformed or the page's edit
    /// link is invalid.
    pub fn load(&self, url: &str) -> Result<PageData, RouteError> {
        let url = parse_request_url(url)?;

        let path = request_path(&url);

        let (route, not_found) = match self.router.resolve(&path) {
            Some(route) => (route.clone(), false),
            None => {
                tracing::debug!(path = %path, "No route, serving not-found page");
                let config = self.aggregator.config();
                (
                    not_found_route(config, self.store.as_ref(), self.translations.as_ref()),
                    true,
                )
            }
        };

        let rendered = self.store.render(&route.entry);
        let props = RouteProps {
            route,
            headings: rendered.headings,
        };
        let route = self.aggregator.build(props, &url)?;

        Ok(PageData {
            route,
            html: rendered.html,
            not_found,
        })
    }
}

fn parse_request_url(url: &str) -> Result<Url, RouteError> {
    let err = |source| RouteError::InvalidRequestUrl {
        url: url.to_owned(),
        source,
    };
    match Url::parse(url) {
        Ok(parsed) => Ok(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LOCAL_ORIGIN)
            .and_then(|origin| origin.join(url))
            .map_err(err),
        Err(e) => Err(err(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use quire_content::MockContentStore;
    use quire_vcs::NoHistory;

    use super::*;
    use crate::sidebar::SidebarEntry;

    fn loader(store: MockContentStore) -> PageLoader {
        let config = Arc::new(SiteConfig::default_with_base(Path::new("/project")));
        PageLoader::new(config, Arc::new(store), Arc::new(NoHistory)).unwrap()
    }

    #[test]
    fn test_parse_request_url() {
        assert_eq!(
            parse_request_url("/guides/intro/").unwrap().path(),
            "/guides/intro/"
        );
        assert_eq!(
            parse_request_url("https://example.com/a?b=1").unwrap().path(),
            "/a"
        );
        assert_eq!(parse_request_url("guide").unwrap().path(), "/guide");
        assert!(parse_request_url("http://[::1").is_err());
    }

    #[test]
    fn test_load_existing_page() {
        let loader = loader(
            MockContentStore::new()
                .with_markdown("index.md", "# Home")
                .with_markdown("guide.md", "# Guide\n\n## Install\n"),
        );
        let page = loader.load("/guide/").unwrap();
        assert!(!page.not_found);
        assert_eq!(page.route.route.id, "guide");
        assert!(page.html.contains(r#"<h2 id="install">"#));
        assert_eq!(page.route.headings.len(), 2);
        assert_eq!(page.route.pagination.prev.unwrap().label, "Home");
    }

    #[test]
    fn test_load_missing_page_uses_fallback_404() {
        let loader = loader(MockContentStore::new().with_markdown("index.md", "# Home"));
        let page = loader.load("/nope/").unwrap();
        assert!(page.not_found);
        assert_eq!(page.route.route.id, "404");
        assert!(!page.route.has_sidebar);
        assert!(page.route.toc.is_none());
        assert!(page.route.edit_url.is_none());
        assert_eq!(page.html, "");
    }

    #[test]
    fn test_load_missing_page_uses_user_404() {
        let loader = loader(
            MockContentStore::new().with_markdown("404.md", "---\ntitle: Lost\n---\n## Help\n"),
        );
        let page = loader.load("/nope/").unwrap();
        assert!(page.not_found);
        assert_eq!(page.route.route.entry.data.title, "Lost");
        assert!(page.html.contains("Help"));
    }

    #[test]
    fn test_load_non_ascii_slug() {
        let loader = loader(
            MockContentStore::new()
                .with_markdown("index.md", "# Home")
                .with_markdown("café.md", "# Café"),
        );
        for url in ["/café/", "http://localhost/caf%C3%A9/"] {
            let page = loader.load(url).unwrap();
            assert!(!page.not_found, "{url}");
            assert_eq!(page.route.route.id, "café");

            let current: Vec<&str> = SidebarEntry::flatten(&page.route.sidebar)
                .into_iter()
                .filter(|link| link.is_current)
                .map(|link| link.label.as_str())
                .collect();
            assert_eq!(current, ["Café"]);
        }
    }

    #[test]
    fn test_user_404_not_served_as_page() {
        let loader = loader(MockContentStore::new().with_markdown("404.md", "# Lost"));
        assert!(loader.routes().is_empty());
        assert!(loader.load("/404/").unwrap().not_found);
    }
}
