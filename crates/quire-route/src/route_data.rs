//! Per-page route data.
//!
//! [`RouteDataAggregator`] merges a [`Route`] with site configuration and
//! the request URL into [`RouteData`], the record page templates consume.
//!
//! ```text
//! Route + headings + URL
//!   -> sidebar        (SidebarBuilder)
//!   -> pagination     (PaginationBuilder)
//!   -> toc            (table_of_contents + TocBuilder)
//!   -> lastUpdated    (last_updated + HistoryQuery)
//!   -> editUrl        (edit_url)
//!   -> siteTitle, siteTitleHref
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quire_config::SiteConfig;
use quire_content::{Heading, Template};
use quire_vcs::HistoryQuery;
use serde::{Serialize, Serializer};
use url::Url;

use crate::error::RouteError;
use crate::i18n::TranslationLookup;
use crate::pagination::{PaginationBuilder, PrevNext, SidebarPagination};
use crate::policy::{edit_url, last_updated};
use crate::routing::{Route, request_path};
use crate::sidebar::{SidebarBuilder, SidebarEntry};
use crate::title::{site_title, site_title_href};
use crate::toc::{NestedToc, TocBuilder, TocResult, table_of_contents};

/// Deprecated `labels` field.
///
/// Kept for consumers that still read it; always serializes as `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LegacyLabels;

impl Serialize for LegacyLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        serializer.serialize_map(Some(0))?.end()
    }
}

/// Input of the aggregator: a route and its rendered headings.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteProps {
    pub route: Route,
    pub headings: Vec<Heading>,
}

/// Everything a page template needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    #[serde(flatten)]
    pub route: Route,
    pub site_title: String,
    pub site_title_href: String,
    pub headings: Vec<Heading>,
    pub sidebar: Vec<SidebarEntry>,
    pub has_sidebar: bool,
    pub pagination: PrevNext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<TocResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<Url>,
    pub labels: LegacyLabels,
}

/// Builds [`RouteData`] from routes.
pub struct RouteDataAggregator {
    config: Arc<SiteConfig>,
    translations: Arc<dyn TranslationLookup>,
    sidebar: Arc<dyn SidebarBuilder>,
    pagination: Arc<dyn PaginationBuilder>,
    toc: Arc<dyn TocBuilder>,
    history: Arc<dyn HistoryQuery>,
}

impl RouteDataAggregator {
    /// Create an aggregator with sidebar-order pagination and nested ToC.
    #[must_use]
    pub fn new(
        config: Arc<SiteConfig>,
        translations: Arc<dyn TranslationLookup>,
        sidebar: Arc<dyn SidebarBuilder>,
        history: Arc<dyn HistoryQuery>,
    ) -> Self {
        Self {
            config,
            translations,
            sidebar,
            pagination: Arc::new(SidebarPagination),
            toc: Arc::new(NestedToc),
            history,
        }
    }

    /// Replace the pagination builder.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Arc<dyn PaginationBuilder>) -> Self {
        self.pagination = pagination;
        self
    }

    /// Replace the heading-tree builder.
    #[must_use]
    pub fn with_toc(mut self, toc: Arc<dyn TocBuilder>) -> Self {
        self.toc = toc;
        self
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &Arc<SiteConfig> {
        &self.config
    }

    /// Aggregate route data for a request.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEditUrl`] if the page's edit link is
    /// malformed.
    pub fn build(&self, props: RouteProps, url: &Url) -> Result<RouteData, RouteError> {
        let RouteProps { route, headings } = props;
        let config = self.config.as_ref();
        let entry = &route.entry;
        let lang = route.meta.lang.as_str();
        let locale = route.meta.locale.as_deref();

        let sidebar = self.sidebar.build(&request_path(url), locale);
        let pagination = self
            .pagination
            .build(&sidebar, config.pagination, &entry.data);
        let toc = table_of_contents(
            config,
            entry,
            lang,
            &headings,
            self.translations.as_ref(),
            self.toc.as_ref(),
        );
        let last_updated = last_updated(config, entry, self.history.as_ref());
        let edit_url = edit_url(config, entry)?;

        tracing::debug!(
            id = %route.id,
            toc = toc.is_some(),
            last_updated = last_updated.is_some(),
            edit_url = edit_url.is_some(),
            "Built route data"
        );

        Ok(RouteData {
            site_title: site_title(config, lang).to_owned(),
            site_title_href: site_title_href(config, locale),
            has_sidebar: entry.data.template != Template::Splash,
            headings,
            sidebar,
            pagination,
            toc,
            last_updated,
            edit_url,
            labels: LegacyLabels,
            route,
        })
    }
}
