//! Route resolution and per-page route data for Quire.
//!
//! Given a request URL, finds the docs entry serving it (or synthesizes a
//! not-found page) and computes the derived values a page template needs:
//! sidebar, pagination, table of contents, last-updated date, edit link
//! and site title.
//!
//! # Architecture
//!
//! - [`Router`] maps request paths to [`Route`]s, including locale fallbacks
//! - [`RouteDataAggregator`] turns a route into [`RouteData`]
//! - [`PageLoader`] ties both to a [`ContentStore`](quire_content::ContentStore)
//!
//! Collaborators sit behind traits ([`SidebarBuilder`], [`PaginationBuilder`],
//! [`TocBuilder`], [`TranslationLookup`], [`HistoryQuery`](quire_vcs::HistoryQuery))
//! so callers can swap implementations.

mod error;
mod i18n;
mod loader;
mod not_found;
mod pagination;
mod policy;
mod route_data;
mod routing;
mod sidebar;
mod title;
mod toc;

pub use error::RouteError;
pub use i18n::{TranslationLookup, Translations};
pub use loader::{PageData, PageLoader};
pub use not_found::{NOT_FOUND_ID, not_found_route};
pub use pagination::{PaginationBuilder, PrevNext, SidebarPagination};
pub use policy::{edit_url, last_updated};
pub use route_data::{LegacyLabels, RouteData, RouteDataAggregator, RouteProps};
pub use routing::{LocaleMeta, Route, Router, locale_of_slug, localized_slug, request_path};
pub use sidebar::{AutoSidebar, SidebarBuilder, SidebarEntry, SidebarLink};
pub use title::{site_title, site_title_href};
pub use toc::{NestedToc, PAGE_TITLE_ID, TocBuilder, TocItem, TocOptions, TocResult, table_of_contents};
