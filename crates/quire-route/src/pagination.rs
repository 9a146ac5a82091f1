//! Previous/next page links.

use std::collections::BTreeMap;

use quire_content::{EntryData, PrevNextLink};
use serde::Serialize;

use crate::sidebar::{SidebarEntry, SidebarLink};

/// Previous and next links of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<SidebarLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<SidebarLink>,
}

/// Builds pagination links for a page.
pub trait PaginationBuilder: Send + Sync {
    /// Links around the current sidebar entry.
    fn build(&self, sidebar: &[SidebarEntry], enabled: bool, data: &EntryData) -> PrevNext;
}

/// Pagination following the flattened sidebar order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SidebarPagination;

impl PaginationBuilder for SidebarPagination {
    fn build(&self, sidebar: &[SidebarEntry], enabled: bool, data: &EntryData) -> PrevNext {
        let links = SidebarEntry::flatten(sidebar);
        let current = links.iter().position(|link| link.is_current);

        let prev = current
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| links.get(i))
            .map(|link| (*link).clone());
        let next = current
            .and_then(|i| links.get(i + 1))
            .map(|link| (*link).clone());

        PrevNext {
            prev: apply_link_config(prev, enabled, data.prev.as_ref()),
            next: apply_link_config(next, enabled, data.next.as_ref()),
        }
    }
}

/// Apply a frontmatter `prev`/`next` override to a sidebar neighbor.
fn apply_link_config(
    link: Option<SidebarLink>,
    enabled: bool,
    config: Option<&PrevNextLink>,
) -> Option<SidebarLink> {
    match (config, link) {
        (Some(PrevNextLink::Flag(false)), _) => None,
        (Some(PrevNextLink::Flag(true)), link) => link,
        (Some(PrevNextLink::Label(label)), Some(link)) => Some(SidebarLink {
            label: label.clone(),
            ..link
        }),
        (Some(PrevNextLink::Link { link: href, label }), Some(link)) => Some(SidebarLink {
            label: label.clone().unwrap_or(link.label),
            href: href.clone().unwrap_or(link.href),
            attrs: BTreeMap::new(),
            ..link
        }),
        (
            Some(PrevNextLink::Link {
                link: Some(href),
                label: Some(label),
            }),
            None,
        ) => Some(SidebarLink {
            label: label.clone(),
            href: href.clone(),
            is_current: false,
            badge: None,
            attrs: BTreeMap::new(),
        }),
        (_, link) => link.filter(|_| enabled),
    }
}
