//! Sidebar navigation.
//!
//! [`AutoSidebar`] derives the sidebar from the route table: one link per
//! page of the requested locale, grouped by directory.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use quire_config::SiteConfig;
use quire_content::Badge;
use quire_content::markdown::titlecase_from_slug;
use serde::Serialize;

use crate::routing::{Route, localized_slug};

/// Link entry of a sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarLink {
    pub label: String,
    pub href: String,
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub attrs: BTreeMap<String, String>,
}

/// Entry of the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    Link(SidebarLink),
    Group {
        label: String,
        entries: Vec<SidebarEntry>,
        collapsed: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        badge: Option<Badge>,
    },
}

impl SidebarEntry {
    /// Depth-first list of links.
    #[must_use]
    pub fn flatten(entries: &[Self]) -> Vec<&SidebarLink> {
        let mut links = Vec::new();
        for entry in entries {
            match entry {
                Self::Link(link) => links.push(link),
                Self::Group { entries, .. } => links.extend(Self::flatten(entries)),
            }
        }
        links
    }
}

/// Builds the sidebar for a request.
pub trait SidebarBuilder: Send + Sync {
    /// Sidebar for `pathname` in `locale` (`None` = root locale).
    fn build(&self, pathname: &str, locale: Option<&str>) -> Vec<SidebarEntry>;
}

/// Page item collected from a route.
#[derive(Clone, Debug)]
struct Item {
    /// Entry id relative to the locale root; index pages sit inside their directory.
    path: String,
    label: String,
    href: String,
    order: Option<i32>,
    badge: Option<Badge>,
    attrs: BTreeMap<String, String>,
}

/// Directory tree of items.
#[derive(Default)]
struct Dir {
    links: Vec<Item>,
    dirs: BTreeMap<String, Dir>,
}

impl Dir {
    fn insert(&mut self, segments: &[&str], item: Item) {
        match segments {
            [] | [_] => self.links.push(item),
            [dir, rest @ ..] => self
                .dirs
                .entry((*dir).to_owned())
                .or_default()
                .insert(rest, item),
        }
    }

    /// Lowest `sidebar.order` in this subtree.
    fn order(&self) -> Option<i32> {
        self.links
            .iter()
            .filter_map(|l| l.order)
            .chain(self.dirs.values().filter_map(Dir::order))
            .min()
    }
}

/// Sidebar generated from the route table.
pub struct AutoSidebar {
    config: Arc<SiteConfig>,
    /// Items per locale key, `None` for root.
    items: BTreeMap<Option<String>, Vec<Item>>,
}

impl AutoSidebar {
    /// Collect sidebar items from `routes`.
    ///
    /// Pages with `sidebar.hidden` or `draft` are left out.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, routes: &[Route]) -> Self {
        let mut items: BTreeMap<Option<String>, Vec<Item>> = BTreeMap::new();
        for route in routes {
            let data = &route.entry.data;
            if data.sidebar.hidden || data.draft {
                continue;
            }
            let locale = route.meta.locale.clone();
            let path = localized_slug(&route.id, locale.as_deref(), None);
            items.entry(locale).or_default().push(Item {
                path,
                label: data
                    .sidebar
                    .label
                    .clone()
                    .unwrap_or_else(|| data.title.clone()),
                href: config.format_path(&route.slug),
                order: data.sidebar.order,
                badge: data.sidebar.badge.clone(),
                attrs: data.sidebar.attrs.clone(),
            });
        }
        Self { config, items }
    }

    fn to_entries(&self, dir: Dir, current: &str) -> Vec<SidebarEntry> {
        enum Node {
            Link(Item),
            Group(String, Dir),
        }

        let mut nodes: Vec<(Option<i32>, String, Node)> = dir
            .links
            .into_iter()
            .map(|item| (item.order, sort_key(&item.path).to_owned(), Node::Link(item)))
            .chain(
                dir.dirs
                    .into_iter()
                    .map(|(name, sub)| (sub.order(), name.clone(), Node::Group(name, sub))),
            )
            .collect();
        nodes.sort_by(|a, b| compare_order(a.0, b.0).then_with(|| a.1.cmp(&b.1)));

        nodes
            .into_iter()
            .map(|(_, _, node)| match node {
                Node::Link(item) => SidebarEntry::Link(SidebarLink {
                    is_current: same_path(&item.href, current),
                    label: item.label,
                    href: item.href,
                    badge: item.badge,
                    attrs: item.attrs,
                }),
                Node::Group(name, sub) => SidebarEntry::Group {
                    label: titlecase_from_slug(&name),
                    entries: self.to_entries(sub, current),
                    collapsed: false,
                    badge: None,
                },
            })
            .collect()
    }
}

impl SidebarBuilder for AutoSidebar {
    fn build(&self, pathname: &str, locale: Option<&str>) -> Vec<SidebarEntry> {
        let Some(items) = self.items.get(&locale.map(ToOwned::to_owned)) else {
            return Vec::new();
        };

        let mut root = Dir::default();
        for item in items {
            let segments: Vec<&str> = item.path.split('/').filter(|s| !s.is_empty()).collect();
            root.insert(&segments, item.clone());
        }
        let current = self.config.format_path(pathname);
        self.to_entries(root, &current)
    }
}

/// Ordered items first, ascending; unordered last.
fn compare_order(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Index pages sort before their siblings.
fn sort_key(path: &str) -> &str {
    if path == "index" {
        ""
    } else {
        path.strip_suffix("/index").unwrap_or(path)
    }
}

/// Compare pathnames ignoring surrounding slashes and `index.html`.
fn same_path(a: &str, b: &str) -> bool {
    fn normalize(path: &str) -> &str {
        let path = path.strip_suffix("index.html").unwrap_or(path);
        path.trim_matches('/')
    }
    normalize(a) == normalize(b)
}
