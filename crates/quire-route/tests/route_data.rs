//! End-to-end page loading over a docs tree on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use quire_config::SiteConfig;
use quire_content::{ContentStore, FsContentStore, MockContentStore};
use quire_route::{PageLoader, RouteError, SidebarEntry};
use quire_vcs::{HistoryQuery, NoHistory, VcsError};
use tempfile::TempDir;

/// History stub returning a fixed date and counting queries.
struct FixedHistory {
    date: Option<DateTime<Utc>>,
    calls: AtomicUsize,
}

impl FixedHistory {
    fn new(date: Option<DateTime<Utc>>) -> Self {
        Self {
            date,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistoryQuery for FixedHistory {
    fn newest_commit_date(&self, path: &Path) -> Result<DateTime<Utc>, VcsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.date
            .ok_or_else(|| VcsError::NotTracked(path.to_path_buf()))
    }
}

struct Site {
    dir: TempDir,
}

impl Site {
    fn new(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("quire.toml"), config).unwrap();
        Self { dir }
    }

    fn page(self, rel_path: &str, source: &str) -> Self {
        let path = self.docs_dir().join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
        self
    }

    fn docs_dir(&self) -> PathBuf {
        self.dir.path().join("src/content/docs")
    }

    fn config(&self) -> Arc<SiteConfig> {
        let path = self.dir.path().join("quire.toml");
        Arc::new(SiteConfig::load(Some(&path), None).unwrap())
    }

    fn loader(&self, history: Arc<dyn HistoryQuery>) -> PageLoader {
        let config = self.config();
        let store = FsContentStore::from_config(&config).unwrap();
        PageLoader::new(config, Arc::new(store), history).unwrap()
    }
}

const BASIC_CONFIG: &str = r#"
[site]
title = "Handbook"

[edit_link]
base_url = "https://git.example.com/handbook/edit/main"
"#;

fn basic_site() -> Site {
    Site::new(BASIC_CONFIG)
        .page("index.md", "# Welcome\n")
        .page(
            "guides/intro.md",
            "---\ntitle: Intro\n---\n## Setup\n\n### Linux\n\n### macOS\n\n## Usage\n\n#### Deep\n",
        )
        .page("guides/setup.md", "# Setup\n")
}

#[test]
fn test_doc_page_end_to_end() {
    let site = basic_site();
    let loader = site.loader(Arc::new(NoHistory));

    let page = loader.load("/guides/intro/").unwrap();
    assert!(!page.not_found);

    let data = page.route;
    assert_eq!(data.route.id, "guides/intro");
    assert_eq!(data.site_title, "Handbook");
    assert_eq!(data.site_title_href, "/");
    assert!(data.has_sidebar);

    let labels: Vec<&str> = SidebarEntry::flatten(&data.sidebar)
        .iter()
        .map(|link| link.label.as_str())
        .collect();
    assert_eq!(labels, ["Welcome", "Intro", "Setup"]);

    assert_eq!(data.pagination.prev.unwrap().label, "Welcome");
    assert_eq!(data.pagination.next.unwrap().href, "/guides/setup/");

    assert_eq!(
        data.edit_url.unwrap().as_str(),
        "https://git.example.com/handbook/edit/main/src/content/docs/guides/intro.md"
    );
    assert!(data.last_updated.is_none());
}

#[test]
fn test_toc_window_and_overview() {
    let site = basic_site();
    let loader = site.loader(Arc::new(NoHistory));

    let toc = loader.load("/guides/intro/").unwrap().route.toc.unwrap();
    assert_eq!(toc.min_heading_level, 2);
    assert_eq!(toc.max_heading_level, 3);

    let top: Vec<&str> = toc.items.iter().map(|item| item.slug.as_str()).collect();
    assert_eq!(top, ["_top", "setup", "usage"]);
    assert_eq!(toc.items[0].text, "Overview");

    let nested: Vec<&str> = toc.items[1]
        .children
        .iter()
        .map(|item| item.slug.as_str())
        .collect();
    assert_eq!(nested, ["linux", "macos"]);
    assert!(toc.items[2].children.is_empty());
}

#[test]
fn test_frontmatter_edit_url_wins() {
    let site = basic_site().page(
        "custom.md",
        "---\ntitle: Custom\neditUrl: https://elsewhere.example.com/custom.md\n---\n",
    );
    let loader = site.loader(Arc::new(NoHistory));

    let data = loader.load("/custom/").unwrap().route;
    assert_eq!(
        data.edit_url.unwrap().as_str(),
        "https://elsewhere.example.com/custom.md"
    );
}

#[test]
fn test_malformed_frontmatter_edit_url_is_an_error() {
    let site = basic_site().page("broken.md", "---\ntitle: Broken\neditUrl: \"not a url\"\n---\n");
    let loader = site.loader(Arc::new(NoHistory));

    let err = loader.load("/broken/").unwrap_err();
    assert!(matches!(err, RouteError::InvalidEditUrl { .. }));
    assert!(loader.load("/guides/setup/").is_ok());
}

#[test]
fn test_splash_page_has_no_sidebar_or_toc() {
    let site = Site::new(BASIC_CONFIG).page(
        "index.md",
        "---\ntitle: Home\ntemplate: splash\n---\n## Features\n",
    );
    let loader = site.loader(Arc::new(NoHistory));

    let data = loader.load("/").unwrap().route;
    assert!(!data.has_sidebar);
    assert!(data.toc.is_none());
    assert_eq!(data.headings.len(), 1);
}

#[test]
fn test_unknown_path_serves_builtin_not_found() {
    let site = basic_site();
    let loader = site.loader(Arc::new(NoHistory));

    let page = loader.load("/missing/page/").unwrap();
    assert!(page.not_found);

    let data = page.route;
    assert_eq!(data.route.id, "404");
    assert!(!data.has_sidebar);
    assert!(data.toc.is_none());
    assert!(data.edit_url.is_none());
    assert_eq!(
        data.route.entry.data.hero.unwrap().tagline.as_deref(),
        Some("Page not found. Check the URL or try using the search bar.")
    );
}

#[test]
fn test_frontmatter_date_skips_history() {
    let site = basic_site().page(
        "dated.md",
        "---\ntitle: Dated\nlastUpdated: 2024-03-01\n---\n",
    );
    let history = Arc::new(FixedHistory::new(Some(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    )));
    let loader = site.loader(Arc::clone(&history) as _);

    let data = loader.load("/dated/").unwrap().route;
    assert_eq!(
        data.last_updated,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(history.calls(), 0);
}

#[test]
fn test_history_not_queried_when_disabled() {
    let site = basic_site();
    let history = Arc::new(FixedHistory::new(None));
    let loader = site.loader(Arc::clone(&history) as _);

    loader.load("/guides/setup/").unwrap();
    assert_eq!(history.calls(), 0);
}

#[test]
fn test_history_used_when_enabled() {
    let site = Site::new("[site]\nlast_updated = true\n").page("index.md", "# Home\n");
    let date = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();
    let history = Arc::new(FixedHistory::new(Some(date)));
    let loader = site.loader(Arc::clone(&history) as _);

    assert_eq!(loader.load("/").unwrap().route.last_updated, Some(date));
    assert_eq!(history.calls(), 1);
}

#[test]
fn test_history_failure_is_silent() {
    let site = Site::new("[site]\nlast_updated = true\n").page("index.md", "# Home\n");
    let history = Arc::new(FixedHistory::new(None));
    let loader = site.loader(Arc::clone(&history) as _);

    assert!(loader.load("/").unwrap().route.last_updated.is_none());
    assert_eq!(history.calls(), 1);
}

#[test]
fn test_locale_fallback_route() {
    let site = Site::new(
        r#"
[site]
title = { en = "Docs", fr = "Documentation" }

[locales.root]
label = "English"
lang = "en"

[locales.fr]
label = "Français"
"#,
    )
    .page("index.md", "# Home\n")
    .page("guide.md", "# Guide\n")
    .page("fr/index.md", "# Accueil\n");
    let loader = site.loader(Arc::new(NoHistory));

    let data = loader.load("/fr/guide/").unwrap().route;
    assert!(data.route.is_fallback);
    assert_eq!(data.route.id, "fr/guide");
    assert_eq!(data.route.entry.id, "guide");
    assert_eq!(data.route.meta.lang, "fr");
    assert_eq!(data.route.entry_meta.lang, "en");
    assert_eq!(data.site_title, "Documentation");
    assert_eq!(data.site_title_href, "/fr/");

    let translated = loader.load("/fr/").unwrap().route;
    assert!(!translated.route.is_fallback);
    assert_eq!(translated.route.entry.data.title, "Accueil");
}

#[test]
fn test_drafts_excluded_from_routes() {
    let site = basic_site().page("wip.md", "---\ntitle: WIP\ndraft: true\n---\n");
    let loader = site.loader(Arc::new(NoHistory));

    assert!(loader.load("/wip/").unwrap().not_found);
    assert!(loader.routes().iter().all(|route| route.id != "wip"));
}

#[test]
fn test_repeated_loads_are_identical() {
    let site = basic_site();
    let loader = site.loader(Arc::new(NoHistory));

    let first = serde_json::to_value(loader.load("/guides/intro/").unwrap()).unwrap();
    let second = serde_json::to_value(loader.load("/guides/intro/").unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first["route"]["labels"], serde_json::json!({}));
}

#[test]
fn test_mock_store_user_not_found_page() {
    let store = MockContentStore::new()
        .with_markdown("index.md", "# Home")
        .with_markdown("404.md", "---\ntitle: Nothing here\n---\nGo back home.");
    assert!(store.get("docs", "404").unwrap().is_some());

    let config = Arc::new(SiteConfig::default_with_base(Path::new("/project")));
    let loader = PageLoader::new(config, Arc::new(store), Arc::new(NoHistory)).unwrap();

    let page = loader.load("https://docs.example.com/gone").unwrap();
    assert!(page.not_found);
    assert_eq!(page.route.route.entry.data.title, "Nothing here");
    assert!(page.html.contains("Go back home."));
}

#[test]
fn test_non_ascii_page_is_served() {
    let site = basic_site().page("guides/café.md", "# Café\n");
    let loader = site.loader(Arc::new(NoHistory));

    let page = loader.load("/guides/caf%C3%A9/").unwrap();
    assert!(!page.not_found);
    assert_eq!(page.route.route.slug, "guides/café");

    let current: Vec<&str> = SidebarEntry::flatten(&page.route.sidebar)
        .into_iter()
        .filter(|link| link.is_current)
        .map(|link| link.href.as_str())
        .collect();
    assert_eq!(current, ["/guides/café/"]);
}
