//! Content collections for Quire.
//!
//! Loads markdown pages with YAML frontmatter into [`ContentEntry`] values
//! and exposes them through the [`ContentStore`] trait.
//!
//! # Backends
//!
//! - [`FsContentStore`] - scans a directory once at startup
//! - `MockContentStore` - in-memory store (requires the `mock` feature)

mod entry;
mod frontmatter;
mod fs;
pub mod markdown;
#[cfg(feature = "mock")]
mod mock;
mod parse;
mod store;

pub use entry::{
    Badge, ContentEntry, DOCS_COLLECTION, EditUrl, EntryData, Heading, Hero, HeroAction,
    LastUpdated, PrevNextLink, RenderedContent, SidebarOptions, Template,
};
pub use fs::FsContentStore;
#[cfg(feature = "mock")]
pub use mock::MockContentStore;
pub use store::{ContentError, ContentErrorKind, ContentStore};
