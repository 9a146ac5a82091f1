//! Git history lookups for Quire.
//!
//! Answers one question: when was a file last changed? The answer is the
//! commit time of the newest commit on the first-parent chain from `HEAD`
//! whose tree entry for the file differs from its parent's.
//!
//! # Example
//!
//! ```ignore
//! use quire_vcs::{GitHistory, HistoryQuery};
//!
//! let history = GitHistory::new(".")?;
//! let date = history.newest_commit_date(Path::new("src/content/docs/index.md"))?;
//! ```

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use gix::ThreadSafeRepository;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from history lookups.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// No repository contains the project root.
    #[error("No git repository found at {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    /// The repository has no working tree.
    #[error("Git repository has no working tree")]
    Bare,
    /// The file does not exist in `HEAD`.
    #[error("File is not tracked: {}", .0.display())]
    NotTracked(PathBuf),
    /// History lookups are turned off.
    #[error("History is unavailable")]
    Unavailable,
    /// Any other repository error.
    #[error("Git error: {0}")]
    Git(#[source] BoxError),
}

fn git(err: impl std::error::Error + Send + Sync + 'static) -> VcsError {
    VcsError::Git(Box::new(err))
}

/// Lookup of a file's last modification in version control.
pub trait HistoryQuery: Send + Sync {
    /// Commit time of the newest commit touching `file_path`.
    ///
    /// `file_path` is relative to the project root.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError`] if the file is untracked or the repository
    /// cannot be read.
    fn newest_commit_date(&self, file_path: &Path) -> Result<DateTime<Utc>, VcsError>;
}

/// History backed by a git repository.
pub struct GitHistory {
    repo: ThreadSafeRepository,
    /// Project root relative to the repository working tree.
    prefix: PathBuf,
}

impl GitHistory {
    /// Open the repository containing `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::Discover`] if no repository is found and
    /// [`VcsError::Bare`] if it has no working tree.
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self, VcsError> {
        let project_root = project_root.as_ref();
        let discover_err = |source: BoxError| VcsError::Discover {
            path: project_root.to_path_buf(),
            source,
        };

        let root = project_root
            .canonicalize()
            .map_err(|e| discover_err(Box::new(e)))?;
        let repo = gix::discover(&root).map_err(|e| discover_err(Box::new(e)))?;
        let workdir = repo.workdir().ok_or(VcsError::Bare)?;
        let workdir = workdir.canonicalize().map_err(git)?;
        let prefix = root
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            workdir = %workdir.display(),
            prefix = %prefix.display(),
            "Opened git repository"
        );
        Ok(Self {
            repo: repo.into_sync(),
            prefix,
        })
    }
}

impl HistoryQuery for GitHistory {
    fn newest_commit_date(&self, file_path: &Path) -> Result<DateTime<Utc>, VcsError> {
        let repo = self.repo.to_thread_local();
        let rel = repo_path(&self.prefix, file_path);

        let mut commit = repo.head_commit().map_err(git)?;
        let Some(blob) = entry_id(&commit, &rel)? else {
            return Err(VcsError::NotTracked(file_path.to_path_buf()));
        };

        loop {
            let Some(parent_id) = commit.parent_ids().next() else {
                break;
            };
            let parent = repo.find_commit(parent_id.detach()).map_err(git)?;
            match entry_id(&parent, &rel)? {
                Some(id) if id == blob => commit = parent,
                _ => break,
            }
        }

        let seconds = commit.time().map_err(git)?.seconds;
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| VcsError::Git(format!("commit time out of range: {seconds}").into()))
    }
}

/// Path of `file_path` inside the repository, `/`-separated.
fn repo_path(prefix: &Path, file_path: &Path) -> String {
    prefix
        .join(file_path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Object id of `path` in a commit's tree, if present.
fn entry_id(commit: &gix::Commit<'_>, path: &str) -> Result<Option<gix::ObjectId>, VcsError> {
    let tree = commit.tree().map_err(git)?;
    let entry = tree.lookup_entry_by_path(path).map_err(git)?;
    Ok(entry.map(|e| e.object_id()))
}

/// History that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl HistoryQuery for NoHistory {
    fn newest_commit_date(&self, _file_path: &Path) -> Result<DateTime<Utc>, VcsError> {
        Err(VcsError::Unavailable)
    }
}
