//! Repository context detection backed by git2

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::{DEFAULT_HOST, Error, RemotePattern, RepoCoordinate, Result};

/// Source of the repository coordinate for a tool invocation.
///
/// Implementations are read-only and hold no state between calls.
pub trait ContextSource: Send + Sync {
    /// Resolve the coordinate, or fail without a partial result.
    fn resolve(&self) -> Result<RepoCoordinate>;
}

/// Reads the coordinate from the git repository containing `root`.
#[derive(Debug, Clone)]
pub struct GitContext {
    root: PathBuf,
    remote: String,
    /// `None` matches the default host
    pattern: Option<RemotePattern>,
}

impl GitContext {
    /// Create a context reader for the repository at (or above) `root`,
    /// using the `origin` remote and the default host.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remote: "origin".to_string(),
            pattern: None,
        }
    }

    /// Use a different remote name.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Match remote URLs against a different provider host.
    pub fn with_pattern(mut self, pattern: RemotePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn detect(&self) -> Result<RepoCoordinate> {
        let repo = Repository::discover(&self.root)?;
        let url = remote_url(&repo, &self.remote)?;
        let (owner, repo_name) = match &self.pattern {
            Some(pattern) => pattern.parse(&url)?,
            None => RemotePattern::new(DEFAULT_HOST)?.parse(&url)?,
        };
        let branch = current_branch(&repo)?;
        RepoCoordinate::new(owner, repo_name, branch)
    }
}

impl ContextSource for GitContext {
    fn resolve(&self) -> Result<RepoCoordinate> {
        match self.detect() {
            Ok(coordinate) => {
                tracing::debug!(%coordinate, root = %self.root.display(), "Detected git context");
                Ok(coordinate)
            }
            Err(e) => {
                tracing::debug!(root = %self.root.display(), error = %e, "Git context detection failed");
                Err(e)
            }
        }
    }
}

/// Read the URL configured for `name`.
fn remote_url(repo: &Repository, name: &str) -> Result<String> {
    let remote = repo.find_remote(name).map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec => Error::RemoteNotFound {
            name: name.to_string(),
        },
        _ => Error::Git(e),
    })?;

    remote
        .url()
        .map(str::to_string)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::RemoteUrlMissing {
            name: name.to_string(),
        })
}

/// Name of the checked-out branch. Detached or unborn HEAD is an error.
fn current_branch(repo: &Repository) -> Result<String> {
    if repo.head_detached()? {
        return Err(Error::DetachedHead);
    }

    let head = repo.head().map_err(|e| match e.code() {
        ErrorCode::UnbornBranch => Error::UnbornHead,
        _ => Error::Git(e),
    })?;
    if !head.is_branch() {
        return Err(Error::DetachedHead);
    }

    head.shorthand()
        .map(str::to_string)
        .ok_or(Error::DetachedHead)
}
