//! Git repository fixtures.
//!
//! All fixtures use `git2` directly, so no `git` binary or user config is
//! needed.

use std::path::Path;

use git2::{Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Initialises a repository whose unborn `HEAD` points at `branch`.
///
/// Realism level: **REAL**: valid git object store, empty history.
///
/// # Panics
/// Panics if `git2::Repository::init_opts` fails.
pub fn init_repo(path: &Path, branch: &str) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(branch);
    Repository::init_opts(path, &opts).unwrap_or_else(|e| {
        panic!(
            "init_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Creates an empty commit on `HEAD`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_empty(repo: &Repository, message: &str) -> git2::Oid {
    let sig = Signature::now("Test User", "test@test.com")
        .unwrap_or_else(|e| panic!("commit_empty: failed to build signature: {e}"));
    let tree_id = repo
        .index()
        .and_then(|mut index| index.write_tree())
        .unwrap_or_else(|e| panic!("commit_empty: failed to write tree: {e}"));
    let tree = repo
        .find_tree(tree_id)
        .unwrap_or_else(|e| panic!("commit_empty: failed to find tree: {e}"));

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_empty: failed to commit: {e}"))
}

/// Adds a remote named `name` pointing at `url`.
///
/// # Panics
/// Panics if the remote cannot be created.
pub fn add_remote(repo: &Repository, name: &str, url: &str) {
    repo.remote(name, url)
        .unwrap_or_else(|e| panic!("add_remote: failed to add {name} -> {url}: {e}"));
}

/// Initialises a repository on `branch` with one commit and an `origin`
/// remote pointing at `url`.
///
/// Realism level: **REAL WITH HISTORY**.
pub fn repo_with_origin(path: &Path, url: &str, branch: &str) -> Repository {
    let repo = init_repo(path, branch);
    commit_empty(&repo, "Initial commit");
    add_remote(&repo, "origin", url);
    repo
}

/// Detaches `HEAD` at its current commit.
///
/// # Panics
/// Panics if `HEAD` has no commit.
pub fn detach_head(repo: &Repository) {
    let oid = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map(|commit| commit.id())
        .unwrap_or_else(|e| panic!("detach_head: HEAD has no commit: {e}"));
    repo.set_head_detached(oid)
        .unwrap_or_else(|e| panic!("detach_head: failed to detach: {e}"));
}

/// A temporary directory holding a ready-to-use repository.
pub struct GitFixture {
    repo: Repository,
    temp_dir: TempDir,
}

impl GitFixture {
    /// Temporary repository on `branch` with `origin` set to `url`.
    pub fn with_origin(url: &str, branch: &str) -> Self {
        let temp_dir = TempDir::new().unwrap_or_else(|e| panic!("GitFixture: tempdir: {e}"));
        let repo = repo_with_origin(temp_dir.path(), url, branch);
        Self { temp_dir, repo }
    }

    /// Temporary repository on `main` with one commit and no remote.
    pub fn without_remote() -> Self {
        let temp_dir = TempDir::new().unwrap_or_else(|e| panic!("GitFixture: tempdir: {e}"));
        let repo = init_repo(temp_dir.path(), "main");
        commit_empty(&repo, "Initial commit");
        Self { temp_dir, repo }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }
}
