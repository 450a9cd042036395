//! Git context detection for the GitHub Actions MCP server
//!
//! Derives the `{owner, repo, branch}` coordinate of the repository the
//! server runs in, from the configured remote URL and the checked-out branch.
//! Only local repository metadata is read; there is no network access.

pub mod context;
pub mod coordinate;
pub mod error;
pub mod remote;

pub use context::{ContextSource, GitContext};
pub use coordinate::RepoCoordinate;
pub use error::{Error, Result};
pub use remote::{DEFAULT_HOST, RemotePattern};
