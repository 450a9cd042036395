//! Session resolution pipeline
//!
//! A [`Session`] ties one resolved repository coordinate to a provider and
//! resolves, in order, the workflow, the latest run and that run's logs.
//! Each step is memoized in a [`Slot`], including failures, so a session
//! performs every provider lookup at most once.
//!
//! ```text
//! ContextSource ──> RepoCoordinate ──> Session
//!                                        ├─ workflow()   ── resolve_workflow
//!                                        ├─ latest_run() ── resolve_latest_run
//!                                        └─ logs()       ── fetch_logs
//! ```

pub mod error;
pub mod session;
pub mod slot;

pub use error::{SessionError, SessionResult};
pub use session::Session;
pub use slot::Slot;
