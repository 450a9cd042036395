//! Shared test utilities for the actions-mcp workspace.
//!
//! This crate provides standardised test fixtures used across crate test
//! suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repositories with a configured remote and branch
//! - [`github`]: GitHub Actions REST payload builders
//! - [`fake`]: [`FakeActionsApi`](fake::FakeActionsApi), an in-memory provider that counts calls

pub mod fake;
pub mod git;
pub mod github;
