//! GitHub milestone API client.
//!
//! Talks to the GitHub REST v3 API: repository lookup, milestone listing by
//! state, JSON creation and `PATCH`-based reopening.
//!
//! # Module Structure
//!
//! - [`types`] - Wire structures for GitHub API requests and responses
//! - [`client`] - The [`GitHubProvider`] implementation

mod client;
mod types;

pub use client::GitHubProvider;
pub use types::GitHubMilestone;
