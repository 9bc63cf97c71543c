//! GitLab milestone API client.
//!
//! Talks to GitLab's v4 REST API: project lookup by search, milestone
//! listing by state, form-encoded creation and `state_event` reactivation.
//!
//! # Module Structure
//!
//! - [`types`] - Wire structures for GitLab API responses
//! - [`client`] - The [`GitLabProvider`] implementation

mod client;
mod types;

pub use client::GitLabProvider;
pub use types::{GitLabMilestone, GitLabNamespace, GitLabProject};
