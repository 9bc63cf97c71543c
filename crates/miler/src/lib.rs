//! Miler - periodic milestone synchronization for GitLab and GitHub.
//!
//! This library generates a rolling calendar of milestones (daily, weekly or
//! monthly) and reconciles a project's remote milestone set against it:
//! missing milestones are created and prematurely closed ones are reopened.
//!
//! # Example
//!
//! ```ignore
//! use miler::{calendar, new_provider, probe, sync};
//!
//! let kind = probe::detect_provider(&base_url, &token, &namespace, &project).await?;
//! let provider = new_provider(kind, &base_url, &token)?;
//! let project_id = provider.resolve_project_id(&project, &namespace).await?;
//!
//! let desired = calendar::generate(30, "daily", provider.due_date_format())?;
//! sync::create_missing_milestones(provider.as_ref(), &project_id, &desired).await?;
//! sync::reactivate_closed_milestones(provider.as_ref(), &project_id, &desired).await?;
//! ```

pub mod calendar;
pub mod github;
pub mod gitlab;
pub mod http;
pub mod milestone;
pub mod probe;
pub mod provider;
pub mod reconcile;
pub mod sync;

pub use calendar::{Cadence, CalendarError};
pub use github::GitHubProvider;
pub use gitlab::GitLabProvider;
pub use milestone::{DueDateFormat, Milestone, MilestoneMap, MilestoneState};
pub use provider::{MilestoneProvider, ProviderError, ProviderKind};

/// Construct the provider for a detected platform.
pub fn new_provider(
    kind: ProviderKind,
    base_url: &str,
    token: &str,
) -> provider::Result<Box<dyn MilestoneProvider>> {
    Ok(match kind {
        ProviderKind::GitLab => Box::new(GitLabProvider::new(base_url, token)?),
        ProviderKind::GitHub => Box::new(GitHubProvider::new(base_url, token)?),
    })
}
