//! The provider abstraction: one trait per hosting platform's milestone API.

use std::fmt;

use async_trait::async_trait;

use crate::milestone::{DueDateFormat, MilestoneMap, MilestoneState};

pub mod error;

pub use error::{ProviderError, Result};

/// The hosting platforms a project can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GitLab,
    GitHub,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitLab => write!(f, "gitlab"),
            Self::GitHub => write!(f, "github"),
        }
    }
}

/// Milestone operations against a single hosting platform.
///
/// Implementations own authentication and the platform's URL and payload
/// dialects; callers work exclusively in canonical [`MilestoneMap`] terms.
/// The `project_id` threaded through the methods is whatever
/// [`resolve_project_id`](Self::resolve_project_id) returned, opaque to the
/// caller.
#[async_trait]
pub trait MilestoneProvider {
    /// Which platform this provider talks to.
    fn kind(&self) -> ProviderKind;

    /// The due-date wire format this platform expects.
    fn due_date_format(&self) -> DueDateFormat;

    /// Resolve a project name and namespace to the platform's project
    /// identifier.
    async fn resolve_project_id(&self, project: &str, namespace: &str) -> Result<String>;

    /// Fetch all milestones in the given state, keyed by title.
    async fn list_milestones(&self, project_id: &str, state: MilestoneState)
        -> Result<MilestoneMap>;

    /// Create every milestone in `milestones` on the project, aborting on the
    /// first failure.
    async fn create_milestones(&self, project_id: &str, milestones: &MilestoneMap) -> Result<()>;

    /// Reopen the given closed milestones, returning them stamped active.
    /// Aborts on the first failure.
    async fn reactivate_milestones(
        &self,
        project_id: &str,
        milestones: &MilestoneMap,
    ) -> Result<MilestoneMap>;
}
