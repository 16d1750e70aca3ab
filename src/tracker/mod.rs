//! Tracker services
//!
//! Provides a unified interface for the three remote operations issue
//! submission needs: project lookup, duplicate search, and issue creation.

mod redmine;

pub use redmine::RedmineService;

use crate::error::Result;
use crate::types::{CreatedIssue, ExistingIssue, IssueDraft, IssueQuery, Project, TrackerConfig};
use async_trait::async_trait;

/// Tracker service trait for issue operations
///
/// This trait abstracts the remote issue tracker, allowing the same
/// submission logic to run against a real service or a test double.
#[async_trait]
pub trait TrackerService: Send + Sync {
    /// Resolve a project from its key
    async fn get_project(&self, key: &str) -> Result<Project>;

    /// Search existing issues matching a predicate set
    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<ExistingIssue>>;

    /// Create a new issue from a resolved draft
    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue>;

    /// Get the tracker connection configuration
    fn config(&self) -> &TrackerConfig;
}
