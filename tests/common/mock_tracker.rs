//! Mock tracker service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use rowmine::error::{Error, Result};
use rowmine::tracker::TrackerService;
use rowmine::types::{
    CreatedIssue, ExistingIssue, IssueDraft, IssueQuery, Project, TrackerConfig,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// Injected failure: HTTP status + message, rebuilt into an error per call
#[derive(Debug, Clone)]
pub struct InjectedError {
    pub status: u16,
    pub message: String,
}

impl InjectedError {
    fn to_error(&self) -> Error {
        Error::Api {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

/// Simple mock tracker service for testing
///
/// This manually implements `TrackerService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Auto-incrementing issue ids
/// - Call tracking for verification
/// - Registered projects and configurable search hits
/// - Error injection for failure path testing
pub struct MockTrackerService {
    config: TrackerConfig,
    next_issue_id: AtomicU64,
    projects: Mutex<HashMap<String, Project>>,
    search_hits: Mutex<Vec<ExistingIssue>>,
    // Call tracking
    get_project_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<IssueQuery>>,
    create_calls: Mutex<Vec<IssueDraft>>,
    // Error injection
    error_on_search: Mutex<Option<InjectedError>>,
    error_on_create: Mutex<Option<InjectedError>>,
    transient_create_failures: AtomicU32,
}

impl Default for MockTrackerService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTrackerService {
    /// Create an empty mock with a test config
    pub fn new() -> Self {
        Self {
            config: TrackerConfig {
                base_url: "https://tracker.test".to_string(),
                timeout: Duration::from_secs(5),
            },
            next_issue_id: AtomicU64::new(100),
            projects: Mutex::new(HashMap::new()),
            search_hits: Mutex::new(Vec::new()),
            get_project_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            error_on_search: Mutex::new(None),
            error_on_create: Mutex::new(None),
            transient_create_failures: AtomicU32::new(0),
        }
    }

    /// Register a project resolvable by its key
    pub fn with_project(self, project: Project) -> Self {
        self.projects
            .lock()
            .unwrap()
            .insert(project.identifier.clone(), project);
        self
    }

    /// Make every duplicate search return these hits
    pub fn set_search_hits(&self, hits: Vec<ExistingIssue>) {
        *self.search_hits.lock().unwrap() = hits;
    }

    // === Error injection methods ===

    /// Make `search_issues` fail
    pub fn fail_search(&self, status: u16, message: &str) {
        *self.error_on_search.lock().unwrap() = Some(InjectedError {
            status,
            message: message.to_string(),
        });
    }

    /// Make `create_issue` fail
    pub fn fail_create(&self, status: u16, message: &str) {
        *self.error_on_create.lock().unwrap() = Some(InjectedError {
            status,
            message: message.to_string(),
        });
    }

    /// Make the next `times` create calls fail with a 503
    pub fn fail_create_transiently(&self, times: u32) {
        self.transient_create_failures.store(times, Ordering::SeqCst);
    }

    // === Call verification methods ===

    /// Get all keys `get_project` was called with
    pub fn get_project_calls(&self) -> Vec<String> {
        self.get_project_calls.lock().unwrap().clone()
    }

    /// Get all `search_issues` queries
    pub fn search_calls(&self) -> Vec<IssueQuery> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Get all `create_issue` drafts
    pub fn create_calls(&self) -> Vec<IssueDraft> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Assert that exactly one issue was created, returning its draft
    pub fn single_create_call(&self) -> IssueDraft {
        let calls = self.create_calls();
        assert_eq!(calls.len(), 1, "expected one create call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    /// Assert that no create call was made
    pub fn assert_no_create(&self) {
        let calls = self.create_calls();
        assert!(calls.is_empty(), "expected no create calls, got {calls:?}");
    }

    /// Assert that no search call was made
    pub fn assert_no_search(&self) {
        let calls = self.search_calls();
        assert!(calls.is_empty(), "expected no search calls, got {calls:?}");
    }
}

#[async_trait]
impl TrackerService for MockTrackerService {
    async fn get_project(&self, key: &str) -> Result<Project> {
        self.get_project_calls
            .lock()
            .unwrap()
            .push(key.to_string());

        self.projects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::ProjectNotFound(key.to_string()))
    }

    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<ExistingIssue>> {
        self.search_calls.lock().unwrap().push(query.clone());

        if let Some(injected) = self.error_on_search.lock().unwrap().as_ref() {
            return Err(injected.to_error());
        }

        Ok(self.search_hits.lock().unwrap().clone())
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue> {
        self.create_calls.lock().unwrap().push(draft.clone());

        let remaining = self.transient_create_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_create_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(Error::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        if let Some(injected) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(injected.to_error());
        }

        let id = self.next_issue_id.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedIssue {
            id,
            subject: draft.subject.clone(),
            url: format!("{}/issues/{id}", self.config.base_url),
        })
    }

    fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
