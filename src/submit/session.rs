//! Submission session
//!
//! One session per run. The lifecycle is an explicit state machine:
//! `Uninitialized → Ready → Draining → Closed`. `prepare` binds fields and
//! moves the session to `Ready`; `submit` is only valid in `Ready`;
//! end-of-input drains and closes the session. All per-run state lives here.

use crate::config::SubmitConfig;
use crate::error::{Error, Result};
use crate::submit::draft::{DraftFields, RowFault, build_draft_fields};
use crate::submit::retry::{RetryPolicy, with_policy};
use crate::submit::{FieldBindings, resolve_bindings};
use crate::tracker::TrackerService;
use crate::types::{CreatedIssue, IssueDraft, IssueQuery, OPEN_STATUS_ID, Row, RowSchema};
use tracing::{debug, info, trace};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, fields not yet bound
    Uninitialized,
    /// Fields bound, accepting rows
    Ready,
    /// End of input seen, no more rows accepted
    Draining,
    /// Session finished
    Closed,
}

impl SessionState {
    const fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Ready => "Ready",
            Self::Draining => "Draining",
            Self::Closed => "Closed",
        }
    }
}

/// A row-level remote failure, reported upward and not retried further
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Human-readable message from the underlying error
    pub message: String,
    /// Stable numeric classification (`Error::classification`)
    pub classification: i32,
}

impl From<&Error> for RowFailure {
    fn from(e: &Error) -> Self {
        Self {
            message: e.to_string(),
            classification: e.classification(),
        }
    }
}

/// Terminal disposition of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The issue was created
    Created(CreatedIssue),
    /// An existing issue matched the duplicate predicates; nothing created
    SkippedDuplicate,
    /// A remote call failed; this row aborted, the run continues
    Failed(RowFailure),
}

/// Everything reported for one row: the disposition plus any non-fatal
/// validation faults recorded while the draft was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    /// Terminal disposition
    pub outcome: Outcome,
    /// Non-fatal faults (invalid category/assignee values)
    pub faults: Vec<RowFault>,
}

impl RowReport {
    fn failed(e: &Error, faults: Vec<RowFault>) -> Self {
        Self {
            outcome: Outcome::Failed(RowFailure::from(e)),
            faults,
        }
    }
}

/// Per-run submission session over a tracker service
pub struct SubmitSession<'a> {
    config: SubmitConfig,
    tracker: &'a dyn TrackerService,
    retry: Option<RetryPolicy>,
    state: SessionState,
    bindings: FieldBindings,
}

impl<'a> SubmitSession<'a> {
    /// Create an unprepared session
    pub fn new(config: SubmitConfig, tracker: &'a dyn TrackerService) -> Self {
        Self {
            config,
            tracker,
            retry: None,
            state: SessionState::Uninitialized,
            bindings: FieldBindings::default(),
        }
    }

    /// Retry transient remote errors under `policy`
    #[must_use]
    pub const fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Bind configured field names against the input schema.
    ///
    /// Must run before any row. Fails with [`Error::FieldNotFound`] when a
    /// configured column is missing, aborting the run before any submission.
    pub fn prepare(&mut self, schema: &RowSchema) -> Result<()> {
        self.expect(SessionState::Uninitialized)?;
        self.bindings = resolve_bindings(&self.config, schema)?;
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Resolve draft attributes for a row without any remote call.
    ///
    /// Used by dry runs; requires a prepared session.
    pub fn resolve(&self, row: &Row) -> Result<(DraftFields, Vec<RowFault>)> {
        self.expect(SessionState::Ready)?;
        Ok(build_draft_fields(&self.config, &self.bindings, row))
    }

    /// Submit one row.
    ///
    /// Remote failures (project lookup, duplicate search, create) abort only
    /// this row and come back as [`Outcome::Failed`]; `Err` is reserved for
    /// calling the session in the wrong state.
    pub async fn submit(&self, row: &Row) -> Result<RowReport> {
        self.expect(SessionState::Ready)?;

        let (fields, faults) = build_draft_fields(&self.config, &self.bindings, row);
        trace!(
            subject = %fields.subject,
            description = %fields.description,
            category = ?fields.category_id,
            assigned_to = ?fields.assigned_to_id,
            "resolved draft"
        );

        let project = match with_policy(self.retry, || {
            self.tracker.get_project(&self.config.project_key)
        })
        .await
        {
            Ok(project) => project,
            Err(e) => return Ok(RowReport::failed(&e, faults)),
        };

        if !self.config.allow_duplicates {
            // Search and create are not atomic: two sessions submitting the
            // same project+subject can both pass this check and create twice.
            // Rows within one session run strictly sequentially.
            let query = IssueQuery {
                project: project.identifier.clone(),
                subject: self
                    .config
                    .search_by_subject
                    .then(|| fields.subject.clone()),
                status_id: self.config.search_by_status.then_some(OPEN_STATUS_ID),
            };
            debug!(?query, "duplicate search");

            match with_policy(self.retry, || self.tracker.search_issues(&query)).await {
                Ok(hits) if !hits.is_empty() => {
                    info!(subject = %fields.subject, hits = hits.len(), "duplicate found, skipping");
                    return Ok(RowReport {
                        outcome: Outcome::SkippedDuplicate,
                        faults,
                    });
                }
                Ok(_) => {}
                Err(e) => return Ok(RowReport::failed(&e, faults)),
            }
        }

        let draft = IssueDraft {
            project_id: project.id,
            subject: fields.subject,
            description: fields.description,
            category_id: fields.category_id,
            assigned_to_id: fields.assigned_to_id,
        };

        match with_policy(self.retry, || self.tracker.create_issue(&draft)).await {
            Ok(created) => {
                info!(id = created.id, subject = %created.subject, "issue created");
                Ok(RowReport {
                    outcome: Outcome::Created(created),
                    faults,
                })
            }
            Err(e) => Ok(RowReport::failed(&e, faults)),
        }
    }

    /// Mark end of input; no further rows are accepted
    pub fn drain(&mut self) -> Result<()> {
        self.expect(SessionState::Ready)?;
        self.state = SessionState::Draining;
        Ok(())
    }

    /// Close a drained session
    pub fn close(&mut self) -> Result<()> {
        self.expect(SessionState::Draining)?;
        self.state = SessionState::Closed;
        Ok(())
    }

    fn expect(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }
}
