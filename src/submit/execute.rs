//! Phase 2 driver: row-stream submission
//!
//! Feeds a prepared session from a row stream, reports per-row outcomes
//! through the progress callback, and accumulates the run summary. Rows are
//! processed strictly one at a time, in stream order.

use crate::error::Result;
use crate::submit::progress::{Phase, ProgressCallback};
use crate::submit::session::{Outcome, RowFailure, RowReport, SubmitSession};
use crate::types::{CreatedIssue, Row};

/// Accumulated result of one submission run
#[derive(Debug, Clone, Default)]
pub struct SubmitSummary {
    /// Rows consumed from the feed
    pub rows: usize,
    /// Issues created, in row order
    pub created: Vec<CreatedIssue>,
    /// Rows skipped as duplicates
    pub skipped: usize,
    /// Rows that failed on a remote call or a malformed record
    pub failed: usize,
    /// Non-fatal validation faults across all rows
    pub faults: usize,
}

impl SubmitSummary {
    /// Whether every consumed row was created or deliberately skipped
    pub const fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Submit every row from `rows` through a prepared session.
///
/// A malformed record aborts only that row. With `dry_run`, drafts are
/// resolved and reported but no remote call is made. The session is drained
/// and closed once the stream ends.
pub async fn submit_rows(
    session: &mut SubmitSession<'_>,
    rows: impl IntoIterator<Item = Result<Row>>,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<SubmitSummary> {
    let mut summary = SubmitSummary::default();

    progress.on_phase(Phase::Submitting).await;
    if dry_run {
        progress.on_message("Dry run - no issues will be created").await;
    }

    for (index, row) in rows.into_iter().enumerate() {
        let row_number = index + 1;
        summary.rows += 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let report = RowReport {
                    outcome: Outcome::Failed(RowFailure::from(&e)),
                    faults: Vec::new(),
                };
                summary.failed += 1;
                progress.on_row(row_number, &report).await;
                continue;
            }
        };

        if dry_run {
            let (fields, faults) = session.resolve(&row)?;
            for fault in &faults {
                progress.on_fault(row_number, fault).await;
            }
            summary.faults += faults.len();
            progress
                .on_message(&format!("would create issue `{}`", fields.subject))
                .await;
            continue;
        }

        let report = session.submit(&row).await?;

        for fault in &report.faults {
            progress.on_fault(row_number, fault).await;
        }
        summary.faults += report.faults.len();

        match &report.outcome {
            Outcome::Created(issue) => summary.created.push(issue.clone()),
            Outcome::SkippedDuplicate => summary.skipped += 1,
            Outcome::Failed(_) => summary.failed += 1,
        }

        progress.on_row(row_number, &report).await;
    }

    session.drain()?;
    session.close()?;

    progress.on_phase(Phase::Complete).await;
    progress.on_summary(&summary).await;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_success_tracks_failures() {
        let mut summary = SubmitSummary::default();
        assert!(summary.success());

        summary.skipped = 3;
        summary.faults = 2;
        assert!(summary.success());

        summary.failed = 1;
        assert!(!summary.success());
    }
}
