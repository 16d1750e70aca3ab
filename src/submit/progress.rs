//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, host pipeline adapters) to
//! receive progress updates while rows are being submitted.

use crate::submit::session::RowReport;
use crate::submit::{RowFault, SubmitSummary};
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Binding configured fields to the input schema
    Preparing,
    /// Submitting rows
    Submitting,
    /// All rows consumed
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preparing => f.write_str("Preparing"),
            Self::Submitting => f.write_str("Submitting"),
            Self::Complete => f.write_str("Complete"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a run.
/// - CLI implementations can print to terminal
/// - Host adapters can feed their own row accounting
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called with the outcome of each row (1-based row number)
    async fn on_row(&self, row: usize, report: &RowReport);

    /// Called for each non-fatal fault recorded on a row
    async fn on_fault(&self, row: usize, fault: &RowFault);

    /// Called once at the end with the run summary
    async fn on_summary(&self, summary: &SubmitSummary);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_row(&self, _row: usize, _report: &RowReport) {}
    async fn on_fault(&self, _row: usize, _fault: &RowFault) {}
    async fn on_summary(&self, _summary: &SubmitSummary) {}
    async fn on_message(&self, _message: &str) {}
}
