//! Two-phase submission engine
//!
//! Handles the workflow of turning input rows into tracker issues:
//! 1. Prepare - bind configured field names to schema column indexes
//! 2. Submit - per row: resolve a draft, check for duplicates, create
//!
//! Binding happens exactly once, before the first row; every row after that
//! reuses the same immutable bindings.

mod bindings;
mod draft;
mod execute;
mod progress;
mod retry;
mod session;

pub use bindings::{FieldBindings, resolve_bindings};
pub use draft::{DraftFields, FaultField, RowFault, build_draft_fields};
pub use execute::{SubmitSummary, submit_rows};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use retry::RetryPolicy;
pub use session::{Outcome, RowFailure, RowReport, SessionState, SubmitSession};
