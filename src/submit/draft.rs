//! Per-row draft resolution
//!
//! Resolves subject, description, category, and assignee for one row. A
//! malformed category or assignee value is recorded as a row fault, not an
//! error: the draft is still built (without the invalid attribute) and
//! submission proceeds, matching the non-fatal-but-flagged policy.

use crate::config::{SubmitConfig, ValueSource};
use crate::submit::FieldBindings;
use crate::types::{Row, Value};
use std::fmt;

/// Draft attributes resolved from one row, before project lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftFields {
    /// Resolved subject
    pub subject: String,
    /// Resolved description
    pub description: String,
    /// Parsed category id, when configured and valid
    pub category_id: Option<u64>,
    /// Parsed assignee user id, when configured and valid
    pub assigned_to_id: Option<u64>,
}

/// Attribute a row fault applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultField {
    /// Category id failed to parse
    Category,
    /// Assignee user id failed to parse
    AssignedTo,
}

impl fmt::Display for FaultField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::AssignedTo => f.write_str("assigned_to"),
        }
    }
}

/// A non-fatal validation failure scoped to one row.
///
/// The row is flagged for upstream accounting but submission is still
/// attempted without the invalid attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFault {
    /// Attribute the fault applies to
    pub field: FaultField,
    /// The offending value as text
    pub value: String,
    /// Human-readable message
    pub message: String,
}

impl RowFault {
    fn invalid(field: FaultField, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
            message: format!("invalid {field} value: {value}"),
        }
    }
}

/// Resolve draft attributes for one row, accumulating faults.
///
/// Subject and description come from their bound column when field-sourced,
/// otherwise from the static configuration. The assignee prefers the bound
/// column over the static value.
pub fn build_draft_fields(
    config: &SubmitConfig,
    bindings: &FieldBindings,
    row: &Row,
) -> (DraftFields, Vec<RowFault>) {
    let mut faults = Vec::new();

    let subject = resolve_text(&config.subject, bindings.subject, row);
    let description = resolve_text(&config.description, bindings.description, row);

    let category_id = config.category.as_deref().and_then(|raw| {
        parse_id(raw).or_else(|| {
            faults.push(RowFault::invalid(FaultField::Category, raw));
            None
        })
    });

    let assigned_to_id = resolve_assignee(config, bindings, row, &mut faults);

    (
        DraftFields {
            subject,
            description,
            category_id,
            assigned_to_id,
        },
        faults,
    )
}

fn resolve_text(source: &ValueSource, binding: Option<usize>, row: &Row) -> String {
    match (source, binding) {
        (ValueSource::Field(_), Some(index)) => {
            row.get(index).map(Value::render).unwrap_or_default()
        }
        (ValueSource::Literal(text), _) => text.clone(),
        // A field source always has a binding after prepare; a short record
        // resolves to empty text rather than aborting the row.
        (ValueSource::Field(_), None) => String::new(),
    }
}

fn resolve_assignee(
    config: &SubmitConfig,
    bindings: &FieldBindings,
    row: &Row,
    faults: &mut Vec<RowFault>,
) -> Option<u64> {
    if let Some(index) = bindings.assigned_to {
        let cell = row.get(index).map(Value::render).unwrap_or_default();
        return parse_id(&cell).or_else(|| {
            faults.push(RowFault::invalid(FaultField::AssignedTo, &cell));
            None
        });
    }

    match config.assigned_to.as_ref() {
        Some(ValueSource::Literal(raw)) => parse_id(raw).or_else(|| {
            faults.push(RowFault::invalid(FaultField::AssignedTo, raw));
            None
        }),
        _ => None,
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
