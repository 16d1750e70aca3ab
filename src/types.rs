//! Core types for rowmine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Status id the tracker uses for newly opened issues
pub const OPEN_STATUS_ID: u32 = 1;

/// A single cell value in an input row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Value {
    /// Free-form text
    Text(String),
    /// Integer value
    Int(i64),
}

impl Value {
    /// Render the value as text, the way a row pipeline stringifies cells
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
        }
    }

    /// Interpret the value as an integer, parsing text cells
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Int(n) => Some(*n),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Ordered, named columns of an input row stream.
///
/// Read once before the first row; the schema must not change mid-stream
/// (assumed by contract with the row source, not checked).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    columns: Vec<String>,
}

impl RowSchema {
    /// Build a schema from column names in stream order
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of a named column, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Column names in stream order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// One record from the row stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Build a row from cell values in schema order
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Cell at a column index; `None` when the record is short
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// A tracker project, resolved from its key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Numeric project id (used in create payloads)
    pub id: u64,
    /// Project identifier string (used in search predicates)
    pub identifier: String,
    /// Human-readable project name
    pub name: String,
}

/// An issue to be created, fully resolved from configuration and row values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    /// Numeric id of the target project
    pub project_id: u64,
    /// Issue subject
    pub subject: String,
    /// Issue description
    pub description: String,
    /// Optional category id
    pub category_id: Option<u64>,
    /// Optional assignee user id
    pub assigned_to_id: Option<u64>,
}

/// An issue returned by the duplicate search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingIssue {
    /// Issue id
    pub id: u64,
    /// Issue subject
    pub subject: String,
    /// When the issue was opened
    pub created_on: DateTime<Utc>,
}

/// A freshly created issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Issue id assigned by the tracker
    pub id: u64,
    /// Subject the tracker stored
    pub subject: String,
    /// Web URL of the issue
    pub url: String,
}

/// Predicate set for the duplicate search.
///
/// The project identifier is always present; subject and status are included
/// per the duplicate-check settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Project identifier predicate
    pub project: String,
    /// Exact-subject predicate, when searching by subject
    pub subject: Option<String>,
    /// Status predicate, when restricting to open issues
    pub status_id: Option<u32>,
}

impl IssueQuery {
    /// Flatten into wire query parameters
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("project_id", self.project.clone())];
        if let Some(subject) = &self.subject {
            params.push(("subject", subject.clone()));
        }
        if let Some(status_id) = self.status_id {
            params.push(("status_id", status_id.to_string()));
        }
        params
    }
}

/// Tracker connection parameters
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base URL of the tracker (no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}
