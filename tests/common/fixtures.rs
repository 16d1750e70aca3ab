//! Test data factories for rowmine types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use chrono::Utc;
use rowmine::config::{SubmitConfig, ValueSource};
use rowmine::types::{ExistingIssue, Project, Row, RowSchema, Value};

/// The standard test project
pub fn demo_project() -> Project {
    Project {
        id: 1,
        identifier: "demo".to_string(),
        name: "Demo".to_string(),
    }
}

/// Config targeting the demo project with a static subject
pub fn static_config(subject: &str) -> SubmitConfig {
    let mut config = SubmitConfig::new("demo");
    config.subject = ValueSource::Literal(subject.to_string());
    config.description = ValueSource::Literal("filed automatically".to_string());
    config
}

/// Config with duplicate suppression on subject + open status
pub fn dedup_config(subject: &str) -> SubmitConfig {
    let mut config = static_config(subject);
    config.allow_duplicates = false;
    config.search_by_subject = true;
    config.search_by_status = true;
    config
}

/// A schema with the usual test columns
pub fn schema() -> RowSchema {
    RowSchema::new(["title", "body", "user_id"])
}

/// A row of text cells
pub fn text_row(cells: &[&str]) -> Row {
    Row::new(cells.iter().map(|c| Value::Text((*c).to_string())).collect())
}

/// An existing issue as the duplicate search would return it
pub fn existing_issue(id: u64, subject: &str) -> ExistingIssue {
    ExistingIssue {
        id,
        subject: subject.to_string(),
        created_on: Utc::now(),
    }
}
