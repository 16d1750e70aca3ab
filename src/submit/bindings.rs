//! Phase 1: field binding
//!
//! Resolves every field-sourced attribute in the configuration against the
//! input schema, once, before any row is processed. An unresolvable field
//! name is a configuration error and aborts the whole run.

use crate::config::SubmitConfig;
use crate::error::{Error, Result};
use crate::types::RowSchema;

/// Column indexes for field-sourced attributes.
///
/// Immutable once resolved; reused verbatim for every row of the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldBindings {
    /// Subject column, when the subject is field-sourced
    pub subject: Option<usize>,
    /// Description column, when the description is field-sourced
    pub description: Option<usize>,
    /// Assignee column, when the assignee is field-sourced
    pub assigned_to: Option<usize>,
}

/// Resolve configured field names to column indexes.
///
/// Fails with [`Error::FieldNotFound`] on the first configured name missing
/// from the schema.
pub fn resolve_bindings(config: &SubmitConfig, schema: &RowSchema) -> Result<FieldBindings> {
    let mut bindings = FieldBindings::default();

    if let Some(name) = config.subject.field_name() {
        bindings.subject = Some(require_column(schema, name)?);
    }

    if let Some(name) = config.description.field_name() {
        bindings.description = Some(require_column(schema, name)?);
    }

    if let Some(name) = config.assigned_to.as_ref().and_then(|s| s.field_name()) {
        bindings.assigned_to = Some(require_column(schema, name)?);
    }

    Ok(bindings)
}

fn require_column(schema: &RowSchema, name: &str) -> Result<usize> {
    schema
        .index_of(name)
        .ok_or_else(|| Error::FieldNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueSource;

    fn schema() -> RowSchema {
        RowSchema::new(["title", "body", "user_id"])
    }

    #[test]
    fn test_static_config_binds_nothing() {
        let config = SubmitConfig::new("demo");
        let bindings = resolve_bindings(&config, &schema()).unwrap();
        assert_eq!(bindings, FieldBindings::default());
    }

    #[test]
    fn test_field_sources_bind_to_columns() {
        let mut config = SubmitConfig::new("demo");
        config.subject = ValueSource::Field("title".to_string());
        config.description = ValueSource::Field("body".to_string());
        config.assigned_to = Some(ValueSource::Field("user_id".to_string()));

        let bindings = resolve_bindings(&config, &schema()).unwrap();
        assert_eq!(bindings.subject, Some(0));
        assert_eq!(bindings.description, Some(1));
        assert_eq!(bindings.assigned_to, Some(2));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let mut config = SubmitConfig::new("demo");
        config.subject = ValueSource::Field("headline".to_string());

        let err = resolve_bindings(&config, &schema()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(name) if name == "headline"));
    }

    #[test]
    fn test_static_assignee_needs_no_binding() {
        let mut config = SubmitConfig::new("demo");
        config.assigned_to = Some(ValueSource::Literal("12".to_string()));

        let bindings = resolve_bindings(&config, &schema()).unwrap();
        assert_eq!(bindings.assigned_to, None);
    }
}
