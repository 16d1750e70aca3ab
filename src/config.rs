//! Submission configuration
//!
//! A flat set of per-run settings: where issue attributes come from (static
//! text or a named input column) and how duplicate suppression behaves.

/// Where an issue attribute's value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Fixed value from configuration
    Literal(String),
    /// Value read from a named input column, per row
    Field(String),
}

impl ValueSource {
    /// The source column name, when field-sourced
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Per-run submission settings.
///
/// Immutable once a session is prepared.
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Target project key
    pub project_key: String,
    /// Issue subject source
    pub subject: ValueSource,
    /// Issue description source
    pub description: ValueSource,
    /// Static category id as text; invalid numbers are a row fault
    pub category: Option<String>,
    /// Assignee user id source; invalid numbers are a row fault
    pub assigned_to: Option<ValueSource>,
    /// When true, skip the duplicate search and always create
    pub allow_duplicates: bool,
    /// Include the resolved subject in the duplicate predicates
    pub search_by_subject: bool,
    /// Restrict the duplicate search to open issues
    pub search_by_status: bool,
}

impl SubmitConfig {
    /// Minimal config: static subject/description, duplicates allowed
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            subject: ValueSource::Literal(String::new()),
            description: ValueSource::Literal(String::new()),
            category: None,
            assigned_to: None,
            allow_duplicates: true,
            search_by_subject: false,
            search_by_status: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_only_for_field_source() {
        assert_eq!(
            ValueSource::Field("title".to_string()).field_name(),
            Some("title")
        );
        assert_eq!(ValueSource::Literal("Bug".to_string()).field_name(), None);
    }

    #[test]
    fn test_default_config_allows_duplicates() {
        let config = SubmitConfig::new("demo");
        assert!(config.allow_duplicates);
        assert!(config.category.is_none());
        assert!(config.assigned_to.is_none());
    }
}
