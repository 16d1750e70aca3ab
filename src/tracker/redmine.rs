//! Redmine tracker service implementation

use crate::error::{Error, Result};
use crate::tracker::TrackerService;
use crate::types::{CreatedIssue, ExistingIssue, IssueDraft, IssueQuery, Project, TrackerConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Redmine service using reqwest
pub struct RedmineService {
    client: Client,
    api_key: String,
    config: TrackerConfig,
}

#[derive(Deserialize)]
struct ProjectWrapper {
    project: ProjectPayload,
}

#[derive(Deserialize)]
struct ProjectPayload {
    id: u64,
    identifier: String,
    name: String,
}

#[derive(Deserialize)]
struct IssueListWrapper {
    issues: Vec<IssuePayload>,
}

#[derive(Deserialize)]
struct IssuePayload {
    id: u64,
    subject: String,
    created_on: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize)]
struct CreatedWrapper {
    issue: CreatedPayload,
}

#[derive(Deserialize)]
struct CreatedPayload {
    id: u64,
    subject: String,
}

#[derive(Serialize)]
struct CreateIssueBody<'a> {
    issue: CreateIssueFields<'a>,
}

#[derive(Serialize)]
struct CreateIssueFields<'a> {
    project_id: u64,
    subject: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to_id: Option<u64>,
}

/// Error body Redmine returns on rejected requests
#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl RedmineService {
    /// Create a new Redmine service.
    ///
    /// Validates the base URL up front; a trailing slash is stripped so path
    /// construction stays uniform.
    pub fn new(base_url: &str, api_key: String, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            api_key,
            config: TrackerConfig { base_url, timeout },
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Web URL of an issue on this tracker
    pub fn issue_url(&self, id: u64) -> String {
        format!("{}/issues/{id}", self.config.base_url)
    }

    /// Fold a non-2xx response into an API error, keeping Redmine's
    /// `{"errors": [...]}` detail when the body carries one.
    async fn api_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| body.clone(), |e| e.errors.join("; "));
        Error::Api { status, message }
    }
}

#[async_trait]
impl TrackerService for RedmineService {
    async fn get_project(&self, key: &str) -> Result<Project> {
        let url = self.api_url(&format!(
            "/projects/{}.json",
            urlencoding::encode(key)
        ));

        let response = self
            .client
            .get(&url)
            .header("X-Redmine-API-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::ProjectNotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let wrapper: ProjectWrapper = response.json().await?;
        Ok(Project {
            id: wrapper.project.id,
            identifier: wrapper.project.identifier,
            name: wrapper.project.name,
        })
    }

    async fn search_issues(&self, query: &IssueQuery) -> Result<Vec<ExistingIssue>> {
        let url = self.api_url("/issues.json");

        let response = self
            .client
            .get(&url)
            .header("X-Redmine-API-Key", &self.api_key)
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let wrapper: IssueListWrapper = response.json().await?;
        Ok(wrapper
            .issues
            .into_iter()
            .map(|issue| ExistingIssue {
                id: issue.id,
                subject: issue.subject,
                created_on: issue.created_on,
            })
            .collect())
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue> {
        let url = self.api_url("/issues.json");

        let body = CreateIssueBody {
            issue: CreateIssueFields {
                project_id: draft.project_id,
                subject: &draft.subject,
                description: &draft.description,
                category_id: draft.category_id,
                assigned_to_id: draft.assigned_to_id,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("X-Redmine-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let wrapper: CreatedWrapper = response.json().await?;
        Ok(CreatedIssue {
            id: wrapper.issue.id,
            subject: wrapper.issue.subject,
            url: self.issue_url(wrapper.issue.id),
        })
    }

    fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let service =
            RedmineService::new("https://tracker.example.com/", "key".to_string(), None).unwrap();
        assert_eq!(service.config().base_url, "https://tracker.example.com");
        assert_eq!(
            service.issue_url(42),
            "https://tracker.example.com/issues/42"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = RedmineService::new("not a url", "key".to_string(), None);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_project_key_is_path_encoded() {
        let service =
            RedmineService::new("https://tracker.example.com", "key".to_string(), None).unwrap();
        let url = service.api_url(&format!("/projects/{}.json", urlencoding::encode("a b")));
        assert_eq!(url, "https://tracker.example.com/projects/a%20b.json");
    }
}
