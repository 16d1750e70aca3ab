//! API key resolution and verification
//!
//! Supports an explicit flag value and environment variables.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use url::Url;

/// Source of the API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Key passed explicitly (CLI flag)
    Flag,
    /// Key from an environment variable
    EnvVar,
}

/// A resolved API key
#[derive(Debug, Clone)]
pub struct ApiKey {
    /// The key itself
    pub key: String,
    /// Where the key was obtained from
    pub source: KeySource,
}

/// Resolve the tracker API key.
///
/// Priority:
/// 1. Explicit flag value
/// 2. `REDMINE_API_KEY` environment variable
/// 3. `REDMINE_TOKEN` environment variable
pub fn resolve_api_key(flag: Option<&str>) -> Result<ApiKey> {
    if let Some(key) = flag {
        return Ok(ApiKey {
            key: key.to_string(),
            source: KeySource::Flag,
        });
    }

    for var in ["REDMINE_API_KEY", "REDMINE_TOKEN"] {
        if let Ok(key) = env::var(var) {
            if !key.is_empty() {
                return Ok(ApiKey {
                    key,
                    source: KeySource::EnvVar,
                });
            }
        }
    }

    Err(Error::Auth(
        "no API key found; pass --token or set REDMINE_API_KEY".to_string(),
    ))
}

#[derive(Deserialize)]
struct UserWrapper {
    user: CurrentUser,
}

#[derive(Deserialize)]
struct CurrentUser {
    login: String,
}

/// Verify an API key against the tracker; returns the authenticated login
pub async fn test_auth(base_url: &str, api_key: &str) -> Result<String> {
    let base = Url::parse(base_url)?;
    let url = format!("{}/users/current.json", base.as_str().trim_end_matches('/'));

    let wrapper: UserWrapper = Client::new()
        .get(&url)
        .header("X-Redmine-API-Key", api_key)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("key rejected: {e}")))?
        .json()
        .await?;

    Ok(wrapper.user.login)
}
