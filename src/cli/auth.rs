//! Auth command - verify and explain tracker authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use rowmine::auth::{KeySource, resolve_api_key, test_auth};
use rowmine::error::Result;

/// Test authentication against the tracker and report the login
pub async fn run_auth_test(url: &str, token: Option<&str>) -> Result<()> {
    let api_key = resolve_api_key(token)?;
    let source = match api_key.source {
        KeySource::Flag => "--token flag",
        KeySource::EnvVar => "environment variable",
    };

    let login = test_auth(url, &api_key.key).await?;

    println!(
        "{} authenticated as {} (key from {})",
        check(),
        login.emphasis(),
        source.muted()
    );
    Ok(())
}

/// Print authentication setup instructions
pub fn run_auth_setup() {
    println!("{}", "Tracker authentication".emphasis());
    println!();
    println!("rowmine authenticates with a personal API key:");
    println!("  1. Sign in to your tracker and open 'My account'");
    println!("  2. Copy the API access key from the right-hand panel");
    println!(
        "  3. Export it as {} (or pass {} per invocation)",
        "REDMINE_API_KEY".accent(),
        "--token".accent()
    );
}
