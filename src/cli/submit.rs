//! Submit command - create tracker issues from a CSV row stream

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::println;
use clap::Args;
use rowmine::auth::resolve_api_key;
use rowmine::config::{SubmitConfig, ValueSource};
use rowmine::error::Result;
use rowmine::feed::CsvFeed;
use rowmine::submit::{Phase, ProgressCallback, RetryPolicy, SubmitSession, submit_rows};
use rowmine::tracker::RedmineService;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the submit command
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// CSV file with the rows to submit
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Tracker base URL
    #[arg(long)]
    pub url: String,

    /// API key (falls back to REDMINE_API_KEY / REDMINE_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Target project key
    #[arg(long, short = 'p')]
    pub project: String,

    /// Static issue subject
    #[arg(long, conflicts_with = "subject_field")]
    pub subject: Option<String>,

    /// Column to read the subject from
    #[arg(long)]
    pub subject_field: Option<String>,

    /// Static issue description
    #[arg(long, conflicts_with = "description_field")]
    pub description: Option<String>,

    /// Column to read the description from
    #[arg(long)]
    pub description_field: Option<String>,

    /// Static category id
    #[arg(long)]
    pub category: Option<String>,

    /// Static assignee user id
    #[arg(long, conflicts_with = "assigned_to_field")]
    pub assigned_to: Option<String>,

    /// Column to read the assignee user id from
    #[arg(long)]
    pub assigned_to_field: Option<String>,

    /// Create issues without checking for duplicates
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Match duplicates on the resolved subject
    #[arg(long)]
    pub search_subject: bool,

    /// Restrict the duplicate search to open issues
    #[arg(long)]
    pub search_status: bool,

    /// CSV field delimiter
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retry transient tracker errors up to N times (0 disables retry)
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Dry run - resolve drafts without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [b] => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got `{s}`")),
    }
}

fn value_source(static_value: Option<String>, field: Option<String>) -> ValueSource {
    field.map_or_else(
        || ValueSource::Literal(static_value.unwrap_or_default()),
        ValueSource::Field,
    )
}

/// Run the submit command
pub async fn run_submit(args: SubmitArgs) -> Result<()> {
    let api_key = resolve_api_key(args.token.as_deref())?;
    let service = RedmineService::new(
        &args.url,
        api_key.key,
        Some(Duration::from_secs(args.timeout_secs)),
    )?;

    let config = SubmitConfig {
        project_key: args.project,
        subject: value_source(args.subject, args.subject_field),
        description: value_source(args.description, args.description_field),
        category: args.category,
        assigned_to: match (args.assigned_to, args.assigned_to_field) {
            (_, Some(field)) => Some(ValueSource::Field(field)),
            (Some(id), None) => Some(ValueSource::Literal(id)),
            (None, None) => None,
        },
        allow_duplicates: args.allow_duplicates,
        search_by_subject: args.search_subject,
        search_by_status: args.search_status,
    };

    let feed = CsvFeed::open(&args.input, args.delimiter)?;

    println!(
        "Submitting rows from {} to project {}",
        args.input.display().to_string().accent(),
        config.project_key.emphasis()
    );

    let progress = CliProgress;
    progress.on_phase(Phase::Preparing).await;

    let mut session = SubmitSession::new(config, &service);
    if args.retries > 0 {
        session = session.with_retry(RetryPolicy {
            max_retries: args.retries,
            ..RetryPolicy::default()
        });
    }
    session.prepare(feed.schema())?;

    submit_rows(&mut session, feed, &progress, args.dry_run).await?;

    Ok(())
}
