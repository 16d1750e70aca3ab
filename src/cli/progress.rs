//! CLI progress callback with styled per-row output

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url};
use anstream::{eprintln, println};
use async_trait::async_trait;
use rowmine::submit::{Outcome, Phase, ProgressCallback, RowFault, RowReport, SubmitSummary};

/// Progress callback that prints one styled line per row event
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        println!("{}...", phase.to_string().emphasis());
    }

    async fn on_row(&self, row: usize, report: &RowReport) {
        match &report.outcome {
            Outcome::Created(issue) => {
                let id = format!("#{}", issue.id);
                println!(
                    "  {} row {row}: created issue {} `{}`",
                    check(),
                    id.accent(),
                    issue.subject
                );
                println!("    {}", hyperlink_url(Stream::Stdout, &issue.url));
            }
            Outcome::SkippedDuplicate => {
                println!("  {} row {row}: {}", "-".muted(), "duplicate, skipped".muted());
            }
            Outcome::Failed(failure) => {
                eprintln!(
                    "  {} row {row}: failed [{}]: {}",
                    cross(),
                    failure.classification,
                    failure.message.error()
                );
            }
        }
    }

    async fn on_fault(&self, row: usize, fault: &RowFault) {
        eprintln!("  {} row {row}: {}", "!".warn(), fault.message.warn());
    }

    async fn on_summary(&self, summary: &SubmitSummary) {
        println!();
        let created = summary.created.len();
        if summary.success() {
            println!(
                "{} {created} created, {} skipped across {} row{}",
                check(),
                summary.skipped,
                summary.rows,
                if summary.rows == 1 { "" } else { "s" }
            );
        } else {
            eprintln!(
                "{} {created} created, {} skipped, {} failed across {} row{}",
                cross(),
                summary.skipped,
                summary.failed,
                summary.rows,
                if summary.rows == 1 { "" } else { "s" }
            );
        }
        if summary.faults > 0 {
            eprintln!(
                "  {} {} value fault{} recorded",
                "!".warn(),
                summary.faults,
                if summary.faults == 1 { "" } else { "s" }
            );
        }
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
