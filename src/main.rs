//! rowmine - row-driven issue submission
//!
//! CLI binary for creating tracker issues from CSV row streams.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "rowmine")]
#[command(about = "Create Redmine issues from tabular row streams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit rows from a CSV file as tracker issues
    Submit(cli::SubmitArgs),

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication against the tracker
    Test {
        /// Tracker base URL
        #[arg(long)]
        url: String,

        /// API key (falls back to REDMINE_API_KEY / REDMINE_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit(args) => {
            cli::run_submit(args).await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test { url, token } => {
                cli::run_auth_test(&url, token.as_deref()).await?;
            }
            AuthAction::Setup => {
                cli::run_auth_setup();
            }
        },
    }

    Ok(())
}
