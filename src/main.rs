//! subaudit - audit git submodules against their upstream branches
//!
//! CLI binary; evaluation and notification logic live in the library.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use subaudit::notify::NotifyTarget;
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;

#[derive(Parser)]
#[command(name = "subaudit")]
#[command(about = "Audit git submodules against their tracked upstream branches")]
#[command(version)]
struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AuditArgs {
    /// Branch to query when a submodule declares no branch override
    #[arg(long, default_value = "main")]
    default_branch: String,

    /// Append key=value outputs for automation to this file
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// Exit non-zero when any submodule needs an update
    #[arg(long)]
    fail_on_outdated: bool,

    /// Exit non-zero when any submodule could not be evaluated
    #[arg(long)]
    fail_on_error: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit submodules and print a report
    Check {
        #[command(flatten)]
        audit: AuditArgs,
    },

    /// Audit submodules and comment on a pull request for outdated ones
    Notify {
        #[command(flatten)]
        audit: AuditArgs,

        /// Organization base URL, e.g. https://dev.azure.com/acme
        #[arg(long)]
        organization: Url,

        /// Project name or id
        #[arg(long)]
        project: String,

        /// Repository name or id
        #[arg(long)]
        repository: String,

        /// Pull request id to comment on
        #[arg(long)]
        pull_request: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // soft failures (tag resolution, notifications) surface at warn level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));

    let (audit, notify) = match args.command {
        Commands::Check { audit } => (audit, None),
        Commands::Notify {
            audit,
            organization,
            project,
            repository,
            pull_request,
        } => (
            audit,
            Some(NotifyTarget {
                organization,
                project,
                repository,
                pull_request,
            }),
        ),
    };

    let options = cli::CheckOptions {
        default_branch: audit.default_branch.clone(),
        outputs: audit.outputs.clone(),
        notify,
    };
    let summary = cli::run_check(&path, &options).await?;

    // exit-code policy lives here; the library only classifies
    let outdated_failure = audit.fail_on_outdated && summary.needs_update > 0;
    let errored_failure = audit.fail_on_error && summary.errored > 0;
    if outdated_failure || errored_failure {
        std::process::exit(1);
    }

    Ok(())
}
