//! Check command - audit submodules and print the report

use crate::cli::style::{Stylize, check, cross, up_arrow};
use anstream::println;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use subaudit::auth::credential_from_env;
use subaudit::error::{Error, Result};
use subaudit::evaluate::{Evaluator, summarize};
use subaudit::git::{LocalRepository, RemoteClient};
use subaudit::gitmodules::{load_gitmodules, parse_gitmodules};
use subaudit::notify::{AzureDevOpsService, NotifyTarget, notify_outdated};
use subaudit::report::write_outputs;
use subaudit::tags::format_commit;
use subaudit::types::{EvaluationSummary, SubmoduleEvaluation, UpdateStatus};
use tracing::warn;

/// Options for an audit run
pub struct CheckOptions {
    /// Branch queried for declarations without an override
    pub default_branch: String,
    /// Optional `key=value` outputs file for automation
    pub outputs: Option<PathBuf>,
    /// Pull request to announce outdated submodules on
    pub notify: Option<NotifyTarget>,
}

/// Run the audit and return its summary; exit-code policy stays with the
/// caller.
pub async fn run_check(path: &Path, options: &CheckOptions) -> Result<EvaluationSummary> {
    let text = match load_gitmodules(path) {
        Ok(text) => text,
        // a repository without submodules is a clean, empty run
        Err(Error::ConfigNotFound(_)) => {
            println!("{}", "No submodules configured".muted());
            return Ok(EvaluationSummary::default());
        }
        Err(e) => return Err(e),
    };

    let declarations = parse_gitmodules(&text);
    if declarations.is_empty() {
        println!("{}", "No submodules configured".muted());
        return Ok(EvaluationSummary::default());
    }

    let local = LocalRepository::open(path)?;
    let evaluator = Evaluator::new(
        Arc::new(local),
        Arc::new(RemoteClient::new()),
        options.default_branch.clone(),
    );

    println!(
        "Checking {} submodule{}...",
        declarations.len().accent(),
        if declarations.len() == 1 { "" } else { "s" }
    );

    let evaluations = evaluator.evaluate_all(declarations).await?;

    println!();
    for evaluation in &evaluations {
        print_evaluation(evaluation);
    }

    let summary = summarize(&evaluations);
    println!();
    println!(
        "{}",
        format!(
            "{} total: {} up to date, {} outdated, {} errored",
            summary.total, summary.up_to_date, summary.needs_update, summary.errored
        )
        .emphasis()
    );

    if let Some(outputs) = &options.outputs {
        write_outputs(outputs, &summary)?;
    }

    if let Some(target) = options.notify.clone() {
        match notify(target, &evaluations).await {
            Ok(posted) => {
                println!(
                    "{}",
                    format!("{posted} pull request comment(s) posted").muted()
                );
            }
            // boundary failures are logged, never fatal to the audit
            Err(e) => warn!("pull request notification failed: {e}"),
        }
    }

    Ok(summary)
}

fn print_evaluation(evaluation: &SubmoduleEvaluation) {
    let path = &evaluation.declaration.path;
    match evaluation.status {
        UpdateStatus::UpToDate => {
            let current = evaluation.current.as_ref().expect("up-to-date resolves both");
            println!(
                "  {} {}  {}",
                check(),
                path.accent(),
                format_commit(&current.sha, &current.tags).muted()
            );
        }
        UpdateStatus::NeedsUpdate => {
            let current = evaluation.current.as_ref().expect("outdated resolves both");
            let latest = evaluation.latest.as_ref().expect("outdated resolves both");
            println!(
                "  {} {}  {} -> {} {}",
                up_arrow(),
                path.accent(),
                format_commit(&current.sha, &current.tags),
                format_commit(&latest.sha, &latest.tags),
                format!("({})", evaluation.branch_used).muted()
            );
        }
        UpdateStatus::Errored => {
            println!(
                "  {} {}  {}",
                cross(),
                path.accent(),
                evaluation
                    .error_detail
                    .as_deref()
                    .unwrap_or("resolution failed")
                    .error()
            );
        }
    }
}

async fn notify(target: NotifyTarget, evaluations: &[SubmoduleEvaluation]) -> Result<usize> {
    let credential = credential_from_env()?;
    let service = AzureDevOpsService::new(target, credential);
    notify_outdated(&service, evaluations).await
}
