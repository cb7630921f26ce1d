//! Submodule evaluation
//!
//! Combines the git ports and the tag resolver to classify each declared
//! submodule, plus the pure aggregation of results into a summary.

use crate::error::{Error, Result};
use crate::git::{RemoteQuery, TreeQuery};
use crate::tags::resolve_tags;
use crate::types::{
    EvaluationSummary, ResolvedCommit, SubmoduleDeclaration, SubmoduleEvaluation, UpdateStatus,
};
use std::sync::Arc;
use tokio::task;
use tracing::debug;

/// Evaluates declarations against the local checkout and their remotes
#[derive(Clone)]
pub struct Evaluator {
    tree: Arc<dyn TreeQuery>,
    remote: Arc<dyn RemoteQuery>,
    default_branch: String,
}

impl Evaluator {
    /// Create an evaluator over the given query ports
    pub fn new(
        tree: Arc<dyn TreeQuery>,
        remote: Arc<dyn RemoteQuery>,
        default_branch: impl Into<String>,
    ) -> Self {
        Self {
            tree,
            remote,
            default_branch: default_branch.into(),
        }
    }

    /// Evaluate a single declaration.
    ///
    /// Resolution failures fold into the returned record as `Errored` with
    /// the failure message; tag resolution is skipped in that case. Tag
    /// failures on the success path degrade to empty tag lists.
    pub fn evaluate(&self, declaration: &SubmoduleDeclaration) -> SubmoduleEvaluation {
        let branch_used = declaration
            .branch
            .clone()
            .unwrap_or_else(|| self.default_branch.clone());
        debug!(
            "evaluating {} against {}#{branch_used}",
            declaration.path, declaration.url
        );

        let current_sha = match self.tree.gitlink_commit(&declaration.path) {
            Ok(sha) => sha,
            Err(e) => return errored(declaration, branch_used, None, &e),
        };

        let latest_sha = match self.remote.branch_head(&declaration.url, &branch_used) {
            Ok(sha) => sha,
            Err(e) => {
                let current = Some(ResolvedCommit::untagged(current_sha));
                return errored(declaration, branch_used, current, &e);
            }
        };

        let status = if current_sha == latest_sha {
            UpdateStatus::UpToDate
        } else {
            UpdateStatus::NeedsUpdate
        };

        let current = ResolvedCommit {
            tags: resolve_tags(self.remote.as_ref(), &declaration.url, &current_sha),
            sha: current_sha,
        };
        let latest = ResolvedCommit {
            tags: resolve_tags(self.remote.as_ref(), &declaration.url, &latest_sha),
            sha: latest_sha,
        };

        SubmoduleEvaluation {
            declaration: declaration.clone(),
            branch_used,
            current: Some(current),
            latest: Some(latest),
            status,
            error_detail: None,
        }
    }

    /// Evaluate all declarations concurrently, one blocking task each.
    ///
    /// Handles are awaited in spawn order, so results come back in
    /// declaration order regardless of completion order. A failing remote
    /// only affects its own record; siblings keep evaluating.
    pub async fn evaluate_all(
        &self,
        declarations: Vec<SubmoduleDeclaration>,
    ) -> Result<Vec<SubmoduleEvaluation>> {
        let mut handles = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let evaluator = self.clone();
            handles.push(task::spawn_blocking(move || {
                evaluator.evaluate(&declaration)
            }));
        }

        let mut evaluations = Vec::with_capacity(handles.len());
        for handle in handles {
            let evaluation = handle
                .await
                .map_err(|e| Error::Internal(format!("evaluation task failed: {e}")))?;
            evaluations.push(evaluation);
        }
        Ok(evaluations)
    }
}

fn errored(
    declaration: &SubmoduleDeclaration,
    branch_used: String,
    current: Option<ResolvedCommit>,
    error: &Error,
) -> SubmoduleEvaluation {
    SubmoduleEvaluation {
        declaration: declaration.clone(),
        branch_used,
        current,
        latest: None,
        status: UpdateStatus::Errored,
        error_detail: Some(error.to_string()),
    }
}

/// Summarize evaluations into counts and the outdated path list.
///
/// Pure; recomputed fresh from the full list each run. `outdated_paths`
/// preserves input order.
pub fn summarize(evaluations: &[SubmoduleEvaluation]) -> EvaluationSummary {
    let mut summary = EvaluationSummary {
        total: evaluations.len(),
        ..EvaluationSummary::default()
    };
    for evaluation in evaluations {
        match evaluation.status {
            UpdateStatus::UpToDate => summary.up_to_date += 1,
            UpdateStatus::NeedsUpdate => {
                summary.needs_update += 1;
                summary
                    .outdated_paths
                    .push(evaluation.declaration.path.clone());
            }
            UpdateStatus::Errored => summary.errored += 1,
        }
    }
    summary
}
