//! Pull-request notification boundary
//!
//! Posts a comment thread per outdated submodule, deduplicated so repeated
//! runs against an unchanged repository never post twice. Dedup is an exact
//! match on the candidate body, which is why [`candidate_body`] must be
//! byte-stable for a given evaluation.

mod azure;

pub use azure::AzureDevOpsService;

use crate::error::Result;
use crate::tags::format_commit;
use crate::types::{SubmoduleEvaluation, UpdateStatus};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Coordinates of the pull request to notify on
#[derive(Debug, Clone)]
pub struct NotifyTarget {
    /// Organization base URL, e.g. `https://dev.azure.com/acme`
    pub organization: Url,
    /// Project name or id
    pub project: String,
    /// Repository name or id
    pub repository: String,
    /// Pull request id
    pub pull_request: u64,
}

/// An existing discussion thread on the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    /// Thread id
    pub id: u64,
    /// Bodies of the comments in the thread, in thread order
    pub comments: Vec<String>,
}

/// Thread operations on a single pull request
///
/// Abstracts the hosting service so dedup logic is testable without a
/// server.
#[async_trait]
pub trait ThreadService: Send + Sync {
    /// List all existing threads with their comment bodies
    async fn list_threads(&self) -> Result<Vec<CommentThread>>;

    /// Open a new thread whose first comment is `body`
    async fn create_thread(&self, body: &str) -> Result<()>;
}

/// Build the deterministic comment body for an outdated submodule.
///
/// Returns `None` unless the evaluation is `NeedsUpdate` with both commits
/// resolved. Identical repository state must always yield identical text;
/// the dedup below depends on it.
pub fn candidate_body(evaluation: &SubmoduleEvaluation) -> Option<String> {
    if evaluation.status != UpdateStatus::NeedsUpdate {
        return None;
    }
    let current = evaluation.current.as_ref()?;
    let latest = evaluation.latest.as_ref()?;
    Some(format!(
        "Submodule `{}` is behind `{}`: pinned at {}, latest is {}.",
        evaluation.declaration.path,
        evaluation.branch_used,
        format_commit(&current.sha, &current.tags),
        format_commit(&latest.sha, &latest.tags),
    ))
}

/// Whether `body` already appears verbatim in any existing comment
pub fn body_already_posted(threads: &[CommentThread], body: &str) -> bool {
    threads
        .iter()
        .any(|thread| thread.comments.iter().any(|comment| comment == body))
}

/// Post one comment thread per outdated evaluation, skipping bodies that
/// are already present. Returns the number of threads created.
pub async fn notify_outdated(
    service: &dyn ThreadService,
    evaluations: &[SubmoduleEvaluation],
) -> Result<usize> {
    let candidates: Vec<String> = evaluations.iter().filter_map(candidate_body).collect();
    if candidates.is_empty() {
        debug!("no outdated submodules, nothing to post");
        return Ok(0);
    }

    let threads = service.list_threads().await?;
    let mut posted = 0;
    for body in candidates {
        if body_already_posted(&threads, &body) {
            debug!("comment already present, skipping: {body}");
            continue;
        }
        service.create_thread(&body).await?;
        posted += 1;
    }
    Ok(posted)
}
