//! Core types for subaudit

use serde::{Deserialize, Serialize};

/// A submodule declared in the parent repository's configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmoduleDeclaration {
    /// Path of the submodule relative to the repository root
    pub path: String,
    /// Remote fetch URL of the submodule repository
    pub url: String,
    /// Branch override; when absent the configured default branch is used
    pub branch: Option<String>,
}

/// A commit reference enriched with the tags pointing at it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedCommit {
    /// Full 40-hex commit id, compared byte-for-byte
    pub sha: String,
    /// Tag names pointing at this commit, newest first; empty when untagged
    pub tags: Vec<String>,
}

impl ResolvedCommit {
    /// A commit with no tags attached yet
    pub const fn untagged(sha: String) -> Self {
        Self { sha, tags: Vec::new() }
    }
}

/// Update classification of a single submodule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateStatus {
    /// Pinned and latest commit are identical
    UpToDate,
    /// Both commits resolved and differ
    NeedsUpdate,
    /// Resolution of either commit failed
    Errored,
}

/// The full evaluation result for one declared submodule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmoduleEvaluation {
    /// The declaration this evaluation was computed for
    pub declaration: SubmoduleDeclaration,
    /// Branch actually queried at the remote
    pub branch_used: String,
    /// Commit pinned by the parent repository, if resolution succeeded
    pub current: Option<ResolvedCommit>,
    /// Latest commit on the tracked branch, if resolution succeeded
    pub latest: Option<ResolvedCommit>,
    /// Update classification; statuses are mutually exclusive
    pub status: UpdateStatus,
    /// Failure message when `status` is `Errored`
    pub error_detail: Option<String>,
}

/// Aggregated counts over a set of evaluations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Number of evaluated submodules
    pub total: usize,
    /// Submodules whose pinned commit matches the branch tip
    pub up_to_date: usize,
    /// Submodules pinned behind (or apart from) the branch tip
    pub needs_update: usize,
    /// Submodules whose resolution failed
    pub errored: usize,
    /// Paths of `NeedsUpdate` submodules, in declaration order
    pub outdated_paths: Vec<String>,
}
