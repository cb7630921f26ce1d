//! Error types for subaudit

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a notification boundary failure, derived from the
/// HTTP response status. Used for logging only; callers never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationErrorKind {
    /// Credential was rejected (401)
    Authentication,
    /// Credential lacks access to the pull request (403)
    Permission,
    /// Organization, project, repository, or pull request not found (404)
    NotFound,
    /// Anything else, including transport failures
    Other,
}

impl fmt::Display for NotificationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Authentication => "authentication",
            Self::Permission => "permission",
            Self::NotFound => "not-found",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// All errors produced by this crate
#[derive(Error, Debug)]
pub enum Error {
    /// The submodule configuration file does not exist
    #[error("submodule configuration not found: {0}")]
    ConfigNotFound(PathBuf),

    /// The pinned commit for a submodule path could not be resolved
    /// from the parent repository's tree
    #[error("cannot resolve pinned commit: {0}")]
    CommitResolution(String),

    /// The latest commit on a remote branch could not be resolved
    /// (unreachable remote, auth failure, or missing branch)
    #[error("cannot resolve remote branch: {0}")]
    RemoteResolution(String),

    /// Tag enumeration at a remote failed; always downgraded to an
    /// empty tag list by the tag resolver
    #[error("cannot resolve tags: {0}")]
    TagResolution(String),

    /// A pull-request notification call failed
    #[error("notification failed ({kind}): {message}")]
    Notification {
        /// Status-derived classification for logging
        kind: NotificationErrorKind,
        /// Human-readable failure detail
        message: String,
    },

    /// No usable credential in the environment
    #[error("authentication error: {0}")]
    Auth(String),

    /// Underlying libgit2 failure
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Underlying HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violation that should not occur in normal operation
    #[error("internal error: {0}")]
    Internal(String),
}
