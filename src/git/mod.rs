//! Git query ports
//!
//! The evaluator and tag resolver talk to git through two narrow, read-only
//! capabilities so they can be tested without a repository or network:
//! [`TreeQuery`] for the parent checkout and [`RemoteQuery`] for upstream
//! repositories.

mod local;
mod remote;

pub use local::LocalRepository;
pub use remote::RemoteClient;

use crate::error::Result;

/// A single entry from a remote ref listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    /// Full ref name, e.g. `refs/tags/v1.2.0` or `refs/tags/v1.2.0^{}`
    pub name: String,
    /// Object id the ref points at
    pub oid: String,
}

impl RemoteRef {
    /// Convenience constructor used heavily in tests
    pub fn new(name: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oid: oid.into(),
        }
    }
}

/// Read-only queries against the parent repository's current checkout
pub trait TreeQuery: Send + Sync {
    /// Resolve the commit id recorded for `submodule_path` in the HEAD tree.
    ///
    /// The entry must be a commit-kind gitlink; a missing path or an entry
    /// of any other kind fails with `Error::CommitResolution`.
    fn gitlink_commit(&self, submodule_path: &str) -> Result<String>;
}

/// Read-only queries against a remote repository, addressed by URL,
/// requiring no local clone
pub trait RemoteQuery: Send + Sync {
    /// Resolve the tip commit of `refs/heads/<branch>` at the remote
    fn branch_head(&self, url: &str, branch: &str) -> Result<String>;

    /// Enumerate all tag refs at the remote, including the dereferenced
    /// `^{}` entries the transport reports for annotated tags
    fn tag_refs(&self, url: &str) -> Result<Vec<RemoteRef>>;
}
