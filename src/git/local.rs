//! Local repository tree lookups via git2

use crate::error::{Error, Result};
use crate::git::TreeQuery;
use git2::{ObjectType, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`TreeQuery`] implementation over the working checkout.
///
/// Holds only the repository path: `git2::Repository` is not `Sync`, so each
/// lookup opens its own handle, which keeps the type shareable across the
/// blocking worker threads the evaluator fans out on.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    path: PathBuf,
}

impl LocalRepository {
    /// Create a handle for the repository at `path`, verifying it opens
    pub fn open(path: &Path) -> Result<Self> {
        Repository::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl TreeQuery for LocalRepository {
    fn gitlink_commit(&self, submodule_path: &str) -> Result<String> {
        let repo = Repository::open(&self.path)?;
        let tree = repo
            .head()
            .and_then(|head| head.peel_to_tree())
            .map_err(|e| Error::CommitResolution(format!("cannot read HEAD tree: {e}")))?;

        let entry = tree.get_path(Path::new(submodule_path)).map_err(|e| {
            Error::CommitResolution(format!("no tree entry for '{submodule_path}': {e}"))
        })?;

        if entry.kind() != Some(ObjectType::Commit) {
            return Err(Error::CommitResolution(format!(
                "tree entry for '{submodule_path}' is not a gitlink"
            )));
        }

        let sha = entry.id().to_string();
        debug!("{submodule_path} pinned at {sha}");
        Ok(sha)
    }
}
