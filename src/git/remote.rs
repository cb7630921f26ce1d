//! Remote ref listing via git2
//!
//! Uses a detached anonymous remote and a fetch-direction connect to list
//! refs without cloning, the same shape `git ls-remote` produces: one entry
//! per ref, with annotated tags additionally reported as a peeled `^{}`
//! entry pointing at the underlying commit.

use crate::error::{Error, Result};
use crate::git::{RemoteQuery, RemoteRef};
use git2::Direction;
use tracing::debug;

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";

/// Stateless [`RemoteQuery`] implementation; every call is a single
/// blocking network round trip
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteClient;

impl RemoteClient {
    /// Create a remote client
    pub const fn new() -> Self {
        Self
    }

    // Error kind is chosen by the caller: the same listing backs branch
    // resolution (hard failure) and tag resolution (soft failure).
    fn list(url: &str) -> std::result::Result<Vec<RemoteRef>, String> {
        let mut remote = git2::Remote::create_detached(url)
            .map_err(|e| format!("invalid remote '{url}': {e}"))?;
        remote
            .connect(Direction::Fetch)
            .map_err(|e| format!("cannot reach '{url}': {e}"))?;

        let refs = remote
            .list()
            .map_err(|e| format!("listing refs at '{url}': {e}"))?
            .iter()
            .map(|head| RemoteRef::new(head.name(), head.oid().to_string()))
            .collect::<Vec<_>>();

        debug!("listed {} ref(s) at {url}", refs.len());
        Ok(refs)
    }
}

impl RemoteQuery for RemoteClient {
    fn branch_head(&self, url: &str, branch: &str) -> Result<String> {
        let refname = format!("{HEADS_PREFIX}{branch}");
        Self::list(url)
            .map_err(Error::RemoteResolution)?
            .into_iter()
            .find(|r| r.name == refname)
            .map(|r| r.oid)
            .ok_or_else(|| {
                Error::RemoteResolution(format!("branch '{branch}' not found at '{url}'"))
            })
    }

    fn tag_refs(&self, url: &str) -> Result<Vec<RemoteRef>> {
        Ok(Self::list(url)
            .map_err(Error::TagResolution)?
            .into_iter()
            .filter(|r| r.name.starts_with(TAGS_PREFIX))
            .collect())
    }
}
