//! Mock git query ports for testing
//!
//! Hand-written mocks with configurable responses, error injection, and
//! call tracking, in the same shape as the thread-service mock.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use subaudit::error::{Error, Result};
use subaudit::git::{RemoteQuery, RemoteRef, TreeQuery};

/// Mock of the parent-tree port
#[derive(Default)]
pub struct MockTreeQuery {
    pins: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockTreeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pinned sha for a submodule path
    pub fn pin(&self, path: &str, sha: &str) {
        self.pins
            .lock()
            .unwrap()
            .insert(path.to_string(), sha.to_string());
    }

    /// Paths that were looked up, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TreeQuery for MockTreeQuery {
    fn gitlink_commit(&self, submodule_path: &str) -> Result<String> {
        self.calls.lock().unwrap().push(submodule_path.to_string());
        self.pins
            .lock()
            .unwrap()
            .get(submodule_path)
            .cloned()
            .ok_or_else(|| {
                Error::CommitResolution(format!("no tree entry for '{submodule_path}'"))
            })
    }
}

/// Mock of the remote port
#[derive(Default)]
pub struct MockRemoteQuery {
    heads: Mutex<HashMap<(String, String), String>>,
    tags: Mutex<HashMap<String, Vec<RemoteRef>>>,
    unreachable: Mutex<Vec<String>>,
    head_calls: Mutex<Vec<(String, String)>>,
    tag_calls: Mutex<Vec<String>>,
}

impl MockRemoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the branch tip for a url/branch pair
    pub fn set_head(&self, url: &str, branch: &str, sha: &str) {
        self.heads
            .lock()
            .unwrap()
            .insert((url.to_string(), branch.to_string()), sha.to_string());
    }

    /// Record the tag listing for a url
    pub fn set_tags(&self, url: &str, refs: Vec<RemoteRef>) {
        self.tags.lock().unwrap().insert(url.to_string(), refs);
    }

    /// Make every query against `url` fail like a network error
    pub fn set_unreachable(&self, url: &str) {
        self.unreachable.lock().unwrap().push(url.to_string());
    }

    /// url/branch pairs `branch_head` was called with
    pub fn head_calls(&self) -> Vec<(String, String)> {
        self.head_calls.lock().unwrap().clone()
    }

    /// urls `tag_refs` was called with
    pub fn tag_calls(&self) -> Vec<String> {
        self.tag_calls.lock().unwrap().clone()
    }

    fn check_reachable(&self, url: &str) -> Result<()> {
        if self.unreachable.lock().unwrap().iter().any(|u| u == url) {
            return Err(Error::RemoteResolution(format!("cannot reach '{url}'")));
        }
        Ok(())
    }
}

impl RemoteQuery for MockRemoteQuery {
    fn branch_head(&self, url: &str, branch: &str) -> Result<String> {
        self.head_calls
            .lock()
            .unwrap()
            .push((url.to_string(), branch.to_string()));
        self.check_reachable(url)?;
        self.heads
            .lock()
            .unwrap()
            .get(&(url.to_string(), branch.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::RemoteResolution(format!("branch '{branch}' not found at '{url}'"))
            })
    }

    fn tag_refs(&self, url: &str) -> Result<Vec<RemoteRef>> {
        self.tag_calls.lock().unwrap().push(url.to_string());
        self.check_reachable(url)
            .map_err(|e| Error::TagResolution(e.to_string()))?;
        Ok(self
            .tags
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default())
    }
}
