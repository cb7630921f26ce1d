//! Test data factories and git fixture repositories
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::path::{Path, PathBuf};
use subaudit::types::{ResolvedCommit, SubmoduleDeclaration, SubmoduleEvaluation, UpdateStatus};
use tempfile::TempDir;

/// Create a declaration with default values
pub fn make_declaration(path: &str, url: &str) -> SubmoduleDeclaration {
    SubmoduleDeclaration {
        path: path.to_string(),
        url: url.to_string(),
        branch: None,
    }
}

/// Create a declaration tracking a specific branch
pub fn make_declaration_on_branch(path: &str, url: &str, branch: &str) -> SubmoduleDeclaration {
    SubmoduleDeclaration {
        branch: Some(branch.to_string()),
        ..make_declaration(path, url)
    }
}

/// A deterministic full-length sha built from a short marker
pub fn make_sha(marker: char) -> String {
    std::iter::repeat(marker).take(40).collect()
}

/// Create a `NeedsUpdate` evaluation between two shas
pub fn make_outdated_evaluation(path: &str, current: &str, latest: &str) -> SubmoduleEvaluation {
    SubmoduleEvaluation {
        declaration: make_declaration(path, "https://example.com/dep.git"),
        branch_used: "main".to_string(),
        current: Some(ResolvedCommit::untagged(current.to_string())),
        latest: Some(ResolvedCommit::untagged(latest.to_string())),
        status: UpdateStatus::NeedsUpdate,
        error_detail: None,
    }
}

/// An upstream repository serving as a submodule's remote over the local
/// transport
pub struct UpstreamRepo {
    dir: TempDir,
    repo: Repository,
}

impl UpstreamRepo {
    /// Initialize with `main` as the initial branch
    pub fn init() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir, repo }
    }

    /// Path usable as a remote URL (git2 local transport accepts plain paths)
    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Commit a file change on the current branch and return the commit id
    pub fn commit(&self, file: &str, content: &str) -> Oid {
        std::fs::write(self.dir.path().join(file), content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let sig = Signature::now("Fixture", "fixture@example.com").unwrap();
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, file, &tree, &parent_refs)
            .unwrap()
    }

    /// Attach a lightweight tag to a commit
    pub fn tag_lightweight(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    /// Attach an annotated tag to a commit
    pub fn tag_annotated(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        let sig = Signature::now("Fixture", "fixture@example.com").unwrap();
        self.repo
            .tag(name, &object, &sig, &format!("release {name}"), false)
            .unwrap();
    }

    /// Create a branch pointing at a commit
    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }
}

/// A parent repository with gitlink entries and a `.gitmodules` file
pub struct ParentRepo {
    dir: TempDir,
    repo: Repository,
    gitmodules: String,
    gitlinks: Vec<(String, Oid)>,
}

impl ParentRepo {
    /// Initialize with `main` as the initial branch
    pub fn init() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self {
            dir,
            repo,
            gitmodules: String::new(),
            gitlinks: Vec::new(),
        }
    }

    /// Repository root path
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Declare a submodule in `.gitmodules` and pin it at `commit`
    pub fn add_submodule(&mut self, path: &str, url: &str, branch: Option<&str>, commit: Oid) {
        self.gitmodules
            .push_str(&format!("[submodule \"{path}\"]\n\tpath = {path}\n\turl = {url}\n"));
        if let Some(branch) = branch {
            self.gitmodules.push_str(&format!("\tbranch = {branch}\n"));
        }
        self.gitlinks.push((path.to_string(), commit));
    }

    /// Write `.gitmodules`, stage the gitlinks, and commit everything
    pub fn commit(&self) {
        std::fs::write(self.dir.path().join(".gitmodules"), &self.gitmodules).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(".gitmodules")).unwrap();

        for (path, oid) in &self.gitlinks {
            index.add(&gitlink_entry(path, *oid)).unwrap();
        }
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Fixture", "fixture@example.com").unwrap();
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, "pin submodules", &tree, &parent_refs)
            .unwrap();
    }

    /// Stage a regular file (used to test the not-a-gitlink failure)
    pub fn add_regular_file(&self, path: &str, content: &str) {
        std::fs::write(self.dir.path().join(path), content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
    }
}

/// Raw index entry recording a commit id at `path` (mode 160000)
fn gitlink_entry(path: &str, oid: Oid) -> git2::IndexEntry {
    git2::IndexEntry {
        ctime: git2::IndexTime::new(0, 0),
        mtime: git2::IndexTime::new(0, 0),
        dev: 0,
        ino: 0,
        mode: 0o160000,
        uid: 0,
        gid: 0,
        file_size: 0,
        id: oid,
        flags: 0,
        flags_extended: 0,
        path: path.as_bytes().to_vec(),
    }
}
