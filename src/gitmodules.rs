//! `.gitmodules` parsing
//!
//! Turns the declarative submodule configuration into an ordered list of
//! [`SubmoduleDeclaration`]s. The format is INI-like: repeating
//! `[submodule "<name>"]` sections with `path`, `url`, and optionally
//! `branch` keys.

use crate::error::{Error, Result};
use crate::types::SubmoduleDeclaration;
use std::path::Path;
use tracing::debug;

/// File name of the submodule configuration at the repository root
pub const GITMODULES_FILE: &str = ".gitmodules";

/// Fields collected for the section currently being parsed
#[derive(Default)]
struct PendingSection {
    path: Option<String>,
    url: Option<String>,
    branch: Option<String>,
}

impl PendingSection {
    /// A section becomes a declaration only when both path and url were set
    fn into_declaration(self) -> Option<SubmoduleDeclaration> {
        match (self.path, self.url) {
            (Some(path), Some(url)) => Some(SubmoduleDeclaration {
                path,
                url,
                branch: self.branch,
            }),
            _ => None,
        }
    }
}

/// Read the submodule configuration of the repository at `repo_root`.
///
/// A missing file is [`Error::ConfigNotFound`]; callers decide whether that
/// means "zero submodules" or a hard failure.
pub fn load_gitmodules(repo_root: &Path) -> Result<String> {
    let path = repo_root.join(GITMODULES_FILE);
    if !path.is_file() {
        return Err(Error::ConfigNotFound(path));
    }
    Ok(std::fs::read_to_string(&path)?)
}

/// Parse submodule configuration text into declarations, in order of
/// appearance.
///
/// Sections missing `path` or `url` are dropped silently so comment-only or
/// malformed blocks never fail the whole parse. Unknown keys are ignored,
/// key order within a section does not matter, and duplicate paths are
/// passed through unchecked.
pub fn parse_gitmodules(text: &str) -> Vec<SubmoduleDeclaration> {
    let mut declarations = Vec::new();
    // None outside any submodule section (preamble or foreign sections)
    let mut current: Option<PendingSection> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            if let Some(section) = current.take() {
                declarations.extend(section.into_declaration());
            }
            if is_submodule_header(line) {
                current = Some(PendingSection::default());
            }
            continue;
        }

        let Some(section) = current.as_mut() else {
            continue;
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "path" => section.path = Some(value),
            "url" => section.url = Some(value),
            "branch" => section.branch = Some(value),
            _ => {}
        }
    }

    if let Some(section) = current.take() {
        declarations.extend(section.into_declaration());
    }

    debug!("parsed {} submodule declaration(s)", declarations.len());
    declarations
}

fn is_submodule_header(line: &str) -> bool {
    line.strip_prefix("[submodule")
        .is_some_and(|rest| rest.trim_start().starts_with('"') || rest.trim() == "]")
}
