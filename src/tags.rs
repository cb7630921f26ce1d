//! Tag resolution
//!
//! Maps a commit id to the human-readable tags pointing at it, working from
//! a raw remote ref listing. Annotated tags appear twice in such a listing:
//! once as the tag object (`refs/tags/x`) and once dereferenced
//! (`refs/tags/x^{}`) pointing at the tagged commit. The dereferenced entry
//! is authoritative for commit matching and suppresses the raw entry of the
//! same name.

use crate::git::{RemoteQuery, RemoteRef};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

const TAGS_PREFIX: &str = "refs/tags/";
const PEEL_SUFFIX: &str = "^{}";

/// Tags shown inline before collapsing the rest into a count
const DISPLAY_TAG_LIMIT: usize = 3;

/// Resolve the tags pointing at `sha` at the given remote.
///
/// Best-effort: any failure is logged and degrades to an empty list, never
/// into the caller's result.
pub fn resolve_tags(remote: &dyn RemoteQuery, url: &str, sha: &str) -> Vec<String> {
    match remote.tag_refs(url) {
        Ok(refs) => matching_tags(&refs, sha),
        Err(e) => {
            warn!("tag resolution at {url} failed, continuing without tags: {e}");
            Vec::new()
        }
    }
}

/// Collect the tag names whose resolved commit equals `sha`, sorted newest
/// first (see [`compare_tags`]).
///
/// Comparison is byte-for-byte; no case folding or abbreviation.
pub fn matching_tags(refs: &[RemoteRef], sha: &str) -> Vec<String> {
    // tag name -> (oid, came from a peeled entry)
    let mut by_name: HashMap<&str, (&str, bool)> = HashMap::new();

    for r in refs {
        let Some(name) = r.name.strip_prefix(TAGS_PREFIX) else {
            continue;
        };
        let (name, peeled) = match name.strip_suffix(PEEL_SUFFIX) {
            Some(base) => (base, true),
            None => (name, false),
        };
        match by_name.get(name) {
            // a dereferenced entry already won; the raw tag object loses
            Some((_, true)) if !peeled => {}
            _ => {
                by_name.insert(name, (r.oid.as_str(), peeled));
            }
        }
    }

    let mut tags: Vec<String> = by_name
        .into_iter()
        .filter(|(_, (oid, _))| *oid == sha)
        .map(|(name, _)| name.to_string())
        .collect();
    tags.sort_by(|a, b| compare_tags(a, b));
    tags
}

/// Order two tags newest-first.
///
/// Version-pattern tags (optional leading `v`, then MAJOR.MINOR.PATCH, any
/// suffix ignored) compare numerically descending. If either side does not
/// match the pattern, the pair falls back to reverse string comparison —
/// intentionally per-pair, so mixed sets are not a strict
/// versions-before-text order.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(va), Some(vb)) => vb.cmp(&va),
        _ => b.cmp(a),
    }
}

fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)").expect("hardcoded version pattern is valid")
    })
}

fn parse_version(tag: &str) -> Option<(u64, u64, u64)> {
    let caps = version_pattern().captures(tag)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Short display form of a commit: `<sha8>` alone when untagged, else
/// `<sha8> (<up to 3 tags>)` with a `(+K more)` suffix for the rest.
pub fn format_commit(sha: &str, tags: &[String]) -> String {
    let short = &sha[..8.min(sha.len())];
    if tags.is_empty() {
        return short.to_string();
    }

    let shown = tags
        .iter()
        .take(DISPLAY_TAG_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let hidden = tags.len().saturating_sub(DISPLAY_TAG_LIMIT);
    if hidden > 0 {
        format!("{short} ({shown} (+{hidden} more))")
    } else {
        format!("{short} ({shown})")
    }
}
