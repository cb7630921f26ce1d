//! subaudit - submodule update auditing
//!
//! Parses the submodules a repository declares, resolves each one's pinned
//! commit and the latest commit on its tracked branch, enriches both with
//! release tags, and classifies every submodule as up to date, needing an
//! update, or errored. Results aggregate into a summary for console and
//! automation consumers, and outdated submodules can be announced on a pull
//! request with exact-match deduplication so repeated runs stay idempotent.

pub mod auth;
pub mod error;
pub mod evaluate;
pub mod git;
pub mod gitmodules;
pub mod notify;
pub mod report;
pub mod tags;
pub mod types;
