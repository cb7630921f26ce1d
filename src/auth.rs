//! Credentials for the notification boundary
//!
//! The credential is resolved once from the environment and passed into the
//! thread service explicitly, keeping the core free of ambient global state.

use crate::error::{Error, Result};
use std::env;

/// A single credential for the pull-request API
#[derive(Debug, Clone)]
pub enum Credential {
    /// OAuth bearer token (the Azure Pipelines job access token)
    Bearer(String),
    /// Personal access token, sent as basic auth with an empty user
    Pat(String),
}

/// Resolve the notification credential from the environment.
///
/// Priority:
/// 1. `SYSTEM_ACCESSTOKEN` (bearer; provided by Azure Pipelines jobs)
/// 2. `AZURE_DEVOPS_PAT` (personal access token)
///
/// Empty values count as unset; CI commonly exports empty placeholders.
pub fn credential_from_env() -> Result<Credential> {
    credential_from_values(
        env::var("SYSTEM_ACCESSTOKEN").ok(),
        env::var("AZURE_DEVOPS_PAT").ok(),
    )
}

fn credential_from_values(
    access_token: Option<String>,
    pat: Option<String>,
) -> Result<Credential> {
    if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
        return Ok(Credential::Bearer(token));
    }
    if let Some(pat) = pat.filter(|t| !t.trim().is_empty()) {
        return Ok(Credential::Pat(pat));
    }
    Err(Error::Auth(
        "no credential found; set SYSTEM_ACCESSTOKEN or AZURE_DEVOPS_PAT".to_string(),
    ))
}
