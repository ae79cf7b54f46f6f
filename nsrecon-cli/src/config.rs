//! Process configuration.
//!
//! Everything is resolved once at startup into a [`Config`] that the
//! command handlers borrow; nothing reads the environment mid-run.
//! Precedence for each setting: CLI flag, then environment variable,
//! then default.

use crate::error::{CliError, CliResult};
use std::time::Duration;

pub const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr/fedora4/";
pub const DEFAULT_FCREPO_URL: &str = "http://fcrepo-local:8080/fcrepo/rest";

const SOLR_URL_VAR: &str = "SOLR_URL";
const FCREPO_URL_VAR: &str = "FCREPO_REST_ENDPOINT";
const WAIT_SECONDS_VAR: &str = "WAIT_SECONDS";
const DRY_RUN_VAR: &str = "DRY_RUN";
const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";

/// Resolved process configuration, built once at entry.
#[derive(Debug, Clone)]
pub struct Config {
    /// Solr core URL for the resolve stage.
    pub solr_url: String,
    /// Fedora REST base endpoint for the patch stage.
    pub fcrepo_url: String,
    /// Optional pause applied after each processed row.
    pub wait: Option<Duration>,
    /// When set, the patch stage synthesizes and logs updates without
    /// submitting them.
    pub dry_run: bool,
    /// Bearer token for the repository, if present in the environment.
    auth_token: Option<String>,
}

impl Config {
    /// Resolve configuration from flags and the environment.
    pub fn resolve(
        solr_url: Option<String>,
        fcrepo_url: Option<String>,
        wait: Option<u64>,
        dry_run: bool,
    ) -> CliResult<Self> {
        let wait_secs = match wait {
            Some(n) => Some(n),
            None => parse_env_seconds(WAIT_SECONDS_VAR)?,
        };

        Ok(Self {
            solr_url: solr_url
                .or_else(|| env_nonempty(SOLR_URL_VAR))
                .unwrap_or_else(|| DEFAULT_SOLR_URL.to_string()),
            fcrepo_url: fcrepo_url
                .or_else(|| env_nonempty(FCREPO_URL_VAR))
                .unwrap_or_else(|| DEFAULT_FCREPO_URL.to_string()),
            wait: wait_secs.filter(|n| *n > 0).map(Duration::from_secs),
            dry_run: dry_run || env_nonempty(DRY_RUN_VAR).is_some_and(|v| is_truthy(&v)),
            auth_token: env_nonempty(AUTH_TOKEN_VAR),
        })
    }

    /// The bearer token, required before the patch stage touches any row.
    pub fn require_auth_token(&self) -> CliResult<&str> {
        self.auth_token.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "bearer token environment variable ({AUTH_TOKEN_VAR}) is missing"
            ))
        })
    }

}

fn env_nonempty(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_env_seconds(var: &str) -> CliResult<Option<u64>> {
    env_nonempty(var)
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| CliError::Config(format!("{var} must be a whole number of seconds, got '{s}'")))
        })
        .transpose()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
