//! Authentication for GitHub
//!
//! The bot runs unattended, so only environment variables are consulted.

use crate::error::{Error, Result};
use tracing::debug;

/// Environment variables checked for a token, in order
pub const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Variable the token came from
    pub source: &'static str,
}

/// Read the GitHub token from the environment
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    auth_from(|var| std::env::var(var).ok())
}

fn auth_from(lookup: impl Fn(&str) -> Option<String>) -> Result<GitHubAuthConfig> {
    for &var in TOKEN_VARS {
        if let Some(token) = lookup(var).filter(|t| !t.trim().is_empty()) {
            debug!(source = var, "found GitHub token");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source: var,
            });
        }
    }
    Err(Error::Auth(format!(
        "no GitHub token found; set {}",
        TOKEN_VARS.join(" or ")
    )))
}
