//! Error types for lgtm-bot

use thiserror::Error;

/// Errors raised while handling commands or evaluating the merge gate
///
/// Policy violations found by the merge gate are not errors; they are
/// returned as reasons. Everything here is an infrastructure failure that
/// aborts the current operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A freeze source could not be fetched or decoded
    #[error("failed to fetch freeze rules: {0}")]
    Fetch(String),

    /// The permission oracle could not answer
    #[error("permission check failed: {0}")]
    PermissionCheck(String),

    /// A platform call (label, comment, merge) failed
    #[error("platform error: {0}")]
    Platform(String),

    /// GitHub API error with context
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Raw octocrab error
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Configuration could not be loaded or is invalid
    #[error("config error: {0}")]
    Config(String),

    /// No usable API token
    #[error("authentication error: {0}")]
    Auth(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A label could not be created in the repository label catalog
///
/// Soft failure: the approval flow logs it and still attempts to attach the
/// label, which fails loudly on its own if the label really cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalogWarning {
    /// Label that could not be ensured
    pub label: String,
    /// Description of the underlying failure
    pub reason: String,
}

impl std::fmt::Display for LabelCatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not create label {}: {}", self.label, self.reason)
    }
}
