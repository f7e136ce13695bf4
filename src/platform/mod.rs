//! Platform services
//!
//! The core never talks to an API directly. Everything it reads or mutates
//! goes through these traits, so the same logic runs against GitHub or a
//! test double.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    FreezeSource, MergeMethod, MergeResult, PlatformConfig, PullRequestContext, RepoLabel,
};
use async_trait::async_trait;

/// Platform service trait for PR label, comment and merge operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Read a fresh snapshot of a PR
    async fn get_pr_context(&self, pr_number: u64) -> Result<PullRequestContext>;

    /// List the labels defined in the repository
    async fn list_repo_labels(&self) -> Result<Vec<RepoLabel>>;

    /// Define a new label in the repository
    async fn create_repo_label(&self, name: &str) -> Result<()>;

    /// Attach a label to a PR
    async fn add_pr_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Detach a label from a PR
    async fn remove_pr_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Detach several labels from a PR in one operation
    async fn remove_pr_labels(&self, pr_number: u64, labels: &[String]) -> Result<()>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Fetch a file from a repository
    ///
    /// Returns the base64 payload exactly as the contents API delivers it.
    async fn get_file_content(&self, source: &FreezeSource) -> Result<String>;

    /// Reset reviewer and tester assignment so a protected merge can proceed
    async fn clear_review_assignments(&self, pr_number: u64) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Authority deciding who may grant or withdraw approval
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    /// Whether `identity` may change approval labels on `pr`
    ///
    /// An `Err` means the question could not be answered and aborts the
    /// command; `Ok(false)` is a definite refusal.
    async fn can_approve(&self, identity: &str, pr: &PullRequestContext) -> Result<bool>;
}
