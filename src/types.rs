//! Core types for lgtm-bot

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot of a pull request, read once per evaluation
///
/// The core never mutates this. Label changes go through the platform
/// service, and a fresh snapshot is read when the new state matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PullRequestContext {
    /// Organization (repository owner)
    pub org: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
    /// Login of the PR author
    pub author: String,
    /// Target branch name
    pub base_branch: String,
    /// Whether the PR merges cleanly into its target
    pub mergeable: bool,
    /// Whether reviewers are still assigned
    pub needs_review: bool,
    /// Whether testers are still assigned
    pub needs_test: bool,
    /// Labels currently on the PR
    pub labels: BTreeSet<String>,
}

impl PullRequestContext {
    /// Check whether the PR carries a label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// A label defined in the repository label catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLabel {
    /// Label name
    pub name: String,
    /// Label color (hex, without `#`)
    pub color: Option<String>,
}

/// Location of one freeze declaration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeSource {
    /// Owner of the repository holding the file
    pub owner: String,
    /// Repository holding the file
    pub repo: String,
    /// Branch to read the file from
    pub branch: String,
    /// Path of the file inside the repository
    pub path: String,
}

impl std::fmt::Display for FreezeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}:{}", self.owner, self.repo, self.branch, self.path)
    }
}

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// A comment posted on a pull request
#[derive(Debug, Clone)]
pub struct CommentEvent {
    /// The PR the comment was posted on
    pub pr: PullRequestContext,
    /// Whether the PR is still open
    pub pr_open: bool,
    /// Whether the comment was newly created (not edited or deleted)
    pub created: bool,
    /// Login of the commenter
    pub commenter: String,
    /// Comment body
    pub body: String,
}

/// What happened to a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrAction {
    /// Labels were added or removed
    LabelsUpdated,
    /// New commits were pushed to the source branch
    SourceBranchChanged,
    /// Anything the bot does not react to
    Other,
}

/// A pull request lifecycle event
#[derive(Debug, Clone)]
pub struct PrEvent {
    /// The PR the event refers to
    pub pr: PullRequestContext,
    /// What happened
    pub action: PrAction,
    /// Login of the account that triggered the event
    pub actor: String,
}
