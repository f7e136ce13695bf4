//! Merge execution - effectful operations
//!
//! Performs the merge the gate has cleared. Nothing is retried: any
//! failed call is returned to the caller as is.

use super::gate::evaluate;
use crate::config::PolicyConfig;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, MergeResult, PullRequestContext};
use tracing::{debug, info};

/// Merge `pr` with `method` (EFFECTFUL)
///
/// Protected merges are refused while reviewers or testers are still
/// assigned, so that assignment is cleared first when present.
pub async fn execute_merge(
    platform: &dyn PlatformService,
    pr: &PullRequestContext,
    method: MergeMethod,
) -> Result<MergeResult> {
    if pr.needs_review || pr.needs_test {
        debug!(pr_number = pr.number, "clearing review assignment before merge");
        platform.clear_review_assignments(pr.number).await?;
    }

    let result = platform.merge_pr(pr.number, method).await?;
    if !result.merged {
        return Err(Error::Platform(result.message.unwrap_or_else(|| {
            format!("PR #{} was not merged", pr.number)
        })));
    }

    info!(
        pr_number = pr.number,
        %method,
        sha = result.sha.as_deref().unwrap_or("(no sha)"),
        "merged PR"
    );
    Ok(result)
}

/// Re-run the merge gate on a fresh snapshot and merge if nothing blocks
///
/// Blocked PRs are left alone without comment; `/check-pr` is how a user
/// asks for the reasons. Returns the merge result when a merge happened.
pub async fn try_merge(
    platform: &dyn PlatformService,
    pr_number: u64,
    policy: &PolicyConfig,
    actor: &str,
) -> Result<Option<MergeResult>> {
    let pr = platform.get_pr_context(pr_number).await?;
    let readiness = evaluate(platform, &pr, policy, actor).await?;
    if readiness.is_blocked() {
        debug!(
            pr_number,
            reasons = ?readiness.blocking_reasons,
            "not merging yet"
        );
        return Ok(None);
    }

    execute_merge(platform, &pr, policy.merge_method).await.map(Some)
}
