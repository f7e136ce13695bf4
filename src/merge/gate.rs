//! Merge gate - pure evaluation of merge policy
//!
//! No I/O happens in `check_merge_readiness`; the freeze rule is resolved
//! beforehand by `evaluate`, making the policy checks easy to unit test.

use crate::approval::{APPROVED_LABEL, LGTM_LABEL, all_approval_labels};
use crate::config::PolicyConfig;
use crate::error::Result;
use crate::freeze::{self, FreezeRule};
use crate::platform::PlatformService;
use crate::types::PullRequestContext;
use std::collections::BTreeSet;
use tracing::debug;

/// Reason given when the PR does not merge cleanly
pub const MSG_CONFLICTS: &str = "PR conflicts with target branch.";

/// Merge gate verdict
///
/// Blocking reasons are user-facing and in check order. An empty list
/// means the PR may be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReadiness {
    /// Human-readable reasons why the PR cannot be merged
    pub blocking_reasons: Vec<String>,
}

impl MergeReadiness {
    /// Check if anything prevents the merge
    pub fn is_blocked(&self) -> bool {
        !self.blocking_reasons.is_empty()
    }
}

/// Evaluate the merge gate for `pr` as merged by `actor`.
///
/// Resolves the freeze rule for the PR's target branch first; a freeze
/// source that cannot be read fails the evaluation rather than being
/// treated as "not frozen".
pub async fn evaluate(
    platform: &dyn PlatformService,
    pr: &PullRequestContext,
    policy: &PolicyConfig,
    actor: &str,
) -> Result<MergeReadiness> {
    let rule = freeze::resolve(platform, &pr.org, &pr.base_branch, &policy.freeze_sources).await?;
    let readiness = check_merge_readiness(pr, policy, &rule, actor);
    debug!(
        pr_number = pr.number,
        actor,
        blocked = readiness.is_blocked(),
        "evaluated merge gate"
    );
    Ok(readiness)
}

/// Run every policy check (PURE - no I/O, easily testable)
///
/// All checks run so the PR author sees every problem at once.
pub fn check_merge_readiness(
    pr: &PullRequestContext,
    policy: &PolicyConfig,
    freeze: &FreezeRule,
    actor: &str,
) -> MergeReadiness {
    let mut reasons = Vec::new();

    if !pr.mergeable {
        reasons.push(MSG_CONFLICTS.to_string());
    }

    let mut needs: BTreeSet<&str> = policy.required_labels.iter().map(String::as_str).collect();
    needs.insert(APPROVED_LABEL);

    if policy.required_approvals <= 1 {
        needs.insert(LGTM_LABEL);
    } else {
        let have = all_approval_labels(&pr.labels).len();
        if have < policy.required_approvals as usize {
            reasons.push(format!(
                "needs {} approval labels, currently has {have}",
                policy.required_approvals
            ));
        }
    }

    let missing: Vec<&str> = needs.into_iter().filter(|l| !pr.has_label(l)).collect();
    if !missing.is_empty() {
        reasons.push(format!(
            "PR does not have these labels: {}",
            missing.join(", ")
        ));
    }

    let forbidden: BTreeSet<&str> = policy
        .forbidden_labels
        .iter()
        .map(String::as_str)
        .filter(|l| pr.has_label(l))
        .collect();
    if !forbidden.is_empty() {
        reasons.push(format!(
            "PR must not have labels: {}",
            forbidden.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    if freeze.is_frozen(&pr.org, &pr.base_branch, actor) {
        reasons.push(format!(
            "target is frozen, mergeable only by: {}",
            freeze.frozen_owners.join(", ")
        ));
    }

    MergeReadiness {
        blocking_reasons: reasons,
    }
}
