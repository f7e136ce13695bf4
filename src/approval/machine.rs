//! Approval commands: `/lgtm` and `/lgtm cancel`
//!
//! Same three phases as the merge flow:
//! 1. Gather - who is asking and whether the oracle lets them
//! 2. Plan - `plan_add_approval` / `plan_remove_approval` (pure)
//! 3. Execute - apply the plan through the platform

use super::label::{LGTM_LABEL, all_approval_labels, encode};
use crate::config::PolicyConfig;
use crate::error::{LabelCatalogWarning, Result};
use crate::merge;
use crate::notice;
use crate::platform::{PermissionOracle, PlatformService};
use crate::types::{MergeResult, PullRequestContext};
use tracing::{debug, info, warn};

/// Standing of the commander on this PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// The commander wrote the PR
    Author,
    /// The oracle allowed the commander to approve
    Permitted,
    /// The oracle refused the commander
    Denied,
}

/// A change to the labels on a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelModification {
    /// Attach one label
    Add(String),
    /// Detach one label
    Remove(String),
    /// Detach several labels in one call
    RemoveAll(Vec<String>),
}

/// What an approval command will do (the functional core output)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalPlan {
    /// Label to create in the repository catalog if missing
    pub ensure_in_catalog: Option<String>,
    /// Label change to apply to the PR
    pub modification: Option<LabelModification>,
    /// Comment to post after the label change
    pub notice: Option<String>,
    /// Whether to re-run the merge gate afterwards
    pub evaluate_merge: bool,
}

/// What executing an approval command did
#[derive(Debug, Clone, Default)]
pub struct ApprovalOutcome {
    /// The label change that was applied
    pub applied: Option<LabelModification>,
    /// Catalog creation failure that was tolerated
    pub catalog_warning: Option<LabelCatalogWarning>,
    /// Merge performed by the follow-up gate evaluation
    pub merged: Option<MergeResult>,
}

/// Determine the commander's standing, consulting the oracle only for
/// non-authors
pub async fn standing(
    oracle: &dyn PermissionOracle,
    pr: &PullRequestContext,
    commander: &str,
) -> Result<Standing> {
    if commander == pr.author {
        return Ok(Standing::Author);
    }
    if oracle.can_approve(commander, pr).await? {
        Ok(Standing::Permitted)
    } else {
        Ok(Standing::Denied)
    }
}

/// Plan `/lgtm` (PURE)
pub fn plan_add_approval(commander: &str, standing: Standing, required_approvals: u32) -> ApprovalPlan {
    match standing {
        Standing::Author => ApprovalPlan {
            notice: Some(notice::SELF_APPROVAL.to_string()),
            ..ApprovalPlan::default()
        },
        Standing::Denied => ApprovalPlan {
            notice: Some(notice::no_permission(commander, "add", LGTM_LABEL)),
            ..ApprovalPlan::default()
        },
        Standing::Permitted => {
            let label = encode(commander, required_approvals);
            ApprovalPlan {
                ensure_in_catalog: (label != LGTM_LABEL).then(|| label.clone()),
                notice: Some(notice::label_added(&label, commander)),
                modification: Some(LabelModification::Add(label)),
                evaluate_merge: true,
            }
        }
    }
}

/// Plan `/lgtm cancel` (PURE)
///
/// The author may withdraw every approval at once; anyone else withdraws
/// only their own.
pub fn plan_remove_approval(
    pr: &PullRequestContext,
    commander: &str,
    standing: Standing,
    required_approvals: u32,
) -> ApprovalPlan {
    match standing {
        Standing::Author => {
            let labels = all_approval_labels(&pr.labels);
            ApprovalPlan {
                modification: (!labels.is_empty()).then_some(LabelModification::RemoveAll(labels)),
                ..ApprovalPlan::default()
            }
        }
        Standing::Denied => ApprovalPlan {
            notice: Some(notice::no_permission(commander, "remove", LGTM_LABEL)),
            ..ApprovalPlan::default()
        },
        Standing::Permitted => {
            let label = encode(commander, required_approvals);
            ApprovalPlan {
                notice: Some(notice::label_removed(&label, commander)),
                modification: Some(LabelModification::Remove(label)),
                ..ApprovalPlan::default()
            }
        }
    }
}

/// Apply a plan's catalog, label and comment steps (EFFECTFUL)
///
/// Stops at the first failure, except catalog creation which is logged
/// and reported in the outcome.
pub async fn execute_approval(
    platform: &dyn PlatformService,
    pr_number: u64,
    plan: &ApprovalPlan,
) -> Result<ApprovalOutcome> {
    let mut outcome = ApprovalOutcome::default();

    if let Some(label) = &plan.ensure_in_catalog
        && let Err(e) = ensure_repo_label(platform, label).await
    {
        let warning = LabelCatalogWarning {
            label: label.clone(),
            reason: e.to_string(),
        };
        warn!(pr_number, %warning, "continuing without catalog label");
        outcome.catalog_warning = Some(warning);
    }

    if let Some(modification) = &plan.modification {
        match modification {
            LabelModification::Add(label) => platform.add_pr_label(pr_number, label).await?,
            LabelModification::Remove(label) => platform.remove_pr_label(pr_number, label).await?,
            LabelModification::RemoveAll(labels) => {
                platform.remove_pr_labels(pr_number, labels).await?;
            }
        }
        info!(pr_number, ?modification, "applied label change");
        outcome.applied = Some(modification.clone());
    }

    if let Some(body) = &plan.notice {
        platform.create_pr_comment(pr_number, body).await?;
    }

    Ok(outcome)
}

/// Create `label` in the repository unless it already exists
async fn ensure_repo_label(platform: &dyn PlatformService, label: &str) -> Result<()> {
    let existing = platform.list_repo_labels().await?;
    if existing.iter().any(|l| l.name == label) {
        debug!(label, "label already in catalog");
        return Ok(());
    }
    platform.create_repo_label(label).await
}

/// Handle `/lgtm` from `commander`
///
/// A successful approval re-runs the merge gate against a fresh snapshot,
/// merging if nothing blocks.
pub async fn add_approval(
    platform: &dyn PlatformService,
    oracle: &dyn PermissionOracle,
    pr: &PullRequestContext,
    commander: &str,
    policy: &PolicyConfig,
) -> Result<ApprovalOutcome> {
    let standing = standing(oracle, pr, commander).await?;
    debug!(pr_number = pr.number, commander, ?standing, "add approval");

    let plan = plan_add_approval(commander, standing, policy.required_approvals);
    let mut outcome = execute_approval(platform, pr.number, &plan).await?;

    if plan.evaluate_merge {
        outcome.merged = merge::try_merge(platform, pr.number, policy, commander).await?;
    }
    Ok(outcome)
}

/// Handle `/lgtm cancel` from `commander`
pub async fn remove_approval(
    platform: &dyn PlatformService,
    oracle: &dyn PermissionOracle,
    pr: &PullRequestContext,
    commander: &str,
    policy: &PolicyConfig,
) -> Result<ApprovalOutcome> {
    let standing = standing(oracle, pr, commander).await?;
    debug!(pr_number = pr.number, commander, ?standing, "remove approval");

    let plan = plan_remove_approval(pr, commander, standing, policy.required_approvals);
    execute_approval(platform, pr.number, &plan).await
}
