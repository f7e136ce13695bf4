//! Event handling
//!
//! Routes comment and pull-request events to the approval flow and the
//! merge gate. The hosting system decides how events arrive.

use crate::approval::{self, ApprovalOutcome, Command, all_approval_labels, parse_commands};
use crate::config::{BotConfig, PolicyConfig};
use crate::error::Result;
use crate::merge::{self, MergeReadiness};
use crate::notice;
use crate::platform::{PermissionOracle, PlatformService};
use crate::types::{CommentEvent, MergeResult, PrAction, PrEvent, PullRequestContext};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one handled command
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// `/lgtm` or `/lgtm cancel` ran
    Approval(ApprovalOutcome),
    /// `/check-pr` ran
    Check {
        /// The gate verdict
        readiness: MergeReadiness,
        /// Set when the PR was merged
        merged: Option<MergeResult>,
    },
}

/// The bot for one repository
pub struct Bot {
    platform: Arc<dyn PlatformService>,
    oracle: Arc<dyn PermissionOracle>,
    config: BotConfig,
    policy: PolicyConfig,
}

impl Bot {
    /// Create a bot acting through `platform`, asking `oracle` for permission
    pub fn new(
        platform: Arc<dyn PlatformService>,
        oracle: Arc<dyn PermissionOracle>,
        config: BotConfig,
    ) -> Self {
        let policy = config.policy();
        Self {
            platform,
            oracle,
            config,
            policy,
        }
    }

    /// The merge policy in force
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Handle a comment on a pull request
    ///
    /// Only new comments on open PRs are acted on. Each command found runs
    /// once; commands after the first see a fresh snapshot of the PR.
    pub async fn handle_comment(&self, event: &CommentEvent) -> Result<Vec<CommandOutcome>> {
        if !event.pr_open || !event.created {
            debug!(pr_number = event.pr.number, "ignoring comment");
            return Ok(Vec::new());
        }

        let commands = parse_commands(&event.body);
        let mut outcomes = Vec::with_capacity(commands.len());

        for (i, command) in commands.into_iter().enumerate() {
            let pr = if i == 0 {
                event.pr.clone()
            } else {
                self.platform.get_pr_context(event.pr.number).await?
            };

            info!(pr_number = pr.number, commenter = %event.commenter, ?command, "handling command");
            let outcome = self.run_command(command, &pr, &event.commenter).await?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn run_command(
        &self,
        command: Command,
        pr: &PullRequestContext,
        commenter: &str,
    ) -> Result<CommandOutcome> {
        let platform = self.platform.as_ref();
        let oracle = self.oracle.as_ref();

        match command {
            Command::AddApproval => {
                approval::add_approval(platform, oracle, pr, commenter, &self.policy)
                    .await
                    .map(CommandOutcome::Approval)
            }
            Command::RemoveApproval => {
                approval::remove_approval(platform, oracle, pr, commenter, &self.policy)
                    .await
                    .map(CommandOutcome::Approval)
            }
            Command::CheckPr => {
                let (readiness, merged) = self.check_pr(pr, commenter).await?;
                Ok(CommandOutcome::Check { readiness, merged })
            }
        }
    }

    /// `/check-pr`: explain what blocks the PR, or merge it
    pub async fn check_pr(
        &self,
        pr: &PullRequestContext,
        actor: &str,
    ) -> Result<(MergeReadiness, Option<MergeResult>)> {
        let platform = self.platform.as_ref();
        let readiness = merge::evaluate(platform, pr, &self.policy, actor).await?;

        if readiness.is_blocked() {
            let body = notice::not_mergeable(actor, &readiness.blocking_reasons);
            platform.create_pr_comment(pr.number, &body).await?;
            return Ok((readiness, None));
        }

        let merged = merge::execute_merge(platform, pr, self.policy.merge_method).await?;
        Ok((readiness, Some(merged)))
    }

    /// Handle a pull request lifecycle event
    ///
    /// Label changes may complete the gate, so they trigger a silent merge
    /// attempt. New commits invalidate earlier approvals.
    pub async fn handle_pr_event(&self, event: &PrEvent) -> Result<Option<MergeResult>> {
        match event.action {
            PrAction::LabelsUpdated => {
                merge::try_merge(
                    self.platform.as_ref(),
                    event.pr.number,
                    &self.policy,
                    &event.actor,
                )
                .await
            }
            PrAction::SourceBranchChanged if self.config.clear_labels_on_push => {
                self.clear_approvals(&event.pr).await?;
                Ok(None)
            }
            PrAction::SourceBranchChanged | PrAction::Other => Ok(None),
        }
    }

    /// Remove every approval label from `pr` and say so
    async fn clear_approvals(&self, pr: &PullRequestContext) -> Result<()> {
        let labels = all_approval_labels(&pr.labels);
        if labels.is_empty() {
            return Ok(());
        }

        self.platform.remove_pr_labels(pr.number, &labels).await?;
        self.platform
            .create_pr_comment(pr.number, &notice::labels_cleared(&labels))
            .await?;
        info!(pr_number = pr.number, ?labels, "cleared approvals after push");
        Ok(())
    }
}
