//! Comment command - feed a PR comment to the bot

use crate::cli::context::CommandContext;
use lgtm_bot::bot::CommandOutcome;
use lgtm_bot::error::Result;
use lgtm_bot::platform::PlatformService;
use lgtm_bot::types::CommentEvent;
use std::path::Path;

/// Run the comment command
pub async fn run_comment(
    config_path: &Path,
    repo: &str,
    pr_number: u64,
    actor: &str,
    body: &str,
) -> Result<()> {
    let ctx = CommandContext::new(config_path, repo)?;
    let pr = ctx.platform.get_pr_context(pr_number).await?;

    let event = CommentEvent {
        pr,
        pr_open: true,
        created: true,
        commenter: actor.to_string(),
        body: body.to_string(),
    };

    let outcomes = ctx.bot().handle_comment(&event).await?;
    if outcomes.is_empty() {
        println!("No command found in comment.");
    }

    for outcome in outcomes {
        match outcome {
            CommandOutcome::Approval(approval) => {
                if let Some(warning) = &approval.catalog_warning {
                    println!("warning: {warning}");
                }
                match &approval.applied {
                    Some(change) => println!("Applied {change:?}"),
                    None => println!("No label change"),
                }
                if let Some(merged) = approval.merged {
                    println!("Merged: {}", merged.sha.as_deref().unwrap_or("(no sha)"));
                }
            }
            CommandOutcome::Check { readiness, merged } => {
                if let Some(merged) = merged {
                    println!("Merged: {}", merged.sha.as_deref().unwrap_or("(no sha)"));
                } else {
                    println!("Blocked:");
                    for reason in &readiness.blocking_reasons {
                        println!("  - {reason}");
                    }
                }
            }
        }
    }

    Ok(())
}
