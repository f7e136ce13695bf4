//! Check command - evaluate the merge gate for a PR

use crate::cli::context::CommandContext;
use lgtm_bot::error::Result;
use lgtm_bot::merge::evaluate;
use lgtm_bot::platform::PlatformService;
use std::path::Path;

/// Run the check command
///
/// Without `merge` this is a dry run: reasons are printed, nothing is
/// posted or merged.
pub async fn run_check(
    config_path: &Path,
    repo: &str,
    pr_number: u64,
    actor: &str,
    merge: bool,
) -> Result<()> {
    let ctx = CommandContext::new(config_path, repo)?;
    let pr = ctx.platform.get_pr_context(pr_number).await?;

    if merge {
        let (readiness, merged) = ctx.bot().check_pr(&pr, actor).await?;
        match merged {
            Some(result) => println!(
                "Merged PR #{pr_number}: {}",
                result.sha.as_deref().unwrap_or("(no sha)")
            ),
            None => println!(
                "PR #{pr_number} is blocked ({} reason(s)), commented on the PR",
                readiness.blocking_reasons.len()
            ),
        }
        return Ok(());
    }

    let readiness = evaluate(&*ctx.platform, &pr, &ctx.config.policy(), actor).await?;
    if readiness.is_blocked() {
        println!("PR #{pr_number} is not mergeable:");
        for reason in &readiness.blocking_reasons {
            println!("  - {reason}");
        }
    } else {
        println!("PR #{pr_number} is mergeable.");
    }
    Ok(())
}
