//! Freeze command - show the freeze rule for a branch

use crate::cli::context::CommandContext;
use lgtm_bot::error::Result;
use lgtm_bot::freeze::resolve;
use lgtm_bot::platform::PlatformService;
use std::path::Path;

/// Run the freeze command
pub async fn run_freeze(
    config_path: &Path,
    repo: &str,
    branch: &str,
    actor: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(config_path, repo)?;
    let org = ctx.platform.config().owner.clone();

    if ctx.config.freeze_file.is_empty() {
        println!("No freeze files configured.");
        return Ok(());
    }

    let rule = resolve(&*ctx.platform, &org, branch, &ctx.config.freeze_file).await?;
    if !rule.frozen || !rule.applies_to(&org, branch) {
        println!("{org}/{branch} is not frozen.");
        return Ok(());
    }

    println!(
        "{org}/{branch} is frozen; owners: {}",
        rule.frozen_owners.join(", ")
    );
    if let Some(actor) = actor {
        let verdict = if rule.is_frozen(&org, branch, actor) {
            "blocked"
        } else {
            "exempt"
        };
        println!("{actor}: {verdict}");
    }
    Ok(())
}
