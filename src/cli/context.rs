//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the comment, check and freeze
//! commands.

use lgtm_bot::auth::get_github_auth;
use lgtm_bot::bot::Bot;
use lgtm_bot::config::BotConfig;
use lgtm_bot::error::{Error, Result};
use lgtm_bot::platform::GitHubService;
use std::path::Path;
use std::sync::Arc;

/// Shared context for CLI commands that interact with the platform
///
/// - Loading and validating the config
/// - Reading the token
/// - Creating the GitHub service
pub struct CommandContext {
    /// Loaded bot config
    pub config: BotConfig,
    /// GitHub service, also serving as permission oracle
    pub platform: Arc<GitHubService>,
}

impl CommandContext {
    /// Create a new command context for `repo` (`owner/name`)
    pub fn new(config_path: &Path, repo: &str) -> Result<Self> {
        let config = BotConfig::load(config_path)?;
        let (owner, name) = parse_repo(repo)?;
        let auth = get_github_auth()?;

        let platform = GitHubService::new(&auth.token, owner, name, None)?
            .with_approvers(config.approvers.clone());

        Ok(Self {
            config,
            platform: Arc::new(platform),
        })
    }

    /// Build a bot over this context
    pub fn bot(&self) -> Bot {
        Bot::new(
            self.platform.clone(),
            self.platform.clone(),
            self.config.clone(),
        )
    }
}

/// Split `owner/name`
pub fn parse_repo(repo: &str) -> Result<(String, String)> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository '{repo}', expected owner/name"
        ))),
    }
}
