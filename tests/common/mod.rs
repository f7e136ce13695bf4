//! Shared fixtures for integration and unit tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{CreateCommentCall, MergePrCall, MockPlatformService};

use lgtm_bot::bot::Bot;
use lgtm_bot::config::BotConfig;
use lgtm_bot::types::{CommentEvent, FreezeSource, PullRequestContext};
use std::sync::Arc;

/// Open, mergeable PR #1 in `org1/repo` targeting `main`, authored by dave
pub fn make_pr(labels: &[&str]) -> PullRequestContext {
    PullRequestContext {
        org: "org1".to_string(),
        repo: "repo".to_string(),
        number: 1,
        author: "dave".to_string(),
        base_branch: "main".to_string(),
        mergeable: true,
        needs_review: false,
        needs_test: false,
        labels: labels.iter().map(ToString::to_string).collect(),
    }
}

/// Freeze file location served by the mock under `path`
pub fn freeze_source(path: &str) -> FreezeSource {
    FreezeSource {
        owner: "infra".to_string(),
        repo: "community".to_string(),
        branch: "master".to_string(),
        path: path.to_string(),
    }
}

/// Config requiring `required` approvals
pub fn config_with_approvals(required: u32) -> BotConfig {
    BotConfig {
        lgtm_counts_required: required,
        ..BotConfig::default()
    }
}

/// Mock holding `pr`, and a bot over it
pub fn setup(pr: PullRequestContext, config: BotConfig) -> (Arc<MockPlatformService>, Bot) {
    let mock = Arc::new(MockPlatformService::new());
    mock.set_pr(pr);
    let bot = Bot::new(mock.clone(), mock.clone(), config);
    (mock, bot)
}

/// New comment on the open PR `pr`
pub fn comment(pr: &PullRequestContext, commenter: &str, body: &str) -> CommentEvent {
    CommentEvent {
        pr: pr.clone(),
        pr_open: true,
        created: true,
        commenter: commenter.to_string(),
        body: body.to_string(),
    }
}
