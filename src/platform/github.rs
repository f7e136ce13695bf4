//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PermissionOracle, PlatformService};
use crate::types::{
    FreezeSource, MergeMethod, MergeResult, PlatformConfig, PullRequestContext, RepoLabel,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

/// Color given to approval labels the bot creates
const NEW_LABEL_COLOR: &str = "0e8a16";

/// Collaborator permission levels allowed to approve
const APPROVING_PERMISSIONS: &[&str] = &["admin", "maintain", "write"];

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// REST API base URL, scheme included
    api_base: String,
    /// Logins allowed to approve regardless of repository permission
    approvers: Vec<String>,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` is github.com.
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::build(token, PlatformConfig { owner, repo, host }, api_base)
    }

    /// Create a service talking to the REST API at `api_base`
    pub fn with_api_base(token: &str, owner: String, repo: String, api_base: &str) -> Result<Self> {
        let config = PlatformConfig {
            owner,
            repo,
            host: None,
        };
        Self::build(token, config, api_base.trim_end_matches('/').to_string())
    }

    fn build(token: &str, config: PlatformConfig, api_base: String) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("lgtm-bot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
            approvers: Vec::new(),
        })
    }

    /// Allow these logins to approve even without write access
    #[must_use]
    pub fn with_approvers(mut self, approvers: Vec<String>) -> Self {
        self.approvers = approvers;
        self
    }

    /// Build an authenticated raw request against the REST API
    fn raw(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_base, path.trim_start_matches('/'));
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("repos/{}/{}/{rest}", self.config.owner, self.config.repo)
    }
}

/// Helper to convert octocrab PR to our `PullRequestContext` type
fn context_from_octocrab(
    config: &PlatformConfig,
    pr: &octocrab::models::pulls::PullRequest,
) -> PullRequestContext {
    PullRequestContext {
        org: config.owner.clone(),
        repo: config.repo.clone(),
        number: pr.number,
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default(),
        base_branch: pr.base.ref_field.clone(),
        // GitHub reports `null` while still computing; treat as not mergeable
        mergeable: pr.mergeable.unwrap_or(false),
        needs_review: pr
            .requested_reviewers
            .as_ref()
            .is_some_and(|r| !r.is_empty()),
        needs_test: false,
        labels: pr
            .labels
            .iter()
            .flatten()
            .map(|l| l.name.clone())
            .collect(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pr_context(&self, pr_number: u64) -> Result<PullRequestContext> {
        debug!(pr_number, "getting PR context");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let ctx = context_from_octocrab(&self.config, &pr);
        debug!(pr_number, labels = ctx.labels.len(), "got PR context");
        Ok(ctx)
    }

    async fn list_repo_labels(&self) -> Result<Vec<RepoLabel>> {
        debug!("listing repository labels");
        let first = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_repo()
            .per_page(100)
            .send()
            .await?;
        let labels = self.client.all_pages(first).await?;

        let result: Vec<RepoLabel> = labels
            .into_iter()
            .map(|l| RepoLabel {
                name: l.name,
                color: Some(l.color),
            })
            .collect();
        debug!(count = result.len(), "listed repository labels");
        Ok(result)
    }

    async fn create_repo_label(&self, name: &str) -> Result<()> {
        debug!(name, "creating repository label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_label(name, NEW_LABEL_COLOR, "")
            .await?;
        Ok(())
    }

    async fn add_pr_label(&self, pr_number: u64, label: &str) -> Result<()> {
        debug!(pr_number, label, "adding PR label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr_number, &[label.to_string()])
            .await?;
        Ok(())
    }

    async fn remove_pr_label(&self, pr_number: u64, label: &str) -> Result<()> {
        debug!(pr_number, label, "removing PR label");
        match self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .remove_label(pr_number, label)
            .await
        {
            Ok(_) => Ok(()),
            // Label was not on the PR
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                debug!(pr_number, label, "label already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_pr_labels(&self, pr_number: u64, labels: &[String]) -> Result<()> {
        debug!(pr_number, ?labels, "removing PR labels");
        // No bulk delete endpoint. Per-label deletes leave labels added
        // concurrently by others untouched.
        for label in labels {
            self.remove_pr_label(pr_number, label).await?;
        }
        debug!(pr_number, count = labels.len(), "removed PR labels");
        Ok(())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, "created PR comment");
        Ok(())
    }

    async fn get_file_content(&self, source: &FreezeSource) -> Result<String> {
        #[derive(Deserialize)]
        struct ContentResponse {
            content: String,
        }

        debug!(%source, "fetching file content");
        let path = format!(
            "repos/{}/{}/contents/{}",
            source.owner,
            source.repo,
            source.path.trim_start_matches('/')
        );

        let response = self
            .raw(Method::GET, &path)
            .query(&[("ref", source.branch.as_str())])
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{source}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("{source}: HTTP {}", response.status())));
        }

        let body: ContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("{source}: {e}")))?;
        Ok(body.content)
    }

    async fn clear_review_assignments(&self, pr_number: u64) -> Result<()> {
        #[derive(Deserialize)]
        struct RequestedReviewers {
            users: Vec<Login>,
        }

        #[derive(Deserialize)]
        struct Login {
            login: String,
        }

        debug!(pr_number, "clearing requested reviewers");
        let path = self.repo_path(&format!("pulls/{pr_number}/requested_reviewers"));

        let response = self
            .raw(Method::GET, &path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to list requested reviewers: {e}")))?;
        let requested: RequestedReviewers = response
            .error_for_status()
            .map_err(|e| Error::GitHubApi(format!("Failed to list requested reviewers: {e}")))?
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse requested reviewers: {e}")))?;

        if requested.users.is_empty() {
            return Ok(());
        }

        let reviewers: Vec<String> = requested.users.into_iter().map(|u| u.login).collect();
        self.raw(Method::DELETE, &path)
            .json(&serde_json::json!({ "reviewers": reviewers }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::GitHubApi(format!("Failed to clear requested reviewers: {e}")))?;

        debug!(pr_number, count = reviewers.len(), "cleared requested reviewers");
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[async_trait]
impl PermissionOracle for GitHubService {
    async fn can_approve(&self, identity: &str, pr: &PullRequestContext) -> Result<bool> {
        #[derive(Deserialize)]
        struct PermissionResponse {
            permission: String,
        }

        if self.approvers.iter().any(|a| a == identity) {
            debug!(identity, "configured approver");
            return Ok(true);
        }

        let path = format!("repos/{}/{}/collaborators/{identity}/permission", pr.org, pr.repo);
        let response = self
            .raw(Method::GET, &path)
            .send()
            .await
            .map_err(|e| Error::PermissionCheck(format!("{identity}: {e}")))?;

        // Non-collaborators get a 404
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(identity, "not a collaborator");
            return Ok(false);
        }

        let body: PermissionResponse = response
            .error_for_status()
            .map_err(|e| Error::PermissionCheck(format!("{identity}: {e}")))?
            .json()
            .await
            .map_err(|e| Error::PermissionCheck(format!("{identity}: {e}")))?;

        let allowed = APPROVING_PERMISSIONS.contains(&body.permission.as_str());
        debug!(identity, permission = %body.permission, allowed, "checked permission");
        Ok(allowed)
    }
}
