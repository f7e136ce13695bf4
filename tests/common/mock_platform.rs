//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lgtm_bot::error::{Error, Result};
use lgtm_bot::platform::{PermissionOracle, PlatformService};
use lgtm_bot::types::{
    FreezeSource, MergeMethod, MergeResult, PlatformConfig, PullRequestContext, RepoLabel,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Hand-written rather than generated, so label mutations can update the
/// stored PR snapshot the way the real platform would.
///
/// Features:
/// - Stored PR snapshots, updated by label calls
/// - Call tracking, per method and as one ordered log
/// - Configurable permission answers and freeze files
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    prs: Mutex<HashMap<u64, PullRequestContext>>,
    repo_labels: Mutex<Vec<RepoLabel>>,
    files: Mutex<HashMap<String, String>>,
    permissions: Mutex<HashMap<String, bool>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    call_log: Mutex<Vec<String>>,
    created_labels: Mutex<Vec<String>>,
    add_label_calls: Mutex<Vec<(u64, String)>>,
    remove_label_calls: Mutex<Vec<(u64, String)>>,
    remove_labels_calls: Mutex<Vec<(u64, Vec<String>)>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    permission_calls: Mutex<Vec<String>>,
    clear_assignment_calls: Mutex<Vec<u64>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_create_label: Mutex<Option<String>>,
    error_on_add_label: Mutex<Option<String>>,
    error_on_remove_label: Mutex<Option<String>>,
    error_on_comment: Mutex<Option<String>>,
    error_on_permission: Mutex<Option<String>>,
    error_on_clear_assignment: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock for `org1/repo`
    pub fn new() -> Self {
        Self {
            config: PlatformConfig {
                owner: "org1".to_string(),
                repo: "repo".to_string(),
                host: None,
            },
            prs: Mutex::new(HashMap::new()),
            repo_labels: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
            permissions: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            call_log: Mutex::new(Vec::new()),
            created_labels: Mutex::new(Vec::new()),
            add_label_calls: Mutex::new(Vec::new()),
            remove_label_calls: Mutex::new(Vec::new()),
            remove_labels_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            permission_calls: Mutex::new(Vec::new()),
            clear_assignment_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_create_label: Mutex::new(None),
            error_on_add_label: Mutex::new(None),
            error_on_remove_label: Mutex::new(None),
            error_on_comment: Mutex::new(None),
            error_on_permission: Mutex::new(None),
            error_on_clear_assignment: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Setup methods ===

    /// Store a PR snapshot served by `get_pr_context`
    pub fn set_pr(&self, pr: PullRequestContext) {
        self.prs.lock().unwrap().insert(pr.number, pr);
    }

    /// Current stored snapshot of a PR
    pub fn pr(&self, pr_number: u64) -> PullRequestContext {
        self.prs.lock().unwrap()[&pr_number].clone()
    }

    /// Define labels in the repository catalog
    pub fn set_repo_labels(&self, names: &[&str]) {
        *self.repo_labels.lock().unwrap() = names
            .iter()
            .map(|n| RepoLabel {
                name: (*n).to_string(),
                color: None,
            })
            .collect();
    }

    /// Serve `yaml` (base64-encoded) for the freeze file at `path`
    pub fn set_freeze_file(&self, path: &str, yaml: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), STANDARD.encode(yaml));
    }

    /// Serve a raw (possibly invalid) payload for `path`
    pub fn set_raw_file(&self, path: &str, payload: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), payload.to_string());
    }

    /// Answer the permission oracle for `identity`
    pub fn set_permission(&self, identity: &str, allowed: bool) {
        self.permissions
            .lock()
            .unwrap()
            .insert(identity.to_string(), allowed);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    // === Error injection methods ===

    /// Make `create_repo_label` return an error
    pub fn fail_create_label(&self, msg: &str) {
        *self.error_on_create_label.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_pr_label` return an error
    pub fn fail_add_label(&self, msg: &str) {
        *self.error_on_add_label.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `remove_pr_label` and `remove_pr_labels` return an error
    pub fn fail_remove_label(&self, msg: &str) {
        *self.error_on_remove_label.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `can_approve` return an error
    pub fn fail_permission(&self, msg: &str) {
        *self.error_on_permission.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `clear_review_assignments` return an error
    pub fn fail_clear_assignment(&self, msg: &str) {
        *self.error_on_clear_assignment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Every mutating call and oracle query, in order
    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn get_created_labels(&self) -> Vec<String> {
        self.created_labels.lock().unwrap().clone()
    }

    pub fn get_add_label_calls(&self) -> Vec<(u64, String)> {
        self.add_label_calls.lock().unwrap().clone()
    }

    pub fn get_remove_label_calls(&self) -> Vec<(u64, String)> {
        self.remove_label_calls.lock().unwrap().clone()
    }

    pub fn get_remove_labels_calls(&self) -> Vec<(u64, Vec<String>)> {
        self.remove_labels_calls.lock().unwrap().clone()
    }

    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    pub fn get_permission_calls(&self) -> Vec<String> {
        self.permission_calls.lock().unwrap().clone()
    }

    pub fn get_clear_assignment_calls(&self) -> Vec<u64> {
        self.clear_assignment_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Whether any call changed labels on a PR
    pub fn label_mutation_count(&self) -> usize {
        self.add_label_calls.lock().unwrap().len()
            + self.remove_label_calls.lock().unwrap().len()
            + self.remove_labels_calls.lock().unwrap().len()
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was NOT called at all
    pub fn assert_merge_not_called(&self) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.is_empty(),
            "Expected merge_pr NOT to be called but it was: {calls:?}"
        );
    }

    fn log(&self, entry: String) {
        self.call_log.lock().unwrap().push(entry);
    }

    fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
        match slot.lock().unwrap().as_ref() {
            Some(msg) => Err(Error::Platform(msg.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pr_context(&self, pr_number: u64) -> Result<PullRequestContext> {
        self.prs
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("no PR #{pr_number} configured")))
    }

    async fn list_repo_labels(&self) -> Result<Vec<RepoLabel>> {
        Ok(self.repo_labels.lock().unwrap().clone())
    }

    async fn create_repo_label(&self, name: &str) -> Result<()> {
        self.log(format!("create_repo_label {name}"));
        Self::injected(&self.error_on_create_label)?;
        self.created_labels.lock().unwrap().push(name.to_string());
        self.repo_labels.lock().unwrap().push(RepoLabel {
            name: name.to_string(),
            color: None,
        });
        Ok(())
    }

    async fn add_pr_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.log(format!("add_pr_label {label}"));
        Self::injected(&self.error_on_add_label)?;
        self.add_label_calls
            .lock()
            .unwrap()
            .push((pr_number, label.to_string()));
        if let Some(pr) = self.prs.lock().unwrap().get_mut(&pr_number) {
            pr.labels.insert(label.to_string());
        }
        Ok(())
    }

    async fn remove_pr_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.log(format!("remove_pr_label {label}"));
        Self::injected(&self.error_on_remove_label)?;
        self.remove_label_calls
            .lock()
            .unwrap()
            .push((pr_number, label.to_string()));
        if let Some(pr) = self.prs.lock().unwrap().get_mut(&pr_number) {
            pr.labels.remove(label);
        }
        Ok(())
    }

    async fn remove_pr_labels(&self, pr_number: u64, labels: &[String]) -> Result<()> {
        self.log(format!("remove_pr_labels {}", labels.join(",")));
        Self::injected(&self.error_on_remove_label)?;
        self.remove_labels_calls
            .lock()
            .unwrap()
            .push((pr_number, labels.to_vec()));
        if let Some(pr) = self.prs.lock().unwrap().get_mut(&pr_number) {
            for label in labels {
                pr.labels.remove(label);
            }
        }
        Ok(())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.log("create_pr_comment".to_string());
        Self::injected(&self.error_on_comment)?;
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });
        Ok(())
    }

    async fn get_file_content(&self, source: &FreezeSource) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(&source.path)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("404 Not Found: {}", source.path)))
    }

    async fn clear_review_assignments(&self, pr_number: u64) -> Result<()> {
        self.log("clear_review_assignments".to_string());
        Self::injected(&self.error_on_clear_assignment)?;
        self.clear_assignment_calls.lock().unwrap().push(pr_number);
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.log(format!("merge_pr {method}"));
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        Self::injected(&self.error_on_merge_pr)?;

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(&pr_number).cloned().unwrap_or_else(|| MergeResult {
            merged: true,
            sha: Some(format!("merged_sha_{pr_number}")),
            message: None,
        }))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[async_trait]
impl PermissionOracle for MockPlatformService {
    async fn can_approve(&self, identity: &str, _pr: &PullRequestContext) -> Result<bool> {
        self.log(format!("can_approve {identity}"));
        self.permission_calls
            .lock()
            .unwrap()
            .push(identity.to_string());

        if let Some(msg) = self.error_on_permission.lock().unwrap().as_ref() {
            return Err(Error::PermissionCheck(msg.clone()));
        }

        Ok(self
            .permissions
            .lock()
            .unwrap()
            .get(identity)
            .copied()
            .unwrap_or(false))
    }
}
