//! Bot configuration, loaded from TOML.

use crate::error::{Error, Result};
use crate::types::{FreezeSource, MergeMethod};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default config filename, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lgtm-bot.toml";

/// Settings for one repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Approvals needed before merge
    pub lgtm_counts_required: u32,
    /// Labels that must be present before merge
    pub labels_for_merge: Vec<String>,
    /// Labels that must be absent before merge
    pub missing_labels_for_merge: Vec<String>,
    /// How PRs are merged
    pub merge_method: MergeMethod,
    /// Logins allowed to approve in addition to repository writers
    pub approvers: Vec<String>,
    /// Drop approval labels when new commits are pushed
    pub clear_labels_on_push: bool,
    /// Freeze files, later entries taking precedence
    pub freeze_file: Vec<FreezeSource>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            lgtm_counts_required: 1,
            labels_for_merge: Vec::new(),
            missing_labels_for_merge: Vec::new(),
            merge_method: MergeMethod::default(),
            approvers: Vec::new(),
            clear_labels_on_push: true,
            freeze_file: Vec::new(),
        }
    }
}

impl BotConfig {
    /// Parse and validate config text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::Config(format!("failed to parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from disk.
    ///
    /// Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Reject settings the bot cannot act on
    pub fn validate(&self) -> Result<()> {
        if self.lgtm_counts_required < 1 {
            return Err(Error::Config(
                "lgtm_counts_required must be at least 1".to_string(),
            ));
        }

        for (i, source) in self.freeze_file.iter().enumerate() {
            let fields = [
                ("owner", &source.owner),
                ("repo", &source.repo),
                ("branch", &source.branch),
                ("path", &source.path),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
                return Err(Error::Config(format!("freeze_file[{i}].{name} is empty")));
            }
        }

        Ok(())
    }

    /// Merge policy view of this config
    pub fn policy(&self) -> PolicyConfig {
        PolicyConfig {
            required_labels: self.labels_for_merge.clone(),
            forbidden_labels: self.missing_labels_for_merge.clone(),
            required_approvals: self.lgtm_counts_required,
            merge_method: self.merge_method,
            freeze_sources: self.freeze_file.clone(),
        }
    }
}

/// Policy consulted by the merge gate and approval flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Labels required in addition to `approved` and the approval labels
    pub required_labels: Vec<String>,
    /// Labels that block the merge
    pub forbidden_labels: Vec<String>,
    /// Approvals needed (at least 1)
    pub required_approvals: u32,
    /// How PRs are merged
    pub merge_method: MergeMethod,
    /// Freeze files, later entries taking precedence
    pub freeze_sources: Vec<FreezeSource>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        BotConfig::default().policy()
    }
}
