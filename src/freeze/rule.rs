//! Freeze declarations and their document format

use serde::{Deserialize, Serialize};

/// One freeze declaration for a branch
///
/// `owner` lists the accounts that are *exempt*: during a freeze they are
/// the only ones who may still merge into the branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRule {
    /// Branch the rule applies to
    #[serde(default)]
    pub branch: String,
    /// Organizations the rule applies to
    #[serde(default, rename = "community")]
    pub community_orgs: Vec<String>,
    /// Whether the freeze is in effect
    #[serde(default)]
    pub frozen: bool,
    /// Accounts allowed to merge while frozen
    #[serde(default, rename = "owner")]
    pub frozen_owners: Vec<String>,
}

impl FreezeRule {
    /// Whether the rule is declared for `org` and `branch`
    pub fn applies_to(&self, org: &str, branch: &str) -> bool {
        self.branch == branch && self.has_org(org)
    }

    /// Whether `actor` is blocked from merging into `org`/`branch`
    pub fn is_frozen(&self, org: &str, branch: &str, actor: &str) -> bool {
        self.frozen && self.applies_to(org, branch) && !self.is_owner(actor)
    }

    fn has_org(&self, org: &str) -> bool {
        self.community_orgs.iter().any(|o| o == org)
    }

    fn is_owner(&self, actor: &str) -> bool {
        self.frozen_owners.iter().any(|o| o == actor)
    }
}

/// Contents of one freeze file
///
/// ```yaml
/// release:
///   - branch: main
///     community: [org1]
///     frozen: true
///     owner: [alice]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreezeDocument {
    /// Declared rules, in file order
    #[serde(default)]
    pub release: Vec<FreezeRule>,
}

impl FreezeDocument {
    /// Parse a YAML freeze document
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file decodes to `null`
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// First rule in this document declared for `org` and `branch`
    pub fn find(&self, org: &str, branch: &str) -> Option<&FreezeRule> {
        self.release.iter().find(|r| r.applies_to(org, branch))
    }
}
