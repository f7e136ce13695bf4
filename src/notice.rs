//! Comment texts posted back to pull requests

/// Author tried to approve their own PR
pub const SELF_APPROVAL: &str =
    "***lgtm*** can not be added in your self-own pull request. :astonished:";

/// Commenter may not perform `action` on `label`
pub fn no_permission(actor: &str, action: &str, label: &str) -> String {
    format!(
        "***@{actor}*** has no permission to {action} ***{label}*** label in this pull request. :astonished:\n\
         Please contact to the collaborators in this repository."
    )
}

/// `label` was attached on behalf of `actor`
pub fn label_added(label: &str, actor: &str) -> String {
    format!(
        "***{label}*** was added to this pull request by: ***{actor}***. :wave:\n\
         **NOTE:** If this pull request is not merged while all conditions are met, \
         comment \"/check-pr\" to try again. :smile:"
    )
}

/// `label` was removed on behalf of `actor`
pub fn label_removed(label: &str, actor: &str) -> String {
    format!("***{label}*** was removed in this pull request by: ***{actor}***. :flushed:")
}

/// Approval labels dropped after new commits were pushed
pub fn labels_cleared(labels: &[String]) -> String {
    format!(
        "New code changes of pr are detected and remove these labels ***{}***. :flushed:",
        labels.join(", ")
    )
}

/// `/check-pr` found the PR blocked
pub fn not_mergeable(actor: &str, reasons: &[String]) -> String {
    format!(
        "@{actor} , this pr is not mergeable and the reasons are below:\n{}",
        reasons.join("\n")
    )
}
