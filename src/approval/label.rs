//! Approval label naming
//!
//! Pure functions mapping a reviewer to the label that records their
//! approval, and recognizing approval labels on a pull request.

use std::collections::BTreeSet;

/// Bare approval label, used when one approval is enough
pub const LGTM_LABEL: &str = "lgtm";

/// Prefix of per-reviewer approval labels
pub const LGTM_LABEL_PREFIX: &str = "lgtm-";

/// Label marking a PR as approved for merge by a maintainer
pub const APPROVED_LABEL: &str = "approved";

/// Length ceiling for approval labels, in bytes
pub const LABEL_LEN_LIMIT: usize = 20;

/// Label recording `identity`'s approval under a policy requiring
/// `required_count` approvals.
///
/// Single-approval policies share the bare label. Otherwise each reviewer
/// gets `lgtm-<login>`, lowercased and cut to [`LABEL_LEN_LIMIT`] bytes.
/// Two long logins with a common prefix map to the same label.
///
/// The limit counts bytes, the stricter measure: a label within 20 bytes is
/// within 20 characters whichever way the platform counts. GitHub logins
/// are ASCII, so for them the two coincide. A non-ASCII identity is cut at
/// the last whole character that fits.
pub fn encode(identity: &str, required_count: u32) -> String {
    if required_count <= 1 {
        return LGTM_LABEL.to_string();
    }

    let label = format!("{LGTM_LABEL_PREFIX}{}", identity.to_lowercase());
    truncate(label, LABEL_LEN_LIMIT)
}

/// Cut `label` to at most `limit` bytes without splitting a character
fn truncate(mut label: String, limit: usize) -> String {
    if label.len() <= limit {
        return label;
    }

    let end = label
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= limit)
        .last()
        .unwrap_or(0);
    label.truncate(end);
    label
}

/// Whether `label` records an approval
pub fn is_approval_label(label: &str) -> bool {
    label == LGTM_LABEL || label.starts_with(LGTM_LABEL_PREFIX)
}

/// Approval labels among `labels`, sorted
pub fn all_approval_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let found: BTreeSet<&String> = labels
        .into_iter()
        .filter(|l| is_approval_label(l))
        .collect();
    found.into_iter().cloned().collect()
}
