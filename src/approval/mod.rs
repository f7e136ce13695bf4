//! Approval label state machine
//!
//! Reviewers record approval with `/lgtm`, which attaches an approval
//! label; `/lgtm cancel` takes it back. The labels feed the merge gate.

mod command;
mod label;
mod machine;

pub use command::{Command, parse_commands};
pub use label::{
    APPROVED_LABEL, LABEL_LEN_LIMIT, LGTM_LABEL, LGTM_LABEL_PREFIX, all_approval_labels, encode,
    is_approval_label,
};
pub use machine::{
    ApprovalOutcome, ApprovalPlan, LabelModification, Standing, add_approval, execute_approval,
    plan_add_approval, plan_remove_approval, remove_approval, standing,
};
