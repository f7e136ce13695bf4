//! CLI command implementations

mod check;
mod comment;
mod context;
mod freeze;

pub use check::run_check;
pub use comment::run_comment;
pub use freeze::run_freeze;
