//! Merge gate and executor
//!
//! Three-phase pattern:
//! 1. Gather - resolve freeze rules (effectful, bounded)
//! 2. Check - `check_merge_readiness` (pure, testable)
//! 3. Execute - clear assignment and merge (effectful)

mod execute;
mod gate;

pub use execute::{execute_merge, try_merge};
pub use gate::{MSG_CONFLICTS, MergeReadiness, check_merge_readiness, evaluate};
