//! Branch freeze rules
//!
//! A freeze blocks merges into a branch for a set of organizations, except
//! for a list of exempt owners. Rules live in YAML files on the platform and
//! are read fresh for every evaluation.

mod registry;
mod rule;

pub use registry::{decode_document, resolve};
pub use rule::{FreezeDocument, FreezeRule};
