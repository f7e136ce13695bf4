//! lgtm-bot: approval labels and a merge gate for pull requests
//!
//! Reviewers approve with `/lgtm`, which attaches approval labels. The merge
//! gate combines those labels with required/forbidden labels, conflict state
//! and branch freezes into a merge verdict, and merges when nothing blocks.

pub mod approval;
pub mod auth;
pub mod bot;
pub mod config;
pub mod error;
pub mod freeze;
pub mod merge;
pub mod notice;
pub mod platform;
pub mod types;
