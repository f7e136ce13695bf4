//! Bot commands found in comment text
//!
//! Each command must sit alone on its own line; matching is
//! case-insensitive and ignores trailing whitespace.

use regex::Regex;
use std::sync::LazyLock;

static ADD_LGTM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^/lgtm\s*$").expect("static regex")
});

static REMOVE_LGTM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^/lgtm cancel\s*$").expect("static regex")
});

static CHECK_PR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^/check-pr\s*$").expect("static regex")
});

/// A command the bot reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/lgtm`: add the commenter's approval
    AddApproval,
    /// `/lgtm cancel`: withdraw approval
    RemoveApproval,
    /// `/check-pr`: evaluate the merge gate and merge if clear
    CheckPr,
}

/// All commands in `text`, in handling order, each at most once
pub fn parse_commands(text: &str) -> Vec<Command> {
    let mut commands = Vec::new();
    if ADD_LGTM.is_match(text) {
        commands.push(Command::AddApproval);
    }
    if REMOVE_LGTM.is_match(text) {
        commands.push(Command::RemoveApproval);
    }
    if CHECK_PR.is_match(text) {
        commands.push(Command::CheckPr);
    }
    commands
}
