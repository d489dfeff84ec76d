//! Parsers for git's textual output

use std::collections::BTreeMap;

use serde::Serialize;

/// Change state of one file in `git status -s` output.
///
/// At least one side is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    /// Column 0 of the status line
    pub working_tree: Option<char>,

    /// Column 1 of the status line
    pub index: Option<char>,
}

/// Repository-relative path to its status.
pub type StatusMap = BTreeMap<String, FileStatus>;

fn state(c: char) -> Option<char> {
    (!c.is_whitespace()).then_some(c)
}

/// Parse short status output.
///
/// Blank lines and lines with two blank status columns are skipped. When a
/// path repeats, the last line wins.
pub fn parse_status(output: &str) -> StatusMap {
    let mut statuses = StatusMap::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut chars = line.chars();
        let working_tree = chars.next().and_then(state);
        let index = chars.next().and_then(state);
        if working_tree.is_none() && index.is_none() {
            continue;
        }

        let path = chars.as_str().trim();
        statuses.insert(
            path.to_string(),
            FileStatus {
                working_tree,
                index,
            },
        );
    }

    statuses
}

/// Render a status map in the short format [`parse_status`] reads.
pub fn format_status(statuses: &StatusMap) -> String {
    let mut out = String::new();
    for (path, status) in statuses {
        out.push(status.working_tree.unwrap_or(' '));
        out.push(status.index.unwrap_or(' '));
        out.push(' ');
        out.push_str(path);
        out.push('\n');
    }
    out
}

/// Trimmed, non-empty lines in encounter order.
pub fn parse_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// `git branch` output with the current-branch marker removed.
pub fn parse_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.strip_prefix('*').unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
