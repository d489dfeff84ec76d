//! Argument vectors for each git subcommand
//!
//! The functions here are pure: they take operation parameters and return the
//! subcommand tokens, flags first and positionals last. [`Invocation`] joins
//! those tokens with the executable path and the process context.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which tags `git describe` may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Annotated tags only (no flag)
    #[default]
    Annotated,

    /// Lightweight tags too (`--tags`)
    Lightweight,

    /// Any ref (`--all`)
    All,
}

impl SearchMode {
    /// Resolve a mode by name.
    ///
    /// Unrecognized names resolve to [`SearchMode::Annotated`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "lightweight" => Self::Lightweight,
            "all" => Self::All,
            _ => Self::Annotated,
        }
    }

    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::Annotated => None,
            Self::Lightweight => Some("--tags"),
            Self::All => Some("--all"),
        }
    }
}

impl From<&str> for SearchMode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    argv: Vec<OsString>,
    current_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Invocation {
    /// `program` followed by `args`, with no working directory and no timeout.
    pub fn new(program: impl Into<OsString>, args: Vec<OsString>) -> Self {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program.into());
        argv.extend(args);
        Self {
            argv,
            current_dir: None,
            timeout: None,
        }
    }

    pub fn in_dir(self, dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The argument vector as strings, lossy for non UTF-8 tokens.
    pub fn argv_lossy(&self) -> Vec<String> {
        self.argv
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Space-joined command line, for logs and error reports.
    pub fn command_line(&self) -> String {
        self.argv_lossy().join(" ")
    }
}

fn tokens<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

pub fn init() -> Vec<OsString> {
    tokens(["init"])
}

pub fn clone(url: &str, destination: &Path) -> Vec<OsString> {
    let mut args = tokens(["clone", url]);
    args.push(destination.as_os_str().to_owned());
    args
}

pub fn list_remotes() -> Vec<OsString> {
    tokens(["remote"])
}

pub fn list_branches(include_remote: bool) -> Vec<OsString> {
    let mut args = tokens(["branch"]);
    if include_remote {
        args.push("-a".into());
    }
    args
}

pub fn describe(search: SearchMode, target: &str) -> Vec<OsString> {
    let mut args = tokens(["describe"]);
    if let Some(flag) = search.flag() {
        args.push(flag.into());
    }
    args.push(target.into());
    args
}

pub fn remote_set_url(remote: &str, url: &str, push: bool) -> Vec<OsString> {
    let mut args = tokens(["remote", "set-url"]);
    if push {
        args.push("--push".into());
    }
    args.extend(tokens([remote, url]));
    args
}

pub fn remote_add(remote: &str, url: &str) -> Vec<OsString> {
    tokens(["remote", "add", remote, url])
}

pub fn fetch(prune: bool, remote: &str) -> Vec<OsString> {
    let mut args = tokens(["fetch"]);
    if prune {
        args.push("--prune".into());
    }
    args.push(remote.into());
    args
}

pub fn checkout(reference: &str, force: bool) -> Vec<OsString> {
    let mut args = tokens(["checkout"]);
    if force {
        args.push("-f".into());
    }
    args.push(reference.into());
    args
}

pub fn push(remote: &str, reference: &str) -> Vec<OsString> {
    tokens(["push", remote, reference])
}

pub fn status() -> Vec<OsString> {
    tokens(["status", "-s"])
}

pub fn add(path: &str) -> Vec<OsString> {
    tokens(["add", path])
}

pub fn rm(path: &str) -> Vec<OsString> {
    tokens(["rm", path])
}

/// `signing_identity` is `Some` only when commit signing is enabled.
pub fn commit(message: &str, signing_identity: Option<&str>) -> Vec<OsString> {
    let mut args = tokens(["commit"]);
    if let Some(identity) = signing_identity {
        args.push(format!("--gpg-sign={}", identity).into());
    }
    args.extend(tokens(["-m", message]));
    args
}

/// `signing_identity` is `Some` only when tag signing is enabled.
pub fn tag(name: &str, message: Option<&str>, signing_identity: Option<&str>) -> Vec<OsString> {
    let mut args = tokens(["tag"]);
    if let Some(identity) = signing_identity {
        args.extend(tokens(["-s", "-u", identity]));
    }
    if let Some(message) = message {
        args.extend(tokens(["-m", message]));
    }
    args.push(name.into());
    args
}
