//! Repository facade over the git command line

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::command::{self, Invocation, SearchMode};
use crate::config::Configuration;
use crate::parse::{self, StatusMap};
use crate::runner::{CommandRunner, ProcessOutput, SystemRunner};
use crate::{Error, Result, ToolError};

/// Name used as the prefix of every invocation log line.
const COMPONENT: &str = "git";

const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_TARGET: &str = "HEAD";

/// A git repository at a fixed path.
///
/// Every operation runs one git process (two for [`RepositoryHandle::remote_set_url`])
/// with the repository path as working directory, except
/// [`RepositoryHandle::clone_repository`], which runs without one and passes
/// the path as the clone destination.
///
/// Mutating operations return the handle so calls chain:
///
/// ```rust,no_run
/// use vcs_git::RepositoryHandle;
///
/// let repo = RepositoryHandle::new("/tmp/project");
/// repo.init()?.add("README.md")?.commit("Initial commit")?;
/// # Ok::<(), vcs_git::Error>(())
/// ```
///
/// Nothing coordinates concurrent handles pointing at the same path.
#[derive(Clone)]
pub struct RepositoryHandle {
    repository_path: PathBuf,
    config: Arc<Configuration>,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryHandle")
            .field("repository_path", &self.repository_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RepositoryHandle {
    /// Handle using the process-wide [`Configuration::shared_default`].
    pub fn new(repository_path: impl Into<PathBuf>) -> Self {
        Self::with_config(repository_path, Configuration::shared_default())
    }

    pub fn with_config(repository_path: impl Into<PathBuf>, config: Arc<Configuration>) -> Self {
        Self {
            repository_path: repository_path.into(),
            config,
            runner: Arc::new(SystemRunner),
        }
    }

    /// Replace the process runner.
    pub fn with_runner(self, runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner, ..self }
    }

    pub fn path(&self) -> &Path {
        &self.repository_path
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Create the repository directory if needed and run `git init` in it.
    pub fn init(&self) -> Result<&Self> {
        std::fs::create_dir_all(&self.repository_path)
            .map_err(|e| Error::io(&self.repository_path, e))?;
        self.run("Could not initialize repository", command::init())?;
        Ok(self)
    }

    /// Clone `url` into this handle's path.
    pub fn clone_repository(&self, url: &str) -> Result<&Self> {
        let invocation = self.invocation(command::clone(url, &self.repository_path));
        self.execute("Could not clone repository", &invocation)?;
        Ok(self)
    }

    pub fn list_remotes(&self) -> Result<Vec<String>> {
        let stdout = self.run("Could not list remotes", command::list_remotes())?;
        Ok(parse::parse_lines(&stdout))
    }

    /// Local branches, plus remote-tracking ones when `include_remote` is set.
    pub fn list_branches(&self, include_remote: bool) -> Result<Vec<String>> {
        let stdout = self.run(
            "Could not list branches",
            command::list_branches(include_remote),
        )?;
        Ok(parse::parse_branches(&stdout))
    }

    /// Describe `target` (default `HEAD`) from the nearest reachable tag or ref.
    pub fn describe(&self, search: SearchMode, target: Option<&str>) -> Result<String> {
        let stdout = self.run(
            "Could not describe reference",
            command::describe(search, target.unwrap_or(DEFAULT_TARGET)),
        )?;
        Ok(stdout.trim().to_string())
    }

    pub fn remote_set_fetch_url(&self, url: &str, remote: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not set remote fetch url",
            command::remote_set_url(remote.unwrap_or(DEFAULT_REMOTE), url, false),
        )?;
        Ok(self)
    }

    pub fn remote_set_push_url(&self, url: &str, remote: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not set remote push url",
            command::remote_set_url(remote.unwrap_or(DEFAULT_REMOTE), url, true),
        )?;
        Ok(self)
    }

    /// Set both the fetch and the push url.
    ///
    /// The two updates are separate invocations. If the push url update fails
    /// the new fetch url stays in place.
    pub fn remote_set_url(&self, url: &str, remote: Option<&str>) -> Result<&Self> {
        self.remote_set_fetch_url(url, remote)?
            .remote_set_push_url(url, remote)
    }

    pub fn remote_add(&self, url: &str, remote: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not add remote",
            command::remote_add(remote.unwrap_or(DEFAULT_REMOTE), url),
        )?;
        Ok(self)
    }

    pub fn remote_fetch(&self, prune: bool, remote: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not fetch from remote",
            command::fetch(prune, remote.unwrap_or(DEFAULT_REMOTE)),
        )?;
        Ok(self)
    }

    pub fn checkout(&self, reference: &str, force: bool) -> Result<&Self> {
        self.run(
            "Could not checkout reference",
            command::checkout(reference, force),
        )?;
        Ok(self)
    }

    pub fn push(&self, reference: &str, remote: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not push to remote",
            command::push(remote.unwrap_or(DEFAULT_REMOTE), reference),
        )?;
        Ok(self)
    }

    pub fn status(&self) -> Result<StatusMap> {
        let stdout = self.run("Could not get repository status", command::status())?;
        Ok(parse::parse_status(&stdout))
    }

    pub fn add(&self, path: &str) -> Result<&Self> {
        self.run("Could not add file", command::add(path))?;
        Ok(self)
    }

    pub fn rm(&self, path: &str) -> Result<&Self> {
        self.run("Could not remove file", command::rm(path))?;
        Ok(self)
    }

    /// Commit the index, signing with the configured identity when enabled.
    pub fn commit(&self, message: &str) -> Result<&Self> {
        self.run(
            "Could not commit changes",
            command::commit(message, self.config.commit_signing()),
        )?;
        Ok(self)
    }

    /// Create a tag, annotated when `message` is given.
    pub fn tag(&self, name: &str, message: Option<&str>) -> Result<&Self> {
        self.run(
            "Could not create tag",
            command::tag(name, message, self.config.tag_signing()),
        )?;
        Ok(self)
    }

    fn invocation(&self, args: Vec<OsString>) -> Invocation {
        Invocation::new(self.config.executable_path.as_os_str(), args)
            .with_timeout(self.config.timeout)
    }

    /// Run `args` inside the repository and return stdout.
    fn run(&self, message: &str, args: Vec<OsString>) -> Result<String> {
        let invocation = self.invocation(args).in_dir(&self.repository_path);
        self.execute(message, &invocation)
    }

    fn execute(&self, message: &str, invocation: &Invocation) -> Result<String> {
        let workdir = invocation
            .current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        self.config.logger.debug(&format!(
            "[{}] exec [{}] {}",
            COMPONENT,
            workdir,
            invocation.command_line()
        ));

        let output = match self.runner.run(invocation) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                return Err(Error::Timeout {
                    message: message.to_string(),
                    command: invocation.command_line(),
                    timeout: invocation.timeout().unwrap_or_default(),
                });
            }
            Err(e) => ProcessOutput::spawn_failure(&e),
        };

        if output.success() {
            Ok(output.stdout_text().into_owned())
        } else {
            Err(ToolError::new(message, invocation, output).into())
        }
    }
}
