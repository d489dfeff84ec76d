//! Shared configuration for repository handles

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Deserialize;

use crate::logging::{LogSink, TracingSink};
use crate::{Error, Result};

/// Executable used when none is configured, resolved through `PATH`.
const DEFAULT_EXECUTABLE: &str = "git";

static SHARED_DEFAULT: OnceLock<Arc<Configuration>> = OnceLock::new();

/// Settings injected into every operation of a [`crate::RepositoryHandle`].
///
/// Handles hold an `Arc<Configuration>`; one configuration is typically
/// shared by every handle a caller creates.
#[derive(Clone)]
pub struct Configuration {
    pub executable_path: PathBuf,
    pub logger: Arc<dyn LogSink>,
    pub sign_commits: bool,
    pub sign_commit_identity: String,
    pub sign_tags: bool,
    pub sign_tag_identity: String,
    /// Upper bound for a single invocation. `None` blocks until the process exits.
    pub timeout: Option<Duration>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from(DEFAULT_EXECUTABLE),
            logger: Arc::new(TracingSink),
            sign_commits: false,
            sign_commit_identity: String::new(),
            sign_tags: false,
            sign_tag_identity: String::new(),
            timeout: None,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("executable_path", &self.executable_path)
            .field("sign_commits", &self.sign_commits)
            .field("sign_commit_identity", &self.sign_commit_identity)
            .field("sign_tags", &self.sign_tags)
            .field("sign_tag_identity", &self.sign_tag_identity)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// On-disk form of [`Configuration`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    executable_path: Option<PathBuf>,
    timeout_secs: Option<u64>,
    signing: SigningSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SigningSection {
    commits: bool,
    commit_identity: String,
    tags: bool,
    tag_identity: String,
}

impl From<ConfigFile> for Configuration {
    fn from(file: ConfigFile) -> Self {
        let defaults = Configuration::default();
        Self {
            executable_path: file.executable_path.unwrap_or(defaults.executable_path),
            logger: defaults.logger,
            sign_commits: file.signing.commits,
            sign_commit_identity: file.signing.commit_identity,
            sign_tags: file.signing.tags,
            sign_tag_identity: file.signing.tag_identity,
            timeout: file.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Configuration {
    /// Load a TOML configuration file. The logger is always [`TracingSink`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content).map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        toml::from_str::<ConfigFile>(content)
            .map(Self::from)
            .map_err(|e| e.to_string())
    }

    pub fn with_logger(self, logger: Arc<dyn LogSink>) -> Self {
        Self { logger, ..self }
    }

    /// Identity for `commit --gpg-sign`, when commit signing is enabled.
    pub fn commit_signing(&self) -> Option<&str> {
        self.sign_commits.then_some(self.sign_commit_identity.as_str())
    }

    /// Identity for `tag -s -u`, when tag signing is enabled.
    pub fn tag_signing(&self) -> Option<&str> {
        self.sign_tags.then_some(self.sign_tag_identity.as_str())
    }

    /// The process-wide configuration used by [`crate::RepositoryHandle::new`].
    ///
    /// Initialized with [`Configuration::default`] on first use unless
    /// [`Configuration::install_default`] ran earlier.
    pub fn shared_default() -> Arc<Configuration> {
        SHARED_DEFAULT
            .get_or_init(|| Arc::new(Configuration::default()))
            .clone()
    }

    /// Install the process-wide configuration.
    ///
    /// Succeeds only once, and only before the first [`Configuration::shared_default`]
    /// call. On failure the rejected configuration is handed back.
    pub fn install_default(config: Configuration) -> std::result::Result<(), Configuration> {
        SHARED_DEFAULT
            .set(Arc::new(config))
            .map_err(|rejected| Arc::unwrap_or_clone(rejected))
    }
}
