//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// vcs - Run git operations through a typed adapter
#[derive(Parser, Debug)]
#[command(name = "vcs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (logs every git invocation)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository path
    #[arg(long, global = true, default_value = ".", env = "VCS_REPO")]
    pub repo: PathBuf,

    /// Configuration file (defaults to <config dir>/vcs/config.toml when present)
    #[arg(long, global = true, env = "VCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a repository, creating the directory if needed
    Init,

    /// Clone a repository into the --repo path
    Clone {
        /// Repository URL
        url: String,
    },

    /// List remotes
    Remotes,

    /// List branches
    Branches {
        /// Include remote-tracking branches
        #[arg(short, long)]
        all: bool,
    },

    /// Describe a reference from the nearest tag
    ///
    /// Search modes: annotated (default), lightweight, all.
    /// Unrecognized modes behave like annotated.
    Describe {
        /// Reference to describe
        #[arg(default_value = "HEAD")]
        target: String,

        /// Which tags to consider
        #[arg(short, long, default_value = "annotated")]
        search: String,
    },

    /// Add a remote
    RemoteAdd {
        /// Remote URL
        url: String,

        /// Remote name
        #[arg(short, long, default_value = "origin")]
        remote: String,
    },

    /// Change a remote's URL (fetch and push unless restricted)
    RemoteSetUrl {
        /// New URL
        url: String,

        /// Remote name
        #[arg(short, long, default_value = "origin")]
        remote: String,

        /// Only change the fetch URL
        #[arg(long, conflicts_with = "push_only")]
        fetch_only: bool,

        /// Only change the push URL
        #[arg(long)]
        push_only: bool,
    },

    /// Fetch from a remote
    Fetch {
        /// Remove remote-tracking refs that no longer exist on the remote
        #[arg(short, long)]
        prune: bool,

        /// Remote name
        #[arg(short, long, default_value = "origin")]
        remote: String,
    },

    /// Check out a branch, tag or commit
    Checkout {
        /// Reference to check out
        reference: String,

        /// Discard local changes
        #[arg(short, long)]
        force: bool,
    },

    /// Push a reference to a remote
    Push {
        /// Reference to push
        reference: String,

        /// Remote name
        #[arg(short, long, default_value = "origin")]
        remote: String,
    },

    /// Show working tree status
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Stage a path
    Add {
        /// Path to stage
        path: String,
    },

    /// Remove a path from the working tree and the index
    Rm {
        /// Path to remove
        path: String,
    },

    /// Commit staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Create a tag (annotated when a message is given)
    Tag {
        /// Tag name
        name: String,

        /// Tag message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   vcs completions bash > ~/.local/share/bash-completion/completions/vcs
    ///   vcs completions zsh > ~/.zfunc/_vcs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["vcs", "remotes"]);
        assert!(!cli.verbose);
        assert_eq!(cli.repo, PathBuf::from("."));
        assert_eq!(cli.config, None);
        assert_eq!(cli.command, Commands::Remotes);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vcs", "status", "--json", "--repo", "/tmp/r", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.repo, PathBuf::from("/tmp/r"));
        assert_eq!(cli.command, Commands::Status { json: true });
    }

    #[test]
    fn parse_describe_defaults() {
        let cli = Cli::parse_from(["vcs", "describe"]);
        assert_eq!(
            cli.command,
            Commands::Describe {
                target: "HEAD".into(),
                search: "annotated".into(),
            }
        );
    }

    #[test]
    fn parse_describe_keeps_unknown_mode() {
        let cli = Cli::parse_from(["vcs", "describe", "v1", "--search", "tagz"]);
        match cli.command {
            Commands::Describe { target, search } => {
                assert_eq!(target, "v1");
                assert_eq!(search, "tagz");
            }
            _ => panic!("Expected Describe command"),
        }
    }

    #[test]
    fn parse_remote_set_url_flags_conflict() {
        let result = Cli::try_parse_from([
            "vcs",
            "remote-set-url",
            "u",
            "--fetch-only",
            "--push-only",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_fetch_command() {
        let cli = Cli::parse_from(["vcs", "fetch", "--prune", "-r", "upstream"]);
        assert_eq!(
            cli.command,
            Commands::Fetch {
                prune: true,
                remote: "upstream".into(),
            }
        );
    }

    #[test]
    fn parse_tag_with_message() {
        let cli = Cli::parse_from(["vcs", "tag", "v1.0", "-m", "First"]);
        assert_eq!(
            cli.command,
            Commands::Tag {
                name: "v1.0".into(),
                message: Some("First".into()),
            }
        );
    }

    #[test]
    fn parse_commit_requires_message() {
        assert!(Cli::try_parse_from(["vcs", "commit"]).is_err());
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["vcs", "completions", "bash"]);
        assert!(matches!(cli.command, Commands::Completions { .. }));
    }
}
