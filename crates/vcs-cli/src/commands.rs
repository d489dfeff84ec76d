//! Command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use colored::Colorize;
use vcs_git::parse::format_status;
use vcs_git::{Configuration, RepositoryHandle, SearchMode};

use crate::cli::{Cli, Commands};
use crate::error::Result;

/// Resolve the configuration: explicit file, then the user config file, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Configuration> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "Loading config");
        return Ok(Configuration::load(path)?);
    }

    match user_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "Loading user config");
            Ok(Configuration::load(&path)?)
        }
        _ => Ok(Configuration::default()),
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vcs").join("config.toml"))
}

/// Run one git-backed command against `repo`.
pub fn run(repo: &Path, config: Configuration, command: Commands) -> Result<()> {
    let handle = RepositoryHandle::with_config(repo, Arc::new(config));

    match command {
        Commands::Init => {
            handle.init()?;
            println!("{} Initialized repository at {}", "✓".green(), repo.display());
        }
        Commands::Clone { url } => {
            handle.clone_repository(&url)?;
            println!("{} Cloned {} into {}", "✓".green(), url, repo.display());
        }
        Commands::Remotes => print_lines(&handle.list_remotes()?),
        Commands::Branches { all } => print_lines(&handle.list_branches(all)?),
        Commands::Describe { target, search } => {
            let described =
                handle.describe(SearchMode::from_name(&search), Some(target.as_str()))?;
            println!("{}", described);
        }
        Commands::RemoteAdd { url, remote } => {
            handle.remote_add(&url, Some(remote.as_str()))?;
            println!("{} Added remote {}", "✓".green(), remote);
        }
        Commands::RemoteSetUrl {
            url,
            remote,
            fetch_only,
            push_only,
        } => {
            if fetch_only {
                handle.remote_set_fetch_url(&url, Some(remote.as_str()))?;
            } else if push_only {
                handle.remote_set_push_url(&url, Some(remote.as_str()))?;
            } else {
                handle.remote_set_url(&url, Some(remote.as_str()))?;
            }
            println!("{} Updated remote {}", "✓".green(), remote);
        }
        Commands::Fetch { prune, remote } => {
            handle.remote_fetch(prune, Some(remote.as_str()))?;
            println!("{} Fetched {}", "✓".green(), remote);
        }
        Commands::Checkout { reference, force } => {
            handle.checkout(&reference, force)?;
            println!("{} Checked out {}", "✓".green(), reference);
        }
        Commands::Push { reference, remote } => {
            handle.push(&reference, Some(remote.as_str()))?;
            println!("{} Pushed {} to {}", "✓".green(), reference, remote);
        }
        Commands::Status { json } => {
            let statuses = handle.status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else if statuses.is_empty() {
                println!("{}", "Nothing to commit, working tree clean".dimmed());
            } else {
                print!("{}", format_status(&statuses));
            }
        }
        Commands::Add { path } => {
            handle.add(&path)?;
            println!("{} Staged {}", "✓".green(), path);
        }
        Commands::Rm { path } => {
            handle.rm(&path)?;
            println!("{} Removed {}", "✓".green(), path);
        }
        Commands::Commit { message } => {
            handle.commit(&message)?;
            println!("{} Committed", "✓".green());
        }
        Commands::Tag { name, message } => {
            handle.tag(&name, message.as_deref())?;
            println!("{} Tagged {}", "✓".green(), name);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "vcs", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
