//! Typed adapter over the `git` command-line tool
//!
//! Every operation builds an argument vector, runs the configured executable
//! synchronously, checks the exit status and parses stdout into a typed value.

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod parse;
pub mod repository;
pub mod runner;

pub use command::{Invocation, SearchMode};
pub use config::Configuration;
pub use error::{Error, Result, ToolError};
pub use logging::{LogSink, TracingSink};
pub use parse::{FileStatus, StatusMap};
pub use repository::RepositoryHandle;
pub use runner::{CommandRunner, ProcessOutput, SystemRunner};
