//! Shared test utilities for the vcs workspace.
//!
//! This crate provides fixtures for the crate test suites. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] — real git repositories built with the `git` CLI
//! - [`recording`] — a runner that records invocations and a log sink that keeps messages

pub mod git;
pub mod recording;
