//! # commit-scope
//!
//! Conventional commit tooling for git hooks.
//!
//! - Infers a `type(scope)` label from the staged changes and pre-fills the
//!   commit message with it ([`suggest`]).
//! - Validates commit messages against the conventional commit grammar and
//!   project policy ([`lint`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_scope::config::LintConfig;
//! use commit_scope::message::MessageParser;
//!
//! let config = LintConfig::default();
//! let msg = MessageParser::new(&config).parse("feat(main): Add login").unwrap();
//! assert_eq!(msg.scope.as_deref(), Some("main"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod git;
pub mod lint;
pub mod message;
pub mod scope;
pub mod suggest;

pub use crate::cli::Cli;

/// The current version of commit-scope.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
