//! Prepare command: pre-fills the commit message file with a suggestion.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use crate::cli::open_workspace;
use crate::suggest::{prepare_message_file, should_prepare, PrepareOutcome, PLAIN_MESSAGE_SOURCE};

/// Prepare command options.
#[derive(Parser)]
pub struct PrepareCommand {
    /// Commit message file, as passed by the prepare-commit-msg hook.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source of the message (message, template, merge, squash, commit).
    #[arg(
        value_name = "SOURCE",
        env = "PRE_COMMIT_COMMIT_MSG_SOURCE",
        default_value = PLAIN_MESSAGE_SOURCE
    )]
    pub source: String,

    /// Commit object name, passed by git for the `commit` source.
    #[arg(value_name = "SHA", hide = true)]
    pub commit: Option<String>,
}

impl PrepareCommand {
    /// Executes the prepare command. Never fails: a suggestion is best-effort.
    pub fn execute(self, config_dir: Option<&Path>) -> Result<()> {
        if !should_prepare(&self.source) {
            debug!(source = %self.source, "Not a plain message, leaving file alone");
            return Ok(());
        }

        match self.prepare(config_dir) {
            Ok(PrepareOutcome::Written(label)) => info!("Suggested {label}"),
            Ok(PrepareOutcome::Untouched) => debug!("Message already present"),
            Err(e) => warn!("Could not prepare commit message: {e:#}"),
        }
        Ok(())
    }

    fn prepare(&self, config_dir: Option<&Path>) -> Result<PrepareOutcome> {
        let (repo, config) = open_workspace(config_dir)?;
        prepare_message_file(&self.file, &repo, &config)
    }
}
