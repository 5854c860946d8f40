//! Scopes command: prints the valid scope snapshot.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::formatting::{render_structured, OutputFormat};
use crate::cli::open_workspace;
use crate::scope::{ScopeRegistry, ScopeSet};

/// Scopes command options.
#[derive(Parser)]
pub struct ScopesCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ScopesCommand {
    /// Executes the scopes command.
    pub fn execute(self, config_dir: Option<&Path>) -> Result<()> {
        let (repo, config) = open_workspace(config_dir)?;
        let scopes = ScopeRegistry::new(&repo, &config).valid_scopes();
        print!("{}", render_scopes(&scopes, self.format)?);
        Ok(())
    }
}

fn render_scopes(scopes: &ScopeSet, format: OutputFormat) -> Result<String> {
    match render_structured(scopes, format)? {
        Some(text) => Ok(text),
        None => Ok(scopes.iter().map(|s| format!("{s}\n")).collect()),
    }
}
