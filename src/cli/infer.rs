//! Infer command.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::formatting::{render_structured, OutputFormat};
use crate::cli::open_workspace;
use crate::scope::infer_label;

/// Infer command options.
#[derive(Parser)]
pub struct InferCommand {
    /// Output format: text prints the label, json/yaml the type and scope.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl InferCommand {
    /// Prints the label for the staged changes, e.g. `feat(billing)`.
    pub fn execute(self, config_dir: Option<&Path>) -> Result<()> {
        let (repo, config) = open_workspace(config_dir)?;
        let label = infer_label(&repo, &config)?;
        match render_structured(&label, self.format)? {
            Some(text) => print!("{text}"),
            None => println!("{label}"),
        }
        Ok(())
    }
}
