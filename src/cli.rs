//! CLI interface for commit-scope.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{self, LintConfig, CONFIG_DIR_ENV};
use crate::git::GitRepository;

pub mod check;
pub mod domain;
pub mod formatting;
pub mod infer;
pub mod prepare;
pub mod scopes;

/// commit-scope: conventional commit scope inference and message checks.
#[derive(Parser)]
#[command(name = "commit-scope")]
#[command(
    about = "Conventional commit scope inference and message enforcement for git hooks",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Config directory (defaults to $COMMIT_SCOPE_CONFIG_DIR, then .commit-scope/).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Hook entry points and inspection commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validates a commit message file (commit-msg hook).
    Check(check::CheckCommand),
    /// Pre-fills an empty commit message file (prepare-commit-msg hook).
    Prepare(prepare::PrepareCommand),
    /// Prints the type(scope) label inferred from the staged changes.
    Infer(infer::InferCommand),
    /// Lists the valid commit scopes of the repository.
    Scopes(scopes::ScopesCommand),
    /// Checks that the configured git email belongs to the company domain.
    #[command(name = "check-domain")]
    CheckDomain(domain::CheckDomainCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let config_dir = self.config_dir.as_deref();
        match self.command {
            Commands::Check(cmd) => cmd.execute(config_dir),
            Commands::Prepare(cmd) => cmd.execute(config_dir),
            Commands::Infer(cmd) => cmd.execute(config_dir),
            Commands::Scopes(cmd) => cmd.execute(config_dir),
            Commands::CheckDomain(cmd) => cmd.execute(config_dir),
        }
    }
}

/// Opens the repository containing the current directory and loads its config.
///
/// A relative config directory is resolved against the repository root so the
/// hooks behave the same from any subdirectory.
pub(crate) fn open_workspace(config_dir: Option<&Path>) -> Result<(GitRepository, LintConfig)> {
    let repo = GitRepository::open().context("Failed to open git repository")?;

    let env_dir = std::env::var(CONFIG_DIR_ENV).ok();
    let mut dir = config::config_dir(config_dir, env_dir.as_deref());
    if dir.is_relative() {
        if let Some(workdir) = repo.workdir() {
            dir = workdir.join(dir);
        }
    }
    debug!(config_dir = %dir.display(), "Resolved config directory");

    let config = LintConfig::load(&dir)?;
    Ok((repo, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::parse_from([
            "commit-scope",
            "check",
            ".git/COMMIT_EDITMSG",
            "--force-scope",
            "--config-dir",
            "hooks",
        ]);
        assert_eq!(cli.config_dir.as_deref(), Some(Path::new("hooks")));
        let Commands::Check(cmd) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(cmd.file, PathBuf::from(".git/COMMIT_EDITMSG"));
        assert!(cmd.force_scope);
        assert!(!cmd.strict);
    }

    #[test]
    fn prepare_source_positional_wins() {
        let cli = Cli::parse_from(["commit-scope", "prepare", "MSG", "merge"]);
        let Commands::Prepare(cmd) = cli.command else {
            panic!("expected prepare");
        };
        assert_eq!(cmd.source, "merge");
    }

    #[test]
    fn parses_output_formats() {
        let cli = Cli::parse_from(["commit-scope", "check", "MSG", "--format", "json"]);
        let Commands::Check(cmd) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(cmd.format, formatting::OutputFormat::Json);

        assert!(Cli::try_parse_from(["commit-scope", "scopes", "--format", "xml"]).is_err());
    }
}
