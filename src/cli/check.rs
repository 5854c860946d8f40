//! Check command: validates a commit message file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream};
use tracing::{debug, info};

use crate::cli::formatting::{render_rejection, render_structured, OutputFormat};
use crate::cli::open_workspace;
use crate::data::CommitMessage;
use crate::lint::{lint_bytes, LintOptions, LintOutcome};
use crate::message::{Rejection, ValidationError};

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Commit message file, as passed by the commit-msg hook.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Requires a scope in the header.
    #[arg(long)]
    pub force_scope: bool,

    /// Also checks merge and autosquash (fixup!/squash!/amend!) messages.
    #[arg(long)]
    pub strict: bool,

    /// Output format: text (default), json, yaml.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Machine-readable result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Whether the commit may proceed.
    pub passed: bool,
    /// The parsed message, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<CommitMessage>,
    /// First line of a message exempt from checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exempt: Option<String>,
    /// Rejection title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    /// One entry per failed check.
    pub errors: Vec<ValidationError>,
}

impl CheckReport {
    /// Builds the report for a lint result.
    pub fn new(result: &Result<LintOutcome, Rejection>) -> Self {
        let mut report = Self {
            passed: result.is_ok(),
            message: None,
            exempt: None,
            rejection: None,
            errors: Vec::new(),
        };
        match result {
            Ok(LintOutcome::Accepted(msg)) => report.message = Some(msg.clone()),
            Ok(LintOutcome::Exempt(first_line)) => report.exempt = Some(first_line.clone()),
            Err(rejection) => {
                report.rejection = Some(rejection.to_string());
                report.errors = rejection.errors();
            }
        }
        report
    }
}

impl CheckCommand {
    /// Executes the check command. Exits with status 1 when the message is rejected.
    pub fn execute(self, config_dir: Option<&Path>) -> Result<()> {
        let raw = fs::read(&self.file).with_context(|| {
            format!("Failed to read commit message file: {}", self.file.display())
        })?;
        let (repo, config) = open_workspace(config_dir)?;

        let options = LintOptions {
            force_scope: self.force_scope,
            strict: self.strict,
        };
        let result = lint_bytes(&raw, &config, &repo, options);

        if let Some(text) = render_structured(&CheckReport::new(&result), self.format)? {
            print!("{text}");
            if result.is_err() {
                std::process::exit(1);
            }
            return Ok(());
        }

        match result {
            Ok(LintOutcome::Accepted(msg)) => {
                debug!(commit_type = %msg.commit_type, scope = ?msg.scope, "Commit message accepted");
                Ok(())
            }
            Ok(LintOutcome::Exempt(first_line)) => {
                info!("Skipping checks for: {first_line}");
                Ok(())
            }
            Err(rejection) => {
                let mut stdout = StandardStream::stdout(ColorChoice::Auto);
                render_rejection(&rejection, &mut stdout)
                    .context("Failed to write rejection report")?;
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CommitType;

    #[test]
    fn rejected_report_lists_errors() -> Result<()> {
        let report = CheckReport::new(&Err(Rejection::InvalidSha(vec!["abc1234".into()])));
        assert!(!report.passed);

        let json = render_structured(&report, OutputFormat::Json)?.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["passed"], false);
        assert_eq!(value["rejection"], "Commit type fix/revert: invalid sha");
        assert_eq!(value["errors"][0]["kind"], "invalid-sha");
        assert_eq!(value["errors"][0]["detail"], "Unknown commit sha: abc1234");
        assert!(value.get("message").is_none());
        Ok(())
    }

    #[test]
    fn encoding_and_grammar_rejections_have_one_error() {
        let encoding = CheckReport::new(&Err(Rejection::Encoding));
        assert_eq!(encoding.errors.len(), 1);
        assert_eq!(encoding.errors[0].kind, crate::message::ErrorKind::Encoding);

        let grammar = CheckReport::new(&Err(Rejection::GrammarMismatch {
            message: "oops".into(),
        }));
        assert_eq!(grammar.errors[0].kind, crate::message::ErrorKind::GrammarMismatch);
    }

    #[test]
    fn accepted_report_carries_message() -> Result<()> {
        let msg = CommitMessage {
            commit_type: CommitType::Feat,
            scope: Some("main".into()),
            breaking: false,
            subject: "Add x".into(),
            body: None,
        };
        let report = CheckReport::new(&Ok(LintOutcome::Accepted(msg)));
        let yaml = render_structured(&report, OutputFormat::Yaml)?.unwrap();
        insta::assert_snapshot!(yaml, @r"
        passed: true
        message:
          commit_type: feat
          scope: main
          breaking: false
          subject: Add x
          body: null
        errors: []
        ");
        Ok(())
    }

    #[test]
    fn exempt_report() {
        let report = CheckReport::new(&Ok(LintOutcome::Exempt("Merge branch 'x'".into())));
        assert!(report.passed);
        assert_eq!(report.exempt.as_deref(), Some("Merge branch 'x'"));
        assert!(report.errors.is_empty());
    }
}
