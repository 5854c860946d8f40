//! Commit message suggestion: pre-fills an empty message file with the
//! inferred `type(scope): ` prefix and guidance comments.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::LintConfig;
use crate::data::ScopeCandidate;
use crate::git::RepoQuery;
use crate::scope::{infer_label, ScopeRegistry, ScopeSet};

/// Commit source for a plain `git commit` without `-m`, merge or squash.
pub const PLAIN_MESSAGE_SOURCE: &str = "message";

/// Whether a message with this commit source should be pre-filled.
pub fn should_prepare(source: &str) -> bool {
    source == PLAIN_MESSAGE_SOURCE
}

/// What happened to the message file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The file was pre-filled with this label.
    Written(ScopeCandidate),
    /// The file already had content and was left alone.
    Untouched,
}

/// Pre-fills the message file at `path` unless it already holds a message.
pub fn prepare_message_file(
    path: &Path,
    repo: &dyn RepoQuery,
    config: &LintConfig,
) -> Result<PrepareOutcome> {
    let existing = fs::read_to_string(path)
        .with_context(|| format!("Failed to read commit message file: {}", path.display()))?;
    if has_content(&existing) {
        debug!("Message file already has content");
        return Ok(PrepareOutcome::Untouched);
    }

    let label = infer_label(repo, config)?;
    let scopes = ScopeRegistry::new(repo, config).valid_scopes();
    let examples = match repo.recent_subjects(&config.main_branch, config.include_examples) {
        Ok(subjects) => subjects,
        Err(e) => {
            warn!("Skipping examples from {}: {e:#}", config.main_branch);
            Vec::new()
        }
    };

    let content = compose(&existing, &label, &guidance(config, &scopes, &examples));
    fs::write(path, content)
        .with_context(|| format!("Failed to write commit message file: {}", path.display()))?;
    Ok(PrepareOutcome::Written(label))
}

/// Whether `existing` has any line that is neither blank nor a comment.
pub fn has_content(existing: &str) -> bool {
    existing
        .lines()
        .any(|line| !line.trim().is_empty() && !line.starts_with('#'))
}

/// Builds the new file content: the label prefix, the guidance, then the
/// original content without git's own "Please enter the commit message" block.
pub fn compose(existing: &str, label: &ScopeCandidate, guidance: &str) -> String {
    let mut out = format!("{}: {guidance}", label.label());

    let mut skipping = false;
    for line in existing.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if is_git_instructions(bare) {
            skipping = true;
            continue;
        }
        if bare == "#" && skipping {
            skipping = false;
            continue;
        }
        if !skipping {
            out.push_str(line);
        }
    }

    out
}

/// First line of git's default comment block (any comment character).
fn is_git_instructions(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next().is_some() && chars.as_str().starts_with(" Please enter the commit message")
}

/// Comment block listing the valid types, scopes and recent example subjects.
pub fn guidance(config: &LintConfig, scopes: &ScopeSet, examples: &[String]) -> String {
    let types = config
        .types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let scopes = scopes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        String::new(),
        String::new(),
        "# Please enter the commit message for your changes following".to_string(),
        "# conventional commit guide-lines. Lines starting with '#' will".to_string(),
        "# be ignored, and an empty message or a commit message that does".to_string(),
        "# not comply with commit guidelines, aborts the commit.".to_string(),
        "#".to_string(),
        "# Valid conventional commit types:".to_string(),
        format!("#  {types}"),
        "#".to_string(),
        "# Valid conventional commit scopes:".to_string(),
        format!("#  {scopes}"),
        "#".to_string(),
    ];

    if !examples.is_empty() {
        lines.push("# Some examples:".to_string());
        lines.push("#".to_string());
        lines.extend(examples.iter().map(|subject| format!("# {subject}")));
        lines.push("#".to_string());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
