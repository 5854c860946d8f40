//! Commit references required in fix and revert bodies.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::data::CommitMessage;
use crate::git::RepoQuery;
use crate::message::{is_comment, Rejection};

static SHA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{7,40}\b").unwrap());

/// Returns the distinct abbreviated or full commit hashes cited in `body`,
/// in order of first appearance. Comment lines are not searched.
pub fn find_sha_tokens(body: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for line in body.lines().filter(|line| !is_comment(line)) {
        for m in SHA_PATTERN.find_iter(line) {
            if !tokens.iter().any(|t| t == m.as_str()) {
                tokens.push(m.as_str().to_string());
            }
        }
    }
    tokens
}

/// Requires the body to cite at least one commit, and every cited commit to exist.
pub fn check_references(msg: &CommitMessage, repo: &dyn RepoQuery) -> Result<(), Rejection> {
    let tokens = find_sha_tokens(msg.body.as_deref().unwrap_or_default());
    if tokens.is_empty() {
        return Err(Rejection::MissingSha);
    }

    let invalid: Vec<String> = tokens
        .into_iter()
        .filter(|token| {
            let exists = repo.commit_exists(token);
            debug!(token = %token, exists, "Resolved cited commit");
            !exists
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(Rejection::InvalidSha(invalid))
    }
}
