//! Scope inference: which scopes exist, and which one a set of staged files belongs to.

pub mod classifier;
pub mod collapser;
pub mod registry;

pub use classifier::FileClassifier;
pub use collapser::ScopeCollapser;
pub use registry::{ScopeRegistry, ScopeSet};

use anyhow::Result;
use tracing::debug;

use crate::config::LintConfig;
use crate::data::ScopeCandidate;
use crate::git::RepoQuery;

/// Infers the `type(scope)` label for the currently staged changes.
///
/// The type is always one the project accepts, see
/// [`LintConfig::suggestable_type`].
pub fn infer_label(repo: &dyn RepoQuery, config: &LintConfig) -> Result<ScopeCandidate> {
    let changes = repo.staged_changes()?;
    let classifier = FileClassifier::new(config)?;
    let candidates: Vec<ScopeCandidate> = changes
        .iter()
        .map(|change| classifier.classify(&change.path))
        .collect();
    let mut label = ScopeCollapser::new(config).collapse(&candidates);

    let commit_type = config.suggestable_type(label.commit_type);
    if commit_type != label.commit_type {
        debug!(inferred = %label.commit_type, %commit_type, "Inferred type is disabled");
        label.commit_type = commit_type;
    }
    Ok(label)
}
