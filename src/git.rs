//! Repository queries consumed by scope inference and message enforcement.

use std::path::Path;

use anyhow::Result;

use crate::data::ChangeRecord;

pub mod repository;
#[cfg(test)]
pub(crate) mod test_utils;

pub use repository::GitRepository;

/// Narrow view of the version-control state.
///
/// [`GitRepository`] answers these with `git2`; tests use an in-memory fake.
pub trait RepoQuery {
    /// Lists staged additions and modifications.
    fn staged_changes(&self) -> Result<Vec<ChangeRecord>>;

    /// Lists the names of the directories directly inside `dir`
    /// (relative to the repository root).
    fn list_subdirectories(&self, dir: &Path) -> Result<Vec<String>>;

    /// Whether any commit reachable from HEAD contains `dir`.
    fn has_history(&self, dir: &Path) -> Result<bool>;

    /// Whether `token` resolves to a commit.
    fn commit_exists(&self, token: &str) -> bool;

    /// Returns up to `count` most recent subject lines on `branch`.
    fn recent_subjects(&self, branch: &str, count: usize) -> Result<Vec<String>>;

    /// Returns the configured `user.email`, if any.
    fn user_email(&self) -> Result<Option<String>>;
}
