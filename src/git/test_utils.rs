//! Shared test utilities for the `git` module.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Result;

use crate::data::{ChangeRecord, ChangeStatus};
use crate::git::RepoQuery;

/// In-memory repository.
///
/// Directories are registered by their `/`-separated path; a directory is
/// listed under its parent and has history unless marked otherwise.
#[derive(Default)]
pub(crate) struct FakeRepo {
    staged: Vec<ChangeRecord>,
    dirs: BTreeMap<String, bool>,
    failing_history: BTreeSet<String>,
    commits: BTreeSet<String>,
    subjects: Vec<String>,
    email: Option<String>,
}

impl FakeRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a directory with commit history.
    pub(crate) fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string(), true);
        self
    }

    /// Adds a directory that exists on disk but was never committed.
    pub(crate) fn with_untracked_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string(), false);
        self
    }

    /// Adds a directory whose history query fails.
    pub(crate) fn with_broken_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string(), true);
        self.failing_history.insert(path.to_string());
        self
    }

    pub(crate) fn with_staged(mut self, status: ChangeStatus, path: &str) -> Self {
        self.staged.push(ChangeRecord::new(path, status));
        self
    }

    pub(crate) fn with_commit(mut self, sha: &str) -> Self {
        self.commits.insert(sha.to_string());
        self
    }

    pub(crate) fn with_subjects(mut self, subjects: &[&str]) -> Self {
        self.subjects = subjects.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub(crate) fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl RepoQuery for FakeRepo {
    fn staged_changes(&self) -> Result<Vec<ChangeRecord>> {
        Ok(self.staged.clone())
    }

    fn list_subdirectories(&self, dir: &Path) -> Result<Vec<String>> {
        let parent = key(dir);
        Ok(self
            .dirs
            .keys()
            .filter_map(|path| match path.rsplit_once('/') {
                Some((p, name)) if p == parent => Some(name.to_string()),
                None if parent.is_empty() => Some(path.clone()),
                _ => None,
            })
            .collect())
    }

    fn has_history(&self, dir: &Path) -> Result<bool> {
        let path = key(dir);
        if self.failing_history.contains(&path) {
            anyhow::bail!("history query failed for {path}");
        }
        Ok(self.dirs.get(&path).copied().unwrap_or(false))
    }

    fn commit_exists(&self, token: &str) -> bool {
        self.commits.contains(token)
    }

    fn recent_subjects(&self, _branch: &str, count: usize) -> Result<Vec<String>> {
        Ok(self.subjects.iter().take(count).cloned().collect())
    }

    fn user_email(&self) -> Result<Option<String>> {
        Ok(self.email.clone())
    }
}
