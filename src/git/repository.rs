//! Git repository operations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{Delta, ErrorCode, Reference, Repository};
use tracing::debug;

use crate::data::{ChangeRecord, ChangeStatus};
use crate::git::RepoQuery;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing the current directory
    pub fn open() -> Result<Self> {
        Self::discover(".")
    }

    /// Open the repository containing `path`, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// HEAD reference, or `None` before the first commit
    fn head(&self) -> Result<Option<Reference<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to get HEAD reference"),
        }
    }
}

impl RepoQuery for GitRepository {
    fn staged_changes(&self) -> Result<Vec<ChangeRecord>> {
        let head_tree = match self.head()? {
            Some(head) => Some(head.peel_to_tree().context("Failed to peel HEAD to tree")?),
            None => None,
        };
        let index = self.repo.index().context("Failed to read index")?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
            .context("Failed to diff index against HEAD")?;

        let mut modified = Vec::new();
        let mut added = Vec::new();
        for delta in diff.deltas() {
            let Some(path) = delta.new_file().path().and_then(Path::to_str) else {
                continue;
            };
            match delta.status() {
                Delta::Modified => {
                    modified.push(ChangeRecord::new(path, ChangeStatus::Modified));
                }
                Delta::Added => added.push(ChangeRecord::new(path, ChangeStatus::Added)),
                other => debug!(path, status = ?other, "Ignoring staged change"),
            }
        }

        modified.extend(added);
        Ok(modified)
    }

    fn list_subdirectories(&self, dir: &Path) -> Result<Vec<String>> {
        let workdir = self
            .repo
            .workdir()
            .context("Repository has no working directory")?;
        let full = workdir.join(dir);

        let mut names = Vec::new();
        for entry in fs::read_dir(&full)
            .with_context(|| format!("Failed to list directory: {}", full.display()))?
        {
            let entry = entry.with_context(|| format!("Failed to read {}", full.display()))?;
            if !entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn has_history(&self, dir: &Path) -> Result<bool> {
        if self.head()?.is_none() {
            return Ok(false);
        }

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push_head().context("Failed to push HEAD")?;

        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;
            let tree = commit.tree().context("Failed to get commit tree")?;
            if tree.get_path(dir).is_ok() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn commit_exists(&self, token: &str) -> bool {
        self.repo
            .revparse_single(token)
            .and_then(|obj| obj.peel_to_commit())
            .is_ok()
    }

    fn recent_subjects(&self, branch: &str, count: usize) -> Result<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let tip = self
            .repo
            .revparse_single(branch)
            .with_context(|| format!("Failed to resolve branch: {branch}"))?
            .peel_to_commit()
            .with_context(|| format!("{branch} does not point at a commit"))?;

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push(tip.id()).context("Failed to push branch tip")?;

        let mut subjects = Vec::with_capacity(count);
        for oid in walker.take(count) {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;
            subjects.push(commit.summary().unwrap_or_default().to_string());
        }

        Ok(subjects)
    }

    fn user_email(&self) -> Result<Option<String>> {
        let config = self.repo.config().context("Failed to read git config")?;
        match config.get_string("user.email") {
            Ok(email) => Ok(Some(email)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read user.email"),
        }
    }
}
