//! Valid scopes derived from the repository's directory layout and history.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::LintConfig;
use crate::git::RepoQuery;

/// Sorted, deduplicated set of scope names.
pub type ScopeSet = BTreeSet<String>;

/// Enumerates valid scopes from live repository state.
///
/// Nothing is cached: every call re-reads the directory tree, which can change
/// between commits.
pub struct ScopeRegistry<'a> {
    repo: &'a dyn RepoQuery,
    config: &'a LintConfig,
}

impl<'a> ScopeRegistry<'a> {
    /// Creates a registry over `repo`.
    pub fn new(repo: &'a dyn RepoQuery, config: &'a LintConfig) -> Self {
        Self { repo, config }
    }

    /// Computes the valid scopes.
    ///
    /// First-level directories with history (minus ignored and declared
    /// top-level ones) and their committed subdirectories are collected,
    /// together with the declared top-level directories, then mapped through
    /// the alias table. Names aliased to the empty string are dropped.
    pub fn valid_scopes(&self) -> ScopeSet {
        let dirs: Vec<String> = self
            .committed_subdirectories(Path::new(""))
            .into_iter()
            .filter(|d| !self.config.is_top_level_dir(d))
            .collect();

        let mut names: Vec<String> = Vec::new();
        for dir in &dirs {
            names.extend(self.committed_subdirectories(Path::new(dir)));
        }
        names.extend(self.config.top_level_scope_dirs.iter().cloned());
        names.extend(dirs);

        let scopes: ScopeSet = names
            .iter()
            .map(|name| self.config.alias(name))
            .filter(|scope| !scope.is_empty())
            .map(str::to_string)
            .collect();
        debug!(count = scopes.len(), "Computed valid scopes");
        scopes
    }

    /// Non-ignored subdirectories of `dir` that appear in history.
    ///
    /// Query failures make the affected directory contribute nothing.
    fn committed_subdirectories(&self, dir: &Path) -> Vec<String> {
        let names = match self.repo.list_subdirectories(dir) {
            Ok(names) => names,
            Err(e) => {
                warn!("Cannot list {}: {e:#}", dir.display());
                return Vec::new();
            }
        };

        names
            .into_iter()
            .filter(|name| !self.config.is_ignored_dir(name))
            .filter(|name| match self.repo.has_history(&dir.join(name)) {
                Ok(has) => has,
                Err(e) => {
                    warn!("Skipping {name} as a scope, history query failed: {e:#}");
                    false
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_utils::FakeRepo;

    fn scopes(repo: &FakeRepo, config: &LintConfig) -> Vec<String> {
        ScopeRegistry::new(repo, config)
            .valid_scopes()
            .into_iter()
            .collect()
    }

    #[test]
    fn two_level_layout_with_declared_dirs() {
        let repo = FakeRepo::new()
            .with_dir(".git")
            .with_dir(".github")
            .with_dir(".github/workflows")
            .with_dir("services")
            .with_dir("services/billing")
            .with_dir("services/auth")
            .with_dir("src")
            .with_dir("src/main")
            .with_dir("src/test");

        assert_eq!(
            scopes(&repo, &LintConfig::default()),
            vec![
                "auth",
                "billing",
                "main",
                "pre-commit",
                "services",
                "src",
                "test"
            ]
        );
    }

    #[test]
    fn directories_without_history_are_skipped() {
        let repo = FakeRepo::new()
            .with_dir("services")
            .with_untracked_dir("services/scratch")
            .with_untracked_dir("build");

        let result = scopes(&repo, &LintConfig::default());
        assert!(result.contains(&"services".to_string()));
        assert!(!result.contains(&"scratch".to_string()));
        assert!(!result.contains(&"build".to_string()));
    }

    #[test]
    fn ignored_dirs_are_skipped_at_both_levels() {
        let repo = FakeRepo::new()
            .with_dir("project")
            .with_dir("project/plugins")
            .with_dir("app")
            .with_dir("app/target");

        let result = scopes(&repo, &LintConfig::default());
        assert!(result.contains(&"app".to_string()));
        assert!(!result.contains(&"project".to_string()));
        assert!(!result.contains(&"plugins".to_string()));
        assert!(!result.contains(&"target".to_string()));
    }

    #[test]
    fn failing_history_query_fails_open() {
        let repo = FakeRepo::new()
            .with_broken_dir("legacy")
            .with_dir("app")
            .with_dir("app/core");

        let result = scopes(&repo, &LintConfig::default());
        assert!(!result.contains(&"legacy".to_string()));
        assert!(result.contains(&"core".to_string()));
    }

    #[test]
    fn aliases_apply_to_every_level() -> anyhow::Result<()> {
        let config = LintConfig::from_yaml(
            "top_level_scope_dirs: []\nscope_aliases:\n  services: svc\n  legacy: ''\n",
        )?;
        let repo = FakeRepo::new()
            .with_dir("services")
            .with_dir("services/legacy");

        assert_eq!(scopes(&repo, &config), vec!["svc"]);
        Ok(())
    }

    #[test]
    fn empty_repository_still_offers_declared_dirs() {
        assert_eq!(
            scopes(&FakeRepo::new(), &LintConfig::default()),
            vec!["main", "pre-commit"]
        );
    }
}
