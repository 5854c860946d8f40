//! Project configuration: commit types, scope layout, aliases, yields and message policy.
//!
//! All tables live in one immutable [`LintConfig`] built once at startup and
//! passed by reference into every component.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use anyhow::{Context, Result};
use globset::Glob;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::CommitType;

pub mod discovery;

pub use discovery::{config_dir, ConfigSource, CONFIG_DIR_ENV, CONFIG_FILE};

/// Limits applied to commit message subjects and bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePolicy {
    /// Maximum subject length in characters.
    pub subject_max_len: usize,
    /// Minimum number of non-comment body lines.
    pub body_min_lines: usize,
    /// Maximum length of a non-comment body line in characters.
    pub body_line_max_len: usize,
    /// Types whose body must cite existing commits.
    pub reference_types: Vec<CommitType>,
}

impl Default for MessagePolicy {
    fn default() -> Self {
        Self {
            subject_max_len: 50,
            body_min_lines: 4,
            body_line_max_len: 72,
            reference_types: vec![CommitType::Fix, CommitType::Revert],
        }
    }
}

/// Repository-specific commit conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Commit types accepted in messages.
    pub types: Vec<CommitType>,
    /// Directories (possibly nested, e.g. `src/main`) that form one scope
    /// together with everything below them.
    pub top_level_scope_dirs: Vec<String>,
    /// Directory name to scope name; an empty value contributes no scope.
    pub scope_aliases: BTreeMap<String, String>,
    /// Scope that yields to another when both appear in one commit.
    pub scope_yields: BTreeMap<String, String>,
    /// Type that yields to another when both appear in one commit.
    pub type_yields: BTreeMap<CommitType, CommitType>,
    /// Directory names never offered as scopes.
    pub ignored_dirs: Vec<String>,
    /// Path prefix of CI configuration.
    pub ci_prefix: String,
    /// Path prefix of commit tooling (hook scripts and their config).
    pub tooling_prefix: String,
    /// Scope assigned to commit tooling changes.
    pub tooling_scope: String,
    /// Globs matched against file names to detect build manifests.
    pub build_manifests: Vec<String>,
    /// Branch whose recent subjects are shown as examples.
    pub main_branch: String,
    /// Number of example subjects in the suggestion; 0 disables them.
    pub include_examples: usize,
    /// Subject and body limits.
    pub policy: MessagePolicy,
    /// Required e-mail domain of the committer, if any.
    pub committer_domain: Option<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            types: CommitType::ALL.to_vec(),
            top_level_scope_dirs: vec![
                "src/main".to_string(),
                ".github".to_string(),
                ".pre-commit-scripts".to_string(),
            ],
            scope_aliases: owned(&[
                (".github", ""),
                (".pre-commit-scripts", "pre-commit"),
                ("src/main", "main"),
            ]),
            scope_yields: owned(&[("services", "main")]),
            type_yields: BTreeMap::from([(CommitType::Test, CommitType::Feat)]),
            ignored_dirs: vec![
                ".git".to_string(),
                "project".to_string(),
                "target".to_string(),
            ],
            ci_prefix: ".github".to_string(),
            tooling_prefix: ".pre-commit".to_string(),
            tooling_scope: "pre-commit".to_string(),
            build_manifests: vec!["pom.xml".to_string()],
            main_branch: "main".to_string(),
            include_examples: 3,
            policy: MessagePolicy::default(),
            committer_domain: None,
        }
    }
}

impl LintConfig {
    /// Loads the configuration from `config_dir`, falling back to defaults
    /// when no file exists at any resolution tier.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let source = ConfigSource::locate(config_dir);
        let Some(path) = source.path() else {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(?source, "Loaded config");
        Ok(config)
    }

    /// Parses and validates a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse config YAML")?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the tables for mistakes that would make inference misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            anyhow::bail!("At least one commit type must be enabled");
        }
        check_acyclic("scope_yields", &self.scope_yields)?;
        check_acyclic("type_yields", &self.type_yields)?;
        for pattern in &self.build_manifests {
            Glob::new(pattern)
                .with_context(|| format!("Invalid build manifest pattern: {pattern}"))?;
        }
        Ok(())
    }

    /// Maps a directory name to its scope name.
    pub fn alias<'a>(&'a self, dir: &'a str) -> &'a str {
        self.scope_aliases.get(dir).map_or(dir, String::as_str)
    }

    /// Applies the scope yield table once.
    pub fn yield_scope<'a>(&'a self, scope: &'a str) -> &'a str {
        self.scope_yields.get(scope).map_or(scope, String::as_str)
    }

    /// Applies the type yield table once.
    pub fn yield_type(&self, commit_type: CommitType) -> CommitType {
        self.type_yields
            .get(&commit_type)
            .copied()
            .unwrap_or(commit_type)
    }

    /// Whether `commit_type` is accepted in messages.
    pub fn is_type_enabled(&self, commit_type: CommitType) -> bool {
        self.types.contains(&commit_type)
    }

    /// The type to suggest in place of `commit_type`.
    ///
    /// Inference can produce types the project switched off (the classifier
    /// emits `ci`, `build`, `feat` and `chore`, and yields may point anywhere).
    /// Those fall back to `chore`, or to the first enabled type when `chore`
    /// is off too, so a suggestion always passes the grammar check.
    pub fn suggestable_type(&self, commit_type: CommitType) -> CommitType {
        if self.is_type_enabled(commit_type) {
            commit_type
        } else if self.is_type_enabled(CommitType::Chore) {
            CommitType::Chore
        } else {
            self.types.first().copied().unwrap_or(CommitType::Chore)
        }
    }

    /// Whether `dir` is one of the declared top-level scope directories.
    pub fn is_top_level_dir(&self, dir: &str) -> bool {
        self.top_level_scope_dirs.iter().any(|d| d == dir)
    }

    /// Whether `dir` is never offered as a scope.
    pub fn is_ignored_dir(&self, dir: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == dir)
    }
}

/// Rejects yield tables containing a cycle (including `a: a`).
fn check_acyclic<K>(table: &str, yields: &BTreeMap<K, K>) -> Result<()>
where
    K: Ord + Eq + Hash + Display,
{
    for start in yields.keys() {
        let mut seen = HashSet::new();
        let mut current = start;
        while let Some(next) = yields.get(current) {
            if !seen.insert(current) || next == start {
                anyhow::bail!("{table} contains a cycle through '{start}'");
            }
            current = next;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_repository_layout() {
        let config = LintConfig::default();
        assert_eq!(config.alias("src/main"), "main");
        assert_eq!(config.alias(".github"), "");
        assert_eq!(config.alias("services"), "services");
        assert_eq!(config.yield_scope("services"), "main");
        assert_eq!(config.yield_type(CommitType::Test), CommitType::Feat);
        assert_eq!(config.yield_type(CommitType::Fix), CommitType::Fix);
        assert!(config.is_type_enabled(CommitType::Revert));
        assert_eq!(config.policy.subject_max_len, 50);
    }

    #[test]
    fn empty_yaml_gives_defaults() -> Result<()> {
        assert_eq!(LintConfig::from_yaml("")?, LintConfig::default());
        Ok(())
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() -> Result<()> {
        let yaml = r"
types: [feat, fix, chore]
scope_yields:
  api: core
type_yields:
  docs: feat
policy:
  subject_max_len: 72
";
        let config = LintConfig::from_yaml(yaml)?;
        assert_eq!(
            config.types,
            vec![CommitType::Feat, CommitType::Fix, CommitType::Chore]
        );
        assert_eq!(config.yield_scope("api"), "core");
        assert_eq!(config.yield_scope("services"), "services");
        assert_eq!(config.yield_type(CommitType::Docs), CommitType::Feat);
        assert_eq!(config.policy.subject_max_len, 72);
        assert_eq!(config.policy.body_min_lines, 4);
        assert_eq!(config.ci_prefix, ".github");
        Ok(())
    }

    #[test]
    fn disabled_types_fall_back_for_suggestions() -> Result<()> {
        let config = LintConfig::from_yaml("types: [feat, fix, chore]")?;
        assert_eq!(config.suggestable_type(CommitType::Feat), CommitType::Feat);
        assert_eq!(config.suggestable_type(CommitType::Ci), CommitType::Chore);

        let config = LintConfig::from_yaml("types: [fix, feat]")?;
        assert_eq!(config.suggestable_type(CommitType::Build), CommitType::Fix);
        Ok(())
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(LintConfig::from_yaml("types: [feat, oops]").is_err());
    }

    #[test]
    fn cyclic_yields_are_rejected() {
        let yaml = "scope_yields:\n  a: b\n  b: a\n";
        let err = LintConfig::from_yaml(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("cycle"));

        assert!(LintConfig::from_yaml("scope_yields:\n  a: a\n").is_err());
    }

    #[test]
    fn chained_yields_are_accepted() -> Result<()> {
        let config = LintConfig::from_yaml("scope_yields:\n  a: b\n  b: c\n")?;
        // One hop only.
        assert_eq!(config.yield_scope("a"), "b");
        Ok(())
    }

    #[test]
    fn invalid_manifest_glob_is_rejected() {
        assert!(LintConfig::from_yaml("build_manifests: ['[pom']").is_err());
    }

    #[test]
    fn load_missing_dir_uses_defaults() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_dir = temp_dir.path().join("nope");
        let config = LintConfig::load(&config_dir);
        // A global config on the test machine may exist; it must still parse.
        assert!(config.is_ok());
        Ok(())
    }

    #[test]
    fn load_reads_project_file() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        fs::write(temp_dir.path().join(CONFIG_FILE), "main_branch: trunk\n")?;
        let config = LintConfig::load(temp_dir.path())?;
        assert_eq!(config.main_branch, "trunk");
        Ok(())
    }
}
