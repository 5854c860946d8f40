//! Maps one changed path to a candidate `(type, scope)`.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::LintConfig;
use crate::data::{CommitType, ScopeCandidate};

/// Path-shape classifier. Pure: no I/O, depends only on the path and the config.
pub struct FileClassifier<'a> {
    config: &'a LintConfig,
    manifests: GlobSet,
}

impl<'a> FileClassifier<'a> {
    /// Compiles the build manifest patterns of `config`.
    pub fn new(config: &'a LintConfig) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.build_manifests {
            builder.add(
                Glob::new(pattern)
                    .with_context(|| format!("Invalid build manifest pattern: {pattern}"))?,
            );
        }
        let manifests = builder
            .build()
            .context("Failed to compile build manifest patterns")?;

        Ok(Self { config, manifests })
    }

    /// Classifies `path`; the first matching rule wins.
    ///
    /// 1. CI configuration: `ci`, no scope.
    /// 2. Commit tooling: `build`, tooling scope.
    /// 3. Build manifest at the root or directly under a top directory: `build`, that directory.
    /// 4. File below a declared top-level directory: `feat`, that directory.
    /// 5. File at least two directories deep: `feat`, `top/sub`.
    /// 6. Anything else: `chore`, no scope.
    pub fn classify(&self, path: &str) -> ScopeCandidate {
        let config = self.config;

        if path.starts_with(&config.ci_prefix) {
            return ScopeCandidate::new(CommitType::Ci, "");
        }
        if path.starts_with(&config.tooling_prefix) {
            return ScopeCandidate::new(CommitType::Build, config.tooling_scope.as_str());
        }

        let segments: Vec<&str> = path.split('/').collect();
        let file_name = segments.last().copied().unwrap_or_default();

        if segments.len() <= 2 && self.manifests.is_match(file_name) {
            let top = if segments.len() == 2 { segments[0] } else { "" };
            return ScopeCandidate::new(CommitType::Build, config.alias(top));
        }

        if let Some(dir) = config
            .top_level_scope_dirs
            .iter()
            .find(|dir| is_below(path, dir))
        {
            return ScopeCandidate::new(CommitType::Feat, config.alias(dir));
        }

        if segments.len() >= 3 {
            let (top, sub) = (config.alias(segments[0]), config.alias(segments[1]));
            let scope = [top, sub]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("/");
            return ScopeCandidate::new(CommitType::Feat, scope);
        }

        ScopeCandidate::chore()
    }
}

/// Whether `path` lies strictly below directory `dir`.
fn is_below(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty())
}
