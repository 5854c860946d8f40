//! Reduces per-file candidates to a single suggested `(type, scope)`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::LintConfig;
use crate::data::ScopeCandidate;

/// Collapses candidates through sub-tree folding and one pass of the yield tables.
///
/// Yields are applied exactly once: a chain `a -> b -> c` stops at `b`.
pub struct ScopeCollapser<'a> {
    config: &'a LintConfig,
}

impl<'a> ScopeCollapser<'a> {
    /// Creates a collapser using the yield tables of `config`.
    pub fn new(config: &'a LintConfig) -> Self {
        Self { config }
    }

    /// Returns the single pair the candidates agree on, or `chore` with no
    /// scope when they stay ambiguous.
    pub fn collapse(&self, candidates: &[ScopeCandidate]) -> ScopeCandidate {
        let mut current = candidates.to_vec();

        if distinct(&current).len() > 1 {
            current = current
                .into_iter()
                .map(|c| {
                    let top = c.scope.split('/').next().unwrap_or_default().to_string();
                    ScopeCandidate::new(c.commit_type, top)
                })
                .collect();
            debug!(?current, "Collapsed sub-scopes to their parent");
        }

        if distinct(&current).len() > 1 {
            current = current
                .into_iter()
                .map(|c| {
                    ScopeCandidate::new(
                        self.config.yield_type(c.commit_type),
                        self.config.yield_scope(&c.scope),
                    )
                })
                .collect();
            debug!(?current, "Applied yields");
        }

        let counts = distinct(&current);
        if counts.len() != 1 {
            debug!(distinct = counts.len(), "Ambiguous classification");
            return ScopeCandidate::chore();
        }

        let Some(survivor) = counts.into_keys().next() else {
            return ScopeCandidate::chore();
        };
        finish(survivor)
    }
}

/// Counts occurrences of each distinct pair.
fn distinct(candidates: &[ScopeCandidate]) -> BTreeMap<&ScopeCandidate, usize> {
    let mut counts = BTreeMap::new();
    for candidate in candidates {
        *counts.entry(candidate).or_insert(0) += 1;
    }
    counts
}

/// A surviving `top/sub` scope is narrowed to `sub`.
fn finish(survivor: &ScopeCandidate) -> ScopeCandidate {
    match survivor.scope.split_once('/') {
        Some((_, sub)) if !sub.contains('/') => {
            ScopeCandidate::new(survivor.commit_type, sub)
        }
        _ => survivor.clone(),
    }
}
