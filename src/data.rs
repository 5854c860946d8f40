//! Data structures shared by the suggestion and enforcement pipelines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conventional commit type.
///
/// The set is closed; configuration can only narrow which members are accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// Build system or dependency changes.
    Build,
    /// Continuous integration configuration.
    Ci,
    /// Documentation only.
    Docs,
    /// A new feature.
    Feat,
    /// A bug fix.
    Fix,
    /// A performance improvement.
    Perf,
    /// Code change that neither fixes a bug nor adds a feature.
    Refactor,
    /// Formatting and whitespace.
    Style,
    /// Adding or correcting tests.
    Test,
    /// Anything else.
    Chore,
    /// Reverts a previous commit.
    Revert,
}

impl CommitType {
    /// Every commit type, in the order they are listed to users.
    pub const ALL: [Self; 11] = [
        Self::Build,
        Self::Ci,
        Self::Docs,
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Refactor,
        Self::Style,
        Self::Test,
        Self::Chore,
        Self::Revert,
    ];

    /// Returns the tag as written in a commit subject.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Docs => "docs",
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Style => "style",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Revert => "revert",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = ();

    /// Case-sensitive: `Feat` is not a commit type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Staged status of a file that takes part in scope inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Newly added file (`A`).
    Added,
    /// Modified file (`M`).
    Modified,
}

/// A staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    /// Staged status.
    pub status: ChangeStatus,
}

impl ChangeRecord {
    /// Creates a change record.
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// A `(type, scope)` pair, either derived from one file or the collapsed result.
///
/// The scope may be empty, a single identifier, or `top/sub`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeCandidate {
    /// Commit type.
    pub commit_type: CommitType,
    /// Scope, possibly empty.
    pub scope: String,
}

impl ScopeCandidate {
    /// Creates a candidate.
    pub fn new(commit_type: CommitType, scope: impl Into<String>) -> Self {
        Self {
            commit_type,
            scope: scope.into(),
        }
    }

    /// The fallback label used when nothing better can be inferred.
    pub fn chore() -> Self {
        Self::new(CommitType::Chore, "")
    }

    /// Formats the label as `type` or `type(scope)`.
    pub fn label(&self) -> String {
        if self.scope.is_empty() {
            self.commit_type.to_string()
        } else {
            format!("{}({})", self.commit_type, self.scope)
        }
    }
}

impl fmt::Display for ScopeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A parsed commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// Commit type.
    pub commit_type: CommitType,
    /// Scope between parentheses, never empty when present.
    pub scope: Option<String>,
    /// Whether the `!` breaking-change marker preceded the colon.
    pub breaking: bool,
    /// Subject with leading whitespace removed.
    pub subject: String,
    /// Body block, including comment lines; the blank separator after the
    /// subject is not part of it.
    pub body: Option<String>,
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({scope})")?;
        }
        if self.breaking {
            f.write_str("!")?;
        }
        write!(f, ": {}", self.subject)?;
        if let Some(body) = &self.body {
            write!(f, "\n\n{body}")?;
        }
        Ok(())
    }
}
