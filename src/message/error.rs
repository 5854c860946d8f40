//! Rejection and validation error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// What a validation error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Message file is not valid UTF-8.
    Encoding,
    /// Text does not match the conventional commit grammar.
    GrammarMismatch,
    /// Subject is empty or whitespace only.
    SubjectEmpty,
    /// Subject exceeds the configured length.
    SubjectTooLong,
    /// Subject does not start with an upper-case letter.
    SubjectLowerCase,
    /// Subject ends with a period.
    SubjectTrailingPeriod,
    /// No body at all.
    MissingBody,
    /// Fewer non-comment body lines than required.
    BodyTooShort,
    /// A non-comment body line exceeds the configured length.
    BodyLineTooLong,
    /// Scope is not one of the valid scopes.
    ScopeMismatch,
    /// A fix/revert body cites no commit.
    MissingSha,
    /// A fix/revert body cites commits that do not exist.
    InvalidSha,
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Which check failed.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub detail: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Terminal failure of the enforcement pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The message file is not UTF-8.
    #[error("Bad commit message encoding")]
    Encoding,

    /// The text does not follow `type(scope): subject`.
    #[error("Bad commit message")]
    GrammarMismatch {
        /// The rejected text.
        message: String,
    },

    /// The subject is empty or whitespace only.
    #[error("Commit message conventions not followed")]
    SubjectEmpty,

    /// One or more structural or scope checks failed.
    #[error("Commit message conventions not followed")]
    Policy(Vec<ValidationError>),

    /// A fix/revert body cites no commit.
    #[error("Commit type fix/revert: broken sha required")]
    MissingSha,

    /// A fix/revert body cites commits that do not resolve.
    #[error("Commit type fix/revert: invalid sha")]
    InvalidSha(Vec<String>),
}

impl Rejection {
    /// The errors carried by this rejection, one per failed check.
    pub fn errors(&self) -> Vec<ValidationError> {
        match self {
            Self::Encoding => vec![ValidationError::new(
                ErrorKind::Encoding,
                "Commit message is not valid UTF-8",
            )],
            Self::GrammarMismatch { .. } => vec![ValidationError::new(
                ErrorKind::GrammarMismatch,
                "Commit message does not match conventions",
            )],
            Self::SubjectEmpty => vec![ValidationError::new(
                ErrorKind::SubjectEmpty,
                "Subject line is empty or too short",
            )],
            Self::Policy(errors) => errors.clone(),
            Self::MissingSha => vec![ValidationError::new(
                ErrorKind::MissingSha,
                "No commit sha found in body",
            )],
            Self::InvalidSha(shas) => vec![ValidationError::new(
                ErrorKind::InvalidSha,
                format!("Unknown commit sha: {}", shas.join(", ")),
            )],
        }
    }

    /// Explanation shown under the title in the report.
    pub fn description(&self) -> String {
        match self {
            Self::Encoding => "Couldn't decode your commit message.\n\
                 UTF-8 encoding is assumed, please configure git to write commit messages in UTF-8."
                .to_string(),
            Self::GrammarMismatch { message } => format!(
                "Commit message does not match conventions, commit message is:\n{message}"
            ),
            Self::SubjectEmpty => "Subject line is empty or too short".to_string(),
            Self::Policy(errors) => errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::MissingSha => {
                "For commit types fix and revert the broken sha(s) must be mentioned in the commit body"
                    .to_string()
            }
            Self::InvalidSha(shas) => format!(
                "Invalid sha found in commit body.\nList of invalid sha: {}",
                shas.join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_description_lists_every_error() {
        let rejection = Rejection::Policy(vec![
            ValidationError::new(ErrorKind::SubjectTrailingPeriod, "no period"),
            ValidationError::new(ErrorKind::MissingBody, "no body"),
        ]);
        assert_eq!(rejection.description(), "no period\nno body");
        assert_eq!(rejection.errors().len(), 2);
    }

    #[test]
    fn invalid_sha_lists_tokens() {
        let rejection = Rejection::InvalidSha(vec!["abc1234".into(), "def5678".into()]);
        assert!(rejection.description().ends_with("abc1234, def5678"));
        assert_eq!(rejection.errors()[0].kind, ErrorKind::InvalidSha);
    }
}
