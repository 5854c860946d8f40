//! Recursive-descent parser for conventional commit messages.
//!
//! ```text
//! message   := type scope? delim subject body?
//! type      := one of the enabled commit types (case-sensitive)
//! scope     := "(" scope-char+ ")"       ; letters, digits, '_', ' ', '/', ':', '-'
//! delim     := "!"? ":"
//! subject   := rest of the first line, at least one character
//! body      := (NL NL? non-empty-line)+
//! ```
//!
//! The match is anchored at the start of the text only; whatever follows the
//! body (for example after two consecutive blank lines) is ignored.

use crate::config::LintConfig;
use crate::data::{CommitMessage, CommitType};
use crate::message::Rejection;

/// Parses raw commit message text into a [`CommitMessage`].
pub struct MessageParser<'a> {
    config: &'a LintConfig,
    require_scope: bool,
}

impl<'a> MessageParser<'a> {
    /// Creates a parser accepting the commit types enabled in `config`.
    pub fn new(config: &'a LintConfig) -> Self {
        Self {
            config,
            require_scope: false,
        }
    }

    /// Makes the scope group mandatory.
    pub fn require_scope(mut self, require: bool) -> Self {
        self.require_scope = require;
        self
    }

    /// Parses `text`, failing with [`Rejection::GrammarMismatch`].
    pub fn parse(&self, text: &str) -> Result<CommitMessage, Rejection> {
        let mut lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));
        let first = lines.next().unwrap_or_default();

        let header = self
            .header(first)
            .ok_or_else(|| Rejection::GrammarMismatch {
                message: text.to_string(),
            })?;
        let rest: Vec<&str> = lines.collect();

        Ok(CommitMessage {
            commit_type: header.commit_type,
            scope: header.scope.map(str::to_string),
            breaking: header.breaking,
            subject: header.subject.to_string(),
            body: body(&rest),
        })
    }

    fn header<'t>(&self, line: &'t str) -> Option<Header<'t>> {
        let mut cursor = Cursor { rest: line };

        let commit_type = cursor.commit_type(self.config)?;
        let scope = cursor.scope()?;
        if self.require_scope && scope.is_none() {
            return None;
        }
        let breaking = cursor.eat('!');
        if !cursor.eat(':') || cursor.rest.is_empty() {
            return None;
        }

        Some(Header {
            commit_type,
            scope,
            breaking,
            subject: cursor.rest.trim_start(),
        })
    }
}

struct Header<'t> {
    commit_type: CommitType,
    scope: Option<&'t str>,
    breaking: bool,
    subject: &'t str,
}

struct Cursor<'t> {
    rest: &'t str,
}

impl<'t> Cursor<'t> {
    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn commit_type(&mut self, config: &LintConfig) -> Option<CommitType> {
        let end = self.rest.find(['(', '!', ':']).unwrap_or(self.rest.len());
        let commit_type = self.rest[..end]
            .parse::<CommitType>()
            .ok()
            .filter(|t| config.is_type_enabled(*t))?;
        self.rest = &self.rest[end..];
        Some(commit_type)
    }

    /// `Some(None)` when there is no scope group, `None` when it is malformed.
    fn scope(&mut self) -> Option<Option<&'t str>> {
        let Some(after_open) = self.rest.strip_prefix('(') else {
            return Some(None);
        };
        let close = after_open.find(')')?;
        let scope = &after_open[..close];
        if scope.is_empty() || !scope.chars().all(is_scope_char) {
            return None;
        }
        self.rest = &after_open[close + 1..];
        Some(Some(scope))
    }
}

fn is_scope_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ' ' | '/' | ':' | '-')
}

/// Collects body lines: each non-empty line may be preceded by one blank line.
fn body(lines: &[&str]) -> Option<String> {
    let mut body: Vec<&str> = Vec::new();
    let mut i = 0;

    loop {
        match (lines.get(i).copied(), lines.get(i + 1).copied()) {
            (Some(line), _) if !line.is_empty() => {
                body.push(line);
                i += 1;
            }
            (Some(""), Some(line)) if !line.is_empty() => {
                if !body.is_empty() {
                    body.push("");
                }
                body.push(line);
                i += 2;
            }
            _ => break,
        }
    }

    (!body.is_empty()).then(|| body.join("\n"))
}
