//! Structural policy and scope membership checks.

use crate::config::MessagePolicy;
use crate::data::CommitMessage;
use crate::message::{is_comment, ErrorKind, ValidationError};
use crate::scope::ScopeSet;

/// Checks `msg` against `policy` and the valid `scopes`.
///
/// All checks run and their failures are returned together; an empty result
/// means the message passes. An empty subject is reported on its own since
/// none of the subject checks are meaningful without one.
pub fn validate(
    msg: &CommitMessage,
    policy: &MessagePolicy,
    scopes: &ScopeSet,
) -> Vec<ValidationError> {
    let subject = msg.subject.trim();
    let Some(first) = subject.chars().next() else {
        return vec![ValidationError::new(
            ErrorKind::SubjectEmpty,
            "Subject line is empty or too short",
        )];
    };

    let mut errors = Vec::new();

    let subject_len = msg.subject.chars().count();
    if subject_len > policy.subject_max_len {
        errors.push(ValidationError::new(
            ErrorKind::SubjectTooLong,
            format!(
                "Subject line exceeds {} characters ({subject_len})",
                policy.subject_max_len
            ),
        ));
    }

    if !first.is_uppercase() {
        errors.push(ValidationError::new(
            ErrorKind::SubjectLowerCase,
            "Subject line must start with a capital letter",
        ));
    }

    if msg.subject.ends_with('.') {
        errors.push(ValidationError::new(
            ErrorKind::SubjectTrailingPeriod,
            "Subject line must not end with a period",
        ));
    }

    match &msg.body {
        None => errors.push(ValidationError::new(
            ErrorKind::MissingBody,
            "Body seems empty, commit must have body",
        )),
        Some(body) => check_body(body, policy, &mut errors),
    }

    if let Some(scope) = msg.scope.as_deref().filter(|s| !s.is_empty()) {
        if !scopes.contains(scope) {
            let valid = scopes.iter().map(String::as_str).collect::<Vec<_>>();
            errors.push(ValidationError::new(
                ErrorKind::ScopeMismatch,
                format!(
                    "Scope '{scope}' does not comply with files changed. \
                     Either give a valid scope or keep the scope empty.\n\
                     Valid commit scopes: {}",
                    valid.join(", ")
                ),
            ));
        }
    }

    errors
}

fn check_body(body: &str, policy: &MessagePolicy, errors: &mut Vec<ValidationError>) {
    let lines: Vec<(usize, &str)> = body
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_comment(line))
        .collect();

    if lines.len() < policy.body_min_lines {
        errors.push(ValidationError::new(
            ErrorKind::BodyTooShort,
            format!(
                "Body must have at least {} lines ({} found)",
                policy.body_min_lines,
                lines.len()
            ),
        ));
    }

    for (index, line) in lines {
        let len = line.chars().count();
        if len > policy.body_line_max_len {
            errors.push(ValidationError::new(
                ErrorKind::BodyLineTooLong,
                format!(
                    "Body line {} exceeds {} characters ({len})",
                    index + 1,
                    policy.body_line_max_len
                ),
            ));
        }
    }
}
