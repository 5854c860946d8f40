//! Commit message enforcement: decode, parse, validate, check references.
//!
//! Each stage returns a typed result; the first failing stage ends the run,
//! except that structural and scope checks are collected into one rejection.

use tracing::debug;

use crate::config::LintConfig;
use crate::data::CommitMessage;
use crate::git::RepoQuery;
use crate::message::{check_references, validate, ErrorKind, MessageParser, Rejection};
use crate::scope::ScopeRegistry;

/// Switches of the `check` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct LintOptions {
    /// Requires a scope in the header.
    pub force_scope: bool,
    /// Disables the merge and autosquash exemptions.
    pub strict: bool,
}

/// Why a message was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// Passed every check.
    Accepted(CommitMessage),
    /// Skipped in lenient mode: merge or autosquash message.
    Exempt(String),
}

const AUTOSQUASH_PREFIXES: [&str; 3] = ["fixup! ", "squash! ", "amend! "];
const MERGE_PREFIX: &str = "Merge ";

/// Lints raw message file bytes.
pub fn lint_bytes(
    raw: &[u8],
    config: &LintConfig,
    repo: &dyn RepoQuery,
    options: LintOptions,
) -> Result<LintOutcome, Rejection> {
    let text = std::str::from_utf8(raw).map_err(|_| Rejection::Encoding)?;
    lint_message(text, config, repo, options)
}

/// Lints message text.
pub fn lint_message(
    text: &str,
    config: &LintConfig,
    repo: &dyn RepoQuery,
    options: LintOptions,
) -> Result<LintOutcome, Rejection> {
    if !options.strict {
        if let Some(first_line) = exempt_first_line(text) {
            debug!(first_line, "Message exempt from checks");
            return Ok(LintOutcome::Exempt(first_line.to_string()));
        }
    }

    let msg = MessageParser::new(config)
        .require_scope(options.force_scope)
        .parse(text)?;

    let scopes = ScopeRegistry::new(repo, config).valid_scopes();
    let errors = validate(&msg, &config.policy, &scopes);
    if errors.iter().any(|e| e.kind == ErrorKind::SubjectEmpty) {
        return Err(Rejection::SubjectEmpty);
    }
    if !errors.is_empty() {
        return Err(Rejection::Policy(errors));
    }

    if config.policy.reference_types.contains(&msg.commit_type) {
        check_references(&msg, repo)?;
    }

    Ok(LintOutcome::Accepted(msg))
}

/// First line of a merge or autosquash message.
fn exempt_first_line(text: &str) -> Option<&str> {
    let first_line = text.lines().next()?;
    let exempt = first_line.starts_with(MERGE_PREFIX)
        || AUTOSQUASH_PREFIXES
            .iter()
            .any(|prefix| first_line.starts_with(prefix));
    exempt.then_some(first_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CommitType;
    use crate::git::test_utils::FakeRepo;

    const BODY: &str = "Explain the change.\nIn some detail.\nOver several lines.\nLike this.";

    fn repo() -> FakeRepo {
        FakeRepo::new()
            .with_dir("services")
            .with_dir("services/billing")
            .with_commit("abc1234")
    }

    fn lint(text: &str, options: LintOptions) -> Result<LintOutcome, Rejection> {
        lint_message(text, &LintConfig::default(), &repo(), options)
    }

    #[test]
    fn accepts_valid_message() {
        let outcome = lint(&format!("feat(billing): Add invoices\n\n{BODY}"), LintOptions::default());
        let Ok(LintOutcome::Accepted(msg)) = &outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(msg.commit_type, CommitType::Feat);
        assert_eq!(msg.scope.as_deref(), Some("billing"));
    }

    #[test]
    fn grammar_mismatch_short_circuits() {
        assert!(matches!(
            lint("oops: broken", LintOptions::default()),
            Err(Rejection::GrammarMismatch { .. })
        ));
    }

    #[test]
    fn missing_body_is_a_policy_violation() {
        let Err(Rejection::Policy(errors)) = lint("feat: Add x", LintOptions::default()) else {
            panic!("expected a policy rejection");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::MissingBody);
    }

    #[test]
    fn lower_case_subject_and_missing_body_are_aggregated() {
        let Err(Rejection::Policy(errors)) = lint("feat: add x", LintOptions::default()) else {
            panic!("expected a policy rejection");
        };
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::SubjectLowerCase, ErrorKind::MissingBody]);
    }

    #[test]
    fn empty_subject_is_its_own_rejection() {
        assert_eq!(lint("feat:  ", LintOptions::default()), Err(Rejection::SubjectEmpty));
    }

    #[test]
    fn unknown_scope_is_reported_with_structural_errors() {
        let Err(Rejection::Policy(errors)) = lint("feat(nope): Add x.", LintOptions::default())
        else {
            panic!("expected a policy rejection");
        };
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::SubjectTrailingPeriod,
                ErrorKind::MissingBody,
                ErrorKind::ScopeMismatch
            ]
        );
    }

    #[test]
    fn fix_requires_resolving_sha() {
        let ok = format!("fix(billing): Resolve crash\n\nCaused by abc1234.\n{BODY}");
        assert!(matches!(
            lint(&ok, LintOptions::default()),
            Ok(LintOutcome::Accepted(_))
        ));

        let missing = format!("fix: Resolve crash\n\n{BODY}");
        assert_eq!(lint(&missing, LintOptions::default()), Err(Rejection::MissingSha));

        let unknown = format!("revert: Undo crash fix\n\nReverts fedcba9.\n{BODY}");
        assert_eq!(
            lint(&unknown, LintOptions::default()),
            Err(Rejection::InvalidSha(vec!["fedcba9".to_string()]))
        );
    }

    #[test]
    fn sha_check_runs_only_after_policy_passes() {
        assert!(matches!(
            lint("fix: resolve crash", LintOptions::default()),
            Err(Rejection::Policy(_))
        ));
    }

    #[test]
    fn other_types_need_no_sha() {
        let text = format!("perf: Speed up parsing\n\n{BODY}");
        assert!(lint(&text, LintOptions::default()).is_ok());
    }

    #[test]
    fn lenient_mode_exempts_merge_and_autosquash() {
        for text in ["Merge branch 'main' into topic", "fixup! feat: Add x", "squash! x"] {
            assert_eq!(
                lint(text, LintOptions::default()),
                Ok(LintOutcome::Exempt(text.to_string()))
            );
        }
    }

    #[test]
    fn strict_mode_checks_everything() {
        let strict = LintOptions {
            strict: true,
            ..LintOptions::default()
        };
        assert!(matches!(
            lint("fixup! feat: Add x", strict),
            Err(Rejection::GrammarMismatch { .. })
        ));
    }

    #[test]
    fn force_scope() {
        let forced = LintOptions {
            force_scope: true,
            ..LintOptions::default()
        };
        let text = format!("feat: Add x\n\n{BODY}");
        assert!(matches!(
            lint(&text, forced),
            Err(Rejection::GrammarMismatch { .. })
        ));
        assert!(lint(&text, LintOptions::default()).is_ok());
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let result = lint_bytes(
            &[b'f', b'e', b'a', b't', 0xff],
            &LintConfig::default(),
            &repo(),
            LintOptions::default(),
        );
        assert_eq!(result, Err(Rejection::Encoding));
    }
}
