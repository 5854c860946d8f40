//! Check-domain command: the committer email must belong to the company domain.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use clap::Parser;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::debug;

use crate::cli::open_workspace;
use crate::git::RepoQuery;

/// Check-domain command options.
#[derive(Parser)]
pub struct CheckDomainCommand {
    /// Expected email domain (defaults to `committer_domain` from the config).
    #[arg(long)]
    pub domain: Option<String>,
}

impl CheckDomainCommand {
    /// Executes the check. Exits with status 1 when the email does not match.
    pub fn execute(self, config_dir: Option<&Path>) -> Result<()> {
        let (repo, config) = open_workspace(config_dir)?;
        let domain = expected_domain(self.domain, config.committer_domain)?;

        let email = repo.user_email()?;
        if email_in_domain(email.as_deref(), &domain) {
            debug!(domain = %domain, "Committer email accepted");
            return Ok(());
        }

        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "[Wrong committer email]")?;
        stdout.reset()?;
        writeln!(stdout)?;
        writeln!(
            stdout,
            "Configured email '{}' is not a @{domain} address.\n\
             Run: git config user.email <name>@{domain}",
            email.unwrap_or_default()
        )?;
        std::process::exit(1);
    }
}

/// The `--domain` flag, else the configured domain. Blank values count as unset.
fn expected_domain(flag: Option<String>, configured: Option<String>) -> Result<String> {
    let Some(domain) = flag
        .into_iter()
        .chain(configured)
        .map(|d| d.trim().to_string())
        .find(|d| !d.trim_start_matches('@').is_empty())
    else {
        bail!("No domain given: pass --domain or set committer_domain in the config");
    };
    Ok(domain)
}

/// Whether `email` has exactly `@domain` as its domain part.
fn email_in_domain(email: Option<&str>, domain: &str) -> bool {
    let domain = domain.trim_start_matches('@');
    email
        .and_then(|email| email.trim().rsplit_once('@'))
        .is_some_and(|(user, host)| !user.is_empty() && host.eq_ignore_ascii_case(domain))
}
