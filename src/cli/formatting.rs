//! Output formats and terminal rendering shared by the commands.

use std::fmt;
use std::io;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::message::Rejection;

/// Output format of the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Serializes `value` for the structured formats; `None` for text, which
/// each command renders itself.
pub(crate) fn render_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
            Ok(Some(format!("{json}\n")))
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .context("Failed to serialize to YAML"),
    }
}

/// Writes `[title]` in bold red followed by the rejection's description.
pub(crate) fn render_rejection<W: WriteColor>(rejection: &Rejection, out: &mut W) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "[{rejection}]")?;
    out.reset()?;
    writeln!(out)?;
    writeln!(out, "{}", rejection.description())?;
    out.flush()
}
