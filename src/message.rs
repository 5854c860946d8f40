//! Commit message grammar, structural policy and reference checks.

pub mod error;
pub mod parser;
pub mod references;
pub mod validator;

pub use error::{ErrorKind, Rejection, ValidationError};
pub use parser::MessageParser;
pub use references::{check_references, find_sha_tokens};
pub use validator::validate;

/// Whether `line` is a comment line in a commit message file.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
