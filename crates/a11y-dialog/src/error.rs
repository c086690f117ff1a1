#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! The controller itself has no failure path: missing focus targets and
//! detached elements degrade to safe defaults. Errors only arise when props or
//! plugin options are validated.

use std::fmt;

/// Errors from prop and plugin-option validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The role string is neither `dialog` nor `alertdialog`.
    InvalidRole(String),
    /// The id prefix is empty or contains whitespace.
    InvalidIdPrefix(String),
    /// An explicit `id` / `title_id` override is empty or contains whitespace.
    InvalidId(String),
}

impl fmt::Display for DialogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRole(role) => {
                write!(f, "invalid dialog role '{role}' (expected 'dialog' or 'alertdialog')")
            }
            Self::InvalidIdPrefix(prefix) => write!(f, "invalid id prefix: '{prefix}'"),
            Self::InvalidId(id) => write!(f, "invalid element id: '{id}'"),
        }
    }
}

impl std::error::Error for DialogError {}

/// Whether `id` can be used as an HTML id token.
pub(crate) fn is_valid_id_token(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace)
}
