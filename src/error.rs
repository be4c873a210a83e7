//! Error type for the library boundary.

use thiserror::Error;

/// Errors that can cross the library boundary.
///
/// Analysis itself never fails: parse problems become diagnostics. Only
/// operations that must produce a whole document (formatting) or that
/// take a raw language tag report through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown language {0:?}")]
    UnknownLanguage(String),
    #[error("cannot format invalid document: {0}")]
    InvalidDocument(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidDocument(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
