//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers identifier
//! parsing, the one fallible operation that lives here.

use thiserror::Error;

/// Errors produced by `cw-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `cw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
