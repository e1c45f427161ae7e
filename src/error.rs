//! Caller-facing classification shared by every component error.

use serde::Serialize;
use std::fmt::Display;

/// What a caller can do about a failure.
///
/// Every component error (`CatalogError`, `OrderError`, `AuthzError`) maps
/// onto one of these through its `kind()` method; a transport layer would
/// pick its status code from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself is malformed; retrying it unchanged cannot succeed.
    ValidationFailed,
    NotFound,
    Unauthorized,
    /// The target exists but its current state forbids the operation.
    Conflict,
    /// The store could not answer in time. Safe to retry.
    Unavailable,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Unavailable)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}
