//! Shared error classification for platform services.
//!
//! Every error type exposed by this crate maps onto one [`ErrorCode`], which
//! in turn maps onto an HTTP status. Callers branch on the category through
//! the [`Classified`] predicates instead of matching concrete variants.
//! Causes are preserved through [`std::error::Error::source`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure category shared by all platform errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller-supplied input is malformed. Never retryable.
    Validation,
    /// The request conflicts with the current state of the target.
    Conflict,
    /// An unexpected failure inside the service or a collaborator.
    Internal,
    /// The target cannot serve requests right now.
    Unavailable,
    /// A deadline expired or the request was cancelled.
    Timeout,
}

impl ErrorCode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
        }
    }

    /// Returns the HTTP status code this category maps onto.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Conflict => 409,
            Self::Internal => 500,
            Self::Unavailable => 503,
            Self::Timeout => 504,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An error that belongs to exactly one [`ErrorCode`] category.
pub trait Classified: std::error::Error {
    /// Returns the category of this error.
    fn code(&self) -> ErrorCode;

    /// Returns the HTTP status for this error.
    fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Returns whether this is a validation error.
    fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }

    /// Returns whether this is a conflict error.
    fn is_conflict(&self) -> bool {
        self.code() == ErrorCode::Conflict
    }

    /// Returns whether this is an internal error.
    fn is_internal(&self) -> bool {
        self.code() == ErrorCode::Internal
    }

    /// Returns whether this is an unavailable error.
    fn is_unavailable(&self) -> bool {
        self.code() == ErrorCode::Unavailable
    }

    /// Returns whether this is a timeout-family error.
    fn is_timeout(&self) -> bool {
        self.code() == ErrorCode::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::Validation, 400, "validation")]
    #[case(ErrorCode::Conflict, 409, "conflict")]
    #[case(ErrorCode::Internal, 500, "internal")]
    #[case(ErrorCode::Unavailable, 503, "unavailable")]
    #[case(ErrorCode::Timeout, 504, "timeout")]
    fn error_code_maps_to_http_status(
        #[case] code: ErrorCode,
        #[case] status: u16,
        #[case] text: &str,
    ) {
        assert_eq!(code.http_status(), status);
        assert_eq!(code.as_str(), text);
        assert_eq!(code.to_string(), text);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("busy")]
    struct Busy;

    impl Classified for Busy {
        fn code(&self) -> ErrorCode {
            ErrorCode::Unavailable
        }
    }

    #[test]
    fn predicates_follow_code() {
        let err = Busy;
        assert!(err.is_unavailable());
        assert!(!err.is_conflict());
        assert!(!err.is_timeout());
        assert_eq!(err.http_status(), 503);
    }
}
