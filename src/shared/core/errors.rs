use std::fmt::Display;

use thiserror::Error;

/// Shown to callers whenever the real cause must stay server-side.
pub const UNEXPECTED_MESSAGE: &str = "Something went wrong. Check Error Log for details.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission(message.into())
    }

    /// Logs the full diagnostic and returns an error that carries none of it.
    pub fn unexpected(context: &str, cause: impl Display) -> Self {
        tracing::error!(context, error = %cause, "unexpected failure");
        Self::Unexpected(UNEXPECTED_MESSAGE.to_string())
    }

    /// Classification name callers switch on.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound(_) => "NotFoundError",
            Self::Permission(_) => "PermissionError",
            Self::Unexpected(_) => "UnexpectedError",
        }
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission(_))
    }
}
