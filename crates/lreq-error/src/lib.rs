//! Error types shared by every `lreq` crate.

use thiserror::Error;

/// Primary error type for logistics request operations.
///
/// The three user-facing conditions (`InvalidTemplate`, `NotAnEmptyContainer`,
/// `NoTargetEntity`) are raised before any slot is written, so a failed
/// command never leaves partial state behind.
#[derive(Error, Debug)]
pub enum RequestError {
    // === Template Errors ===
    /// The supplied combinator layout is not an importable template.
    #[error("invalid template: {reason}")]
    InvalidTemplate { reason: String },

    /// Export was requested into something other than a blank blueprint.
    #[error("cannot export into {found}: an empty blueprint is required")]
    NotAnEmptyContainer { found: String },

    // === Entity Errors ===
    /// No entity with request slots could be resolved for the command.
    #[error("no entity with logistic request slots selected")]
    NoTargetEntity,

    /// Slot index is outside the range the entity supports.
    #[error("slot {index} out of range (max {max})")]
    SlotOutOfRange { index: u32, max: u32 },

    // === I/O Errors ===
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("malformed JSON: {detail}")]
    Json { detail: String },

    // === Internal Errors ===
    /// Internal logic error (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Numeric result codes, used as process exit codes by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Successful result.
    Ok = 0,
    /// Internal logic error.
    Internal = 2,
    /// Template failed validation.
    InvalidTemplate = 3,
    /// Wrong or non-empty export target.
    NotEmpty = 4,
    /// No target entity.
    NoTarget = 5,
    /// Slot index out of range.
    Range = 6,
    /// I/O failure.
    IoErr = 10,
    /// Input could not be parsed.
    Format = 11,
}

impl RequestError {
    /// Map this error to its numeric code.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidTemplate { .. } => ErrorCode::InvalidTemplate,
            Self::NotAnEmptyContainer { .. } => ErrorCode::NotEmpty,
            Self::NoTargetEntity => ErrorCode::NoTarget,
            Self::SlotOutOfRange { .. } => ErrorCode::Range,
            Self::Io(_) => ErrorCode::IoErr,
            Self::Json { .. } => ErrorCode::Format,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether the player can fix this by retrying with different input.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTemplate { .. } | Self::NotAnEmptyContainer { .. } | Self::NoTargetEntity
        )
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTemplate { .. } => {
                Some("Hold a blueprint made only of constant combinators exported by this tool")
            }
            Self::NotAnEmptyContainer { .. } => Some("Hold an empty blueprint and export again"),
            Self::NoTargetEntity => Some("Open the character or vehicle whose requests to edit"),
            _ => None,
        }
    }

    /// Get the process exit code for this error (for CLI use).
    pub const fn exit_code(&self) -> i32 {
        self.error_code() as i32
    }

    /// Create an invalid-template error.
    pub fn invalid_template(reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            reason: reason.into(),
        }
    }

    /// Create a not-an-empty-container error.
    pub fn not_empty(found: impl Into<String>) -> Self {
        Self::NotAnEmptyContainer {
            found: found.into(),
        }
    }

    /// Create a JSON error.
    pub fn json(detail: impl Into<String>) -> Self {
        Self::Json {
            detail: detail.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `RequestError`.
pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RequestError::invalid_template("device 3 is not a combinator");
        assert_eq!(
            err.to_string(),
            "invalid template: device 3 is not a combinator"
        );
        assert_eq!(
            RequestError::NoTargetEntity.to_string(),
            "no entity with logistic request slots selected"
        );
    }

    #[test]
    fn test_error_display_not_empty() {
        let err = RequestError::not_empty("iron-plate");
        assert_eq!(
            err.to_string(),
            "cannot export into iron-plate: an empty blueprint is required"
        );
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            RequestError::invalid_template("x").error_code(),
            ErrorCode::InvalidTemplate
        );
        assert_eq!(RequestError::not_empty("x").error_code(), ErrorCode::NotEmpty);
        assert_eq!(RequestError::NoTargetEntity.error_code(), ErrorCode::NoTarget);
        assert_eq!(
            RequestError::SlotOutOfRange { index: 9, max: 1 }.error_code(),
            ErrorCode::Range
        );
        assert_eq!(RequestError::json("eof").error_code(), ErrorCode::Format);
    }

    #[test]
    fn test_user_recoverable() {
        assert!(RequestError::invalid_template("x").is_user_recoverable());
        assert!(RequestError::not_empty("x").is_user_recoverable());
        assert!(RequestError::NoTargetEntity.is_user_recoverable());
        assert!(!RequestError::internal("bug").is_user_recoverable());
        assert!(!RequestError::SlotOutOfRange { index: 1, max: 0 }.is_user_recoverable());
    }

    #[test]
    fn test_suggestions() {
        assert!(RequestError::NoTargetEntity.suggestion().is_some());
        assert!(RequestError::not_empty("x").suggestion().is_some());
        assert!(RequestError::internal("x").suggestion().is_none());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RequestError = io_err.into();
        assert!(matches!(err, RequestError::Io(_)));
        assert_eq!(err.error_code(), ErrorCode::IoErr);
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(ErrorCode::Ok as i32, 0);
        assert_eq!(RequestError::internal("x").exit_code(), 2);
        assert_eq!(RequestError::invalid_template("x").exit_code(), 3);
        assert_eq!(RequestError::NoTargetEntity.exit_code(), 5);
    }
}
