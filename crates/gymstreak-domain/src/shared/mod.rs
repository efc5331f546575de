use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod clock;

pub use clock::{Clock, FixedClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(ScheduleId);
define_id!(CheckInId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (1xxx)
    UserNotFound = 1001,
    ScheduleNotFound = 1002,

    // Business Logic (2xxx)
    DuplicateCheckIn = 2001,
    InvalidRotationToken = 2002,
    MalformedDateOrdering = 2003,

    // Data & Persistence (3xxx)
    RepositoryError = 3001,
    DataIntegrityError = 3002,
    SerializationError = 3003,

    // Infrastructure (4xxx)
    InfrastructureError = 4001,

    // Validation (5xxx)
    ValidationError = 5001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::UserNotFound
            | ErrorCode::ScheduleNotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidRotationToken => ErrorSeverity::Info,

            ErrorCode::DuplicateCheckIn => ErrorSeverity::Warning,

            ErrorCode::MalformedDateOrdering
            | ErrorCode::DataIntegrityError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            _ => ErrorSeverity::Warning,
        }
    }

    /// Whether the caller should surface this as a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ErrorCode::UserNotFound | ErrorCode::ScheduleNotFound)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Invalid rotation token: {0}")]
    InvalidRotationToken(String),

    #[error("Malformed date ordering: {0}")]
    MalformedDateOrdering(String),

    #[error("Duplicate check-in: {0}")]
    DuplicateCheckIn(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::ScheduleNotFound(_) => ErrorCode::ScheduleNotFound,
            DomainError::InvalidRotationToken(_) => ErrorCode::InvalidRotationToken,
            DomainError::MalformedDateOrdering(_) => ErrorCode::MalformedDateOrdering,
            DomainError::DuplicateCheckIn(_) => ErrorCode::DuplicateCheckIn,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::UserNotFound(msg)
            | DomainError::ScheduleNotFound(msg)
            | DomainError::InvalidRotationToken(msg)
            | DomainError::MalformedDateOrdering(msg)
            | DomainError::DuplicateCheckIn(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Serialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
