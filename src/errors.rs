//! Unified error types and result handling.
//!
//! Domain failures are grouped per area (assets, employees, departments, locations,
//! statuses, transfers, authentication) so the HTTP boundary can match on them
//! exhaustively. Every error classifies itself into an [`ErrorKind`], which is the
//! only thing the boundary needs to pick a response status.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Coarse classification of an error, used for response-status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist
    NotFound,
    /// The request conflicts with the current state of the data
    Conflict,
    /// Missing, invalid or expired credential
    Unauthorized,
    /// Malformed or semantically invalid input
    InvalidInput,
    /// Unexpected failure (store connectivity, configuration, I/O)
    Internal,
}

/// Failures raised by asset operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    /// The asset does not exist
    #[error("asset {id} not found")]
    NotFound {
        /// Requested asset id
        id: i64,
    },
    /// The referenced status is not part of the vocabulary
    #[error("status {id} not found")]
    StatusNotFound {
        /// Referenced status id
        id: i64,
    },
    /// The referenced location does not exist
    #[error("location {id} not found")]
    LocationNotFound {
        /// Referenced location id
        id: i64,
    },
    /// The referenced owning department does not exist
    #[error("department {id} not found")]
    DepartmentNotFound {
        /// Referenced department id
        id: i64,
    },
}

/// Failures raised by employee operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmployeeError {
    /// The employee does not exist
    #[error("employee {id} not found")]
    NotFound {
        /// Requested employee id
        id: i64,
    },
    /// The referenced department does not exist
    #[error("department {id} not found")]
    DepartmentNotFound {
        /// Referenced department id
        id: i64,
    },
    /// Another employee already uses this email
    #[error("email already exists: {email}")]
    EmailAlreadyExists {
        /// The conflicting email
        email: String,
    },
    /// The employee heads a department and cannot be removed
    #[error("cannot delete employee {id} who is a department head")]
    IsDepartmentHead {
        /// Employee id
        id: i64,
    },
    /// The employee appears in the transfer ledger and cannot be removed
    #[error("cannot delete employee {id} who has recorded transfers")]
    HasTransfers {
        /// Employee id
        id: i64,
    },
}

/// Failures raised by department operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepartmentError {
    /// The department does not exist
    #[error("department {id} not found")]
    NotFound {
        /// Requested department id
        id: i64,
    },
    /// The proposed head employee does not exist
    #[error("employee {employee_id} not found")]
    EmployeeNotFound {
        /// Proposed head id
        employee_id: i64,
    },
    /// Employees are still assigned to the department
    #[error("cannot delete department {id} with employees")]
    HasEmployees {
        /// Department id
        id: i64,
    },
}

/// Failures raised by location operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The location does not exist
    #[error("location {id} not found")]
    NotFound {
        /// Requested location id
        id: i64,
    },
    /// Assets currently reside at the location
    #[error("cannot delete location {id} with assigned assets")]
    HasAssets {
        /// Location id
        id: i64,
    },
    /// Transfer records reference the location
    #[error("cannot delete location {id} with transfer history")]
    HasTransfers {
        /// Location id
        id: i64,
    },
}

/// Failures raised by status lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    /// The status is not part of the vocabulary
    #[error("status {id} not found")]
    NotFound {
        /// Requested status id
        id: i64,
    },
    /// No status carries this name
    #[error("status '{name}' not found")]
    UnknownName {
        /// Requested name
        name: String,
    },
}

/// Failures raised by the transfer workflow and ledger queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    /// The transfer record does not exist
    #[error("transfer {id} not found")]
    NotFound {
        /// Requested transfer id
        id: i64,
    },
    /// The asset to move does not exist
    #[error("asset {asset_id} not found")]
    AssetNotFound {
        /// Referenced asset id
        asset_id: i64,
    },
    /// The employee performing the move does not exist
    #[error("employee {employee_id} not found")]
    EmployeeNotFound {
        /// Referenced employee id
        employee_id: i64,
    },
    /// The declared source is not where the asset currently is
    #[error(
        "source location {declared} does not match asset's current location {current}"
    )]
    SourceLocationMismatch {
        /// Source declared by the caller
        declared: i64,
        /// Location recorded on the asset
        current: i64,
    },
    /// The destination (or a filter) location does not exist
    #[error("location {location_id} not found")]
    LocationNotFound {
        /// Referenced location id
        location_id: i64,
    },
    /// Source and destination are the same location
    #[error("source and destination locations are the same")]
    SameLocations {
        /// The repeated location id
        location_id: i64,
    },
    /// The transfer timestamp lies in the future
    #[error("transfer date cannot be in the future")]
    InvalidTransferDate,
    /// A date window whose start is after its end
    #[error("start date cannot be after end date")]
    InvalidDateRange,
}

/// Failures raised while authenticating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No bearer credential was supplied
    #[error("authorization header required")]
    MissingCredential,
    /// The credential is malformed, mis-signed or names an unknown employee
    #[error("invalid token")]
    InvalidToken,
    /// The credential's validity window has passed
    #[error("token expired")]
    TokenExpired,
    /// Password hashing failed
    #[error("failed to hash credential: {message}")]
    Hashing {
        /// Underlying failure
        message: String,
    },
    /// Token signing failed
    #[error("failed to sign token: {message}")]
    Signing {
        /// Underlying failure
        message: String,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The request is malformed or fails basic validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What is wrong with the input
        message: String,
    },

    /// Asset rule failure
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Employee rule failure
    #[error(transparent)]
    Employee(#[from] EmployeeError),

    /// Department rule failure
    #[error(transparent)]
    Department(#[from] DepartmentError),

    /// Location rule failure
    #[error(transparent)]
    Location(#[from] LocationError),

    /// Status lookup failure
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Transfer workflow failure
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store failure not anticipated by the rule layer
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// I/O failure (listener, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`] with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Classifies the error for the boundary layer.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } | Self::Io(_) => ErrorKind::Internal,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Asset(_) | Self::Status(_) => ErrorKind::NotFound,
            Self::Employee(e) => match e {
                EmployeeError::NotFound { .. } | EmployeeError::DepartmentNotFound { .. } => {
                    ErrorKind::NotFound
                }
                EmployeeError::EmailAlreadyExists { .. }
                | EmployeeError::IsDepartmentHead { .. }
                | EmployeeError::HasTransfers { .. } => ErrorKind::Conflict,
            },
            Self::Department(e) => match e {
                DepartmentError::NotFound { .. } | DepartmentError::EmployeeNotFound { .. } => {
                    ErrorKind::NotFound
                }
                DepartmentError::HasEmployees { .. } => ErrorKind::Conflict,
            },
            Self::Location(e) => match e {
                LocationError::NotFound { .. } => ErrorKind::NotFound,
                LocationError::HasAssets { .. } | LocationError::HasTransfers { .. } => {
                    ErrorKind::Conflict
                }
            },
            Self::Transfer(e) => match e {
                TransferError::NotFound { .. }
                | TransferError::AssetNotFound { .. }
                | TransferError::EmployeeNotFound { .. }
                | TransferError::LocationNotFound { .. } => ErrorKind::NotFound,
                TransferError::SourceLocationMismatch { .. }
                | TransferError::SameLocations { .. }
                | TransferError::InvalidTransferDate => ErrorKind::Conflict,
                TransferError::InvalidDateRange => ErrorKind::InvalidInput,
            },
            Self::Auth(e) => match e {
                AuthError::Hashing { .. } | AuthError::Signing { .. } => ErrorKind::Internal,
                AuthError::InvalidCredentials
                | AuthError::MissingCredential
                | AuthError::InvalidToken
                | AuthError::TokenExpired => ErrorKind::Unauthorized,
            },
            Self::Database(e) => match e.sql_err() {
                // Store-level backstop for races the rule layer cannot see
                Some(
                    SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_),
                ) => ErrorKind::Conflict,
                _ => ErrorKind::Internal,
            },
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
