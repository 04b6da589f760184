//! ICC error types.

use thiserror::Error;

/// Result type for ICC operations.
pub type IccResult<T> = Result<T, IccError>;

/// Errors that can occur during ICC operations.
#[derive(Debug, Error)]
pub enum IccError {
    /// Failed to load profile from file.
    #[error("failed to load profile: {0}")]
    LoadFailed(String),

    /// Invalid profile data.
    #[error("invalid profile data: {0}")]
    InvalidProfile(String),

    /// Failed to serialize a profile.
    #[error("failed to write profile: {0}")]
    WriteFailed(String),

    /// Bad search pattern while scanning for profiles.
    #[error("profile scan failed: {0}")]
    Scan(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
