//! Error types for conversion jobs.

use cyan_core::ColorSpace;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Which profile of a job an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRole {
    /// Default profile for untagged RGB content.
    Rgb,
    /// Default profile for untagged gray content.
    Gray,
    /// Default profile for untagged CMYK content.
    Cmyk,
    /// Output intent profile.
    Output,
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileRole::Rgb => "default RGB",
            ProfileRole::Gray => "default GRAY",
            ProfileRole::Cmyk => "default CMYK",
            ProfileRole::Output => "output",
        })
    }
}

/// Errors that can occur while preparing or running a conversion.
///
/// Validation errors (everything but [`JobError::Spawn`] and
/// [`JobError::ConversionFailed`]) mean the tool was never started.
#[derive(Debug, Error)]
pub enum JobError {
    /// Input document is missing or not a PDF.
    #[error("not a PDF document: {}", .0.display())]
    NotPdf(PathBuf),

    /// A profile is missing or not an ICC profile.
    #[error("{role} profile is not an ICC profile: {}", .path.display())]
    NotIcc {
        /// Role of the profile in the job.
        role: ProfileRole,
        /// Offending path.
        path: PathBuf,
    },

    /// Ghostscript executable could not be located.
    #[error("Ghostscript not found, please install it or pass its path")]
    ToolNotFound,

    /// Ghostscript did not report a version.
    #[error("unable to read Ghostscript version from {}", .0.display())]
    ToolVersionUnavailable(PathBuf),

    /// PDF/X definition template missing for the installed version.
    #[error("PDF/X template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// PDF/X definition template is empty.
    #[error("PDF/X template is empty: {}", .0.display())]
    TemplateEmpty(PathBuf),

    /// Template has no `/ICCProfile (...) def` statement to patch.
    #[error("PDF/X template has no /ICCProfile declaration: {}", .0.display())]
    TemplateDeclarationMissing(PathBuf),

    /// Cache directory or file could not be created or written.
    #[error("cache I/O error at {}: {source}", .path.display())]
    CacheIo {
        /// Directory or file being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Template file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A profile's color space does not match its role.
    #[error("{role} profile has color space {actual}, expected {expected}")]
    ColorSpaceMismatch {
        /// Role of the profile in the job.
        role: ProfileRole,
        /// Required color space.
        expected: ColorSpace,
        /// Classified color space.
        actual: ColorSpace,
    },

    /// Ghostscript could not be started.
    #[error("failed to start Ghostscript: {0}")]
    Spawn(#[source] std::io::Error),

    /// Ghostscript ran and exited with a failure status.
    #[error("conversion failed (exit code {}):\n{output}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ConversionFailed {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured stdout followed by stderr, verbatim.
        output: String,
    },
}

impl JobError {
    /// Returns true if the tool was started and failed, as opposed to the
    /// job being refused before launch.
    pub fn is_process_failure(&self) -> bool {
        matches!(self, JobError::Spawn(_) | JobError::ConversionFailed { .. })
    }
}
