use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for kac operations
#[derive(Error, Debug)]
pub enum KacError {
    #[error("Invalid version format: '{0}' - expected [v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]")]
    InvalidVersionFormat(String),

    #[error("CHANGELOG is missing an `## [Unreleased]` section")]
    MissingUnreleasedSection,

    #[error("CHANGELOG is missing the `[Unreleased]:` link reference footer")]
    MissingFooter,

    #[error("Unrecognized change category '{name}' on line {line}")]
    UnrecognizedChangeCategory { line: usize, name: String },

    #[error("Malformed release heading on line {line}: '{heading}'")]
    MalformedReleaseHeading { line: usize, heading: String },

    #[error("Malformed `[Unreleased]:` link: '{0}' - expected <url>/<from>...<to>")]
    MalformedUnreleasedLink(String),

    #[error("CHANGELOG has no releases yet")]
    NoReleases,

    #[error("Could not find release v{0}")]
    ReleaseNotFound(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in kac
pub type Result<T> = std::result::Result<T, KacError>;

impl KacError {
    /// Create an invalid version error for the offending input
    pub fn version(input: impl Into<String>) -> Self {
        KacError::InvalidVersionFormat(input.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        KacError::Config(msg.into())
    }

    /// Whether the error describes a structurally broken CHANGELOG
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            KacError::InvalidVersionFormat(_)
                | KacError::MissingUnreleasedSection
                | KacError::MissingFooter
                | KacError::UnrecognizedChangeCategory { .. }
                | KacError::MalformedReleaseHeading { .. }
        )
    }
}
