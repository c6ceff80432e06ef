//! Error types for fsmgen Core
//!
//! Provides error handling for:
//! - Spec validation (fail fast, nothing touched on disk)
//! - Aggregator scan/merge failures (entity files already written stay)
//! - Filesystem failures (the whole call is safe to retry)
//! - Config and spec document loading

use crate::document::SpecFormat;
use fsmgen_artifact::SpecError;
use fsmgen_merge::MergeError;
use std::path::PathBuf;

/// Coarse classification of a [`GenerationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Output path blank
    EmptyPath,
    /// State machine name blank
    EmptyName,
    /// No usable state name
    EmptyStateList,
    /// Default index does not name a state
    InvalidDefault,
    /// Aggregator and a state would share one file
    NameCollision,
    /// Construction method present but not delimitable
    StructuralScanFailure,
    /// Construction method absent and no class end to insert it at
    ClassBoundaryNotFound,
    /// Planned edits could not be applied
    MergeConflict,
    /// Directory or file operation failed
    IoFailure,
}

/// Main generation error type
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Spec rejected before any filesystem access
    #[error("invalid specification: {0}")]
    Invalid(#[from] SpecError),

    /// Aggregator could not be merged; the file was left unmodified
    #[error("cannot update {path}: {source}")]
    Merge {
        /// Aggregator file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: MergeError,
    },

    /// Filesystem failure
    #[error("io error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create merge error for path
    pub fn merge_error(path: impl Into<PathBuf>, source: MergeError) -> Self {
        Self::Merge {
            path: path.into(),
            source,
        }
    }

    /// Classify the error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(SpecError::EmptyPath) => ErrorKind::EmptyPath,
            Self::Invalid(SpecError::EmptyName) => ErrorKind::EmptyName,
            Self::Invalid(SpecError::EmptyStateList) => ErrorKind::EmptyStateList,
            Self::Invalid(SpecError::NameCollidesWithState(_)) => ErrorKind::NameCollision,
            Self::Invalid(SpecError::DefaultIndexOutOfRange { .. }) => ErrorKind::InvalidDefault,
            Self::Merge { source, .. } => match source {
                MergeError::StructuralScanFailure { .. } => ErrorKind::StructuralScanFailure,
                MergeError::ClassBoundaryNotFound { .. } => ErrorKind::ClassBoundaryNotFound,
                MergeError::Delta(_) => ErrorKind::MergeConflict,
            },
            Self::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// Whether the failure happened before anything was written
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Errors loading or validating [`GeneratorConfig`](crate::GeneratorConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("cannot render config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Semantically invalid value
    #[error("invalid config: {0}")]
    Invalid(String),

    /// IO error during read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading a [`SpecDocument`](crate::SpecDocument)
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// No format registered for file extension
    #[error("no spec format for extension: '{0}'")]
    UnsupportedExtension(String),

    /// Text does not deserialize
    #[error("invalid {format} spec: {message}")]
    Format {
        /// Format attempted
        format: SpecFormat,
        /// Deserializer message
        message: String,
    },

    /// IO error during read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Spec file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for generation
pub type GenerationResult<T> = Result<T, GenerationError>;
