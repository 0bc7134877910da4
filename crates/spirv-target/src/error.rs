//! Error types for target description and configuration handling.
//!
//! Only the boundary-facing steps report errors. Resolution itself has no
//! recoverable failures.

use std::path::PathBuf;

/// Errors that can occur while reading target descriptions.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The triple string could not be split into components.
    #[error("invalid target triple '{triple}': {detail}")]
    InvalidTriple {
        /// The offending triple string.
        triple: String,
        /// Description of the problem.
        detail: String,
    },

    /// The triple is well formed but does not name a SPIR-V architecture.
    #[error("target triple '{triple}' is not a SPIR-V target")]
    NotSpirv {
        /// The rejected triple.
        triple: String,
    },

    /// An extension name that is not part of the known set.
    #[error("unknown SPIR-V extension '{name}'")]
    UnknownExtension {
        /// The rejected token.
        name: String,
    },

    /// A version string that is not `major.minor`.
    #[error("invalid version '{value}': expected <major>.<minor>")]
    InvalidVersion {
        /// The rejected string.
        value: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading target files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file not found.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
