//! Error types for addressable version handling

use serde::Serialize;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for addressable operations
pub type Result<T> = std::result::Result<T, AddressableError>;

/// Failure of a single version comparison.
///
/// Kept `Clone` so a reconciliation report can hold it per bundle.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VersionError {
    /// The version string does not parse into numeric segments
    #[error("Malformed version '{version}': {reason}")]
    Format { version: String, reason: String },

    /// The two versions use a different segment layout
    #[error("Versions '{left}' and '{right}' are not comparable")]
    Incomparable { left: String, right: String },
}

impl VersionError {
    /// Create a format error
    pub fn format<S: Into<String>, R: Into<String>>(version: S, reason: R) -> Self {
        Self::Format {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create an incomparable error
    pub fn incomparable<S: Into<String>>(left: S, right: S) -> Self {
        Self::Incomparable {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Main error type for addressable version operations
#[derive(Error, Debug)]
pub enum AddressableError {
    /// IO errors when reading/writing manifests or configuration
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Version parsing or comparison errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Manifest errors
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// Serialization errors (YAML, etc.)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An operation needed a reconciliation report that does not exist yet
    #[error("Not ready: {message}")]
    NotReady { message: String },

    /// A bundle was refused because its status is not compatible
    #[error("Bundle '{bundle}' is blocked: {reason}")]
    Blocked { bundle: String, reason: String },

    /// An error shared between every waiter of one coalesced operation
    #[error(transparent)]
    Shared(Arc<AddressableError>),
}

impl AddressableError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a manifest error
    pub fn manifest<S: Into<String>>(message: S) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a blocked-bundle error
    pub fn blocked<B: Into<String>, R: Into<String>>(bundle: B, reason: R) -> Self {
        Self::Blocked {
            bundle: bundle.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-ready error
    pub fn not_ready<S: Into<String>>(message: S) -> Self {
        Self::NotReady {
            message: message.into(),
        }
    }
}
