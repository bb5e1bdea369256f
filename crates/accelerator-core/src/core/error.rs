//! Error types for accelerator resolution.
//!
//! Every error here signals a misconfigured build or environment. None of
//! them can be repaired at runtime, so callers are expected to surface them
//! to the operator rather than retry.

use crate::core::backend::BackendKind;
use thiserror::Error;

/// Errors that can occur while resolving the active accelerator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    /// Two or more non-override backends are present at the same time.
    ///
    /// `selected` is the highest-priority backend found, `conflicting` is the
    /// lower-priority backend that should not have been registered alongside it.
    /// The message names only `conflicting`; `selected` is kept for callers.
    #[error("Cannot have {conflicting} with other devices")]
    ConfigurationConflict {
        /// Backend that won the priority walk
        selected: BackendKind,
        /// Lower-priority backend that is also present
        conflicting: BackendKind,
    },

    /// Checked resolution found no backend at all.
    #[error("Cannot access accelerator device when none is available.")]
    AcceleratorRequiredUnavailable,

    /// A backend name could not be parsed.
    #[error("Unknown accelerator backend: {name:?}")]
    UnknownBackend {
        /// The offending name, as given
        name: String,
    },
}

impl AcceleratorError {
    /// Create a ConfigurationConflict error.
    pub fn conflict(selected: BackendKind, conflicting: BackendKind) -> Self {
        Self::ConfigurationConflict {
            selected,
            conflicting,
        }
    }

    /// Create an UnknownBackend error for the given name.
    pub fn unknown_backend<S: Into<String>>(name: S) -> Self {
        Self::UnknownBackend { name: name.into() }
    }

    /// Returns the conflicting backend if this is a configuration conflict.
    pub fn conflicting_backend(&self) -> Option<BackendKind> {
        match self {
            Self::ConfigurationConflict { conflicting, .. } => Some(*conflicting),
            _ => None,
        }
    }
}

/// Result type for accelerator operations.
pub type Result<T> = std::result::Result<T, AcceleratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AcceleratorError::conflict(BackendKind::Cuda, BackendKind::Mps);
        assert_eq!(err.to_string(), "Cannot have MPS with other devices");

        let err = AcceleratorError::AcceleratorRequiredUnavailable;
        assert_eq!(
            err.to_string(),
            "Cannot access accelerator device when none is available."
        );

        let err = AcceleratorError::unknown_backend("tpu");
        assert_eq!(err.to_string(), "Unknown accelerator backend: \"tpu\"");
    }

    #[test]
    fn test_conflicting_backend() {
        let err = AcceleratorError::conflict(BackendKind::Hip, BackendKind::Xpu);
        assert_eq!(err.conflicting_backend(), Some(BackendKind::Xpu));
        assert_eq!(
            AcceleratorError::AcceleratorRequiredUnavailable.conflicting_backend(),
            None
        );
    }
}
