//! Error types for patch operations
//!
//! None of these ever propagate out of [`PatchController::wrap`] or
//! [`PatchController::unwrap`]: those log the `Display` text to the
//! configured sink and return. The `try_*` variants hand them to the caller
//! instead.
//!
//! [`PatchController::wrap`]: crate::PatchController::wrap
//! [`PatchController::unwrap`]: crate::PatchController::unwrap

use patchie_core::PropertyKey;
use thiserror::Error;

/// Result type alias for patch operations
pub type Result<T> = std::result::Result<T, PatchError>;

/// Why a wrap or unwrap did nothing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    /// Host is not an object, or the slot holds no truthy value
    #[error("Function {key} does not exist")]
    MissingTarget {
        /// Slot that was addressed
        key: PropertyKey,
    },

    /// Neither the wrapper nor the current slot value is callable
    #[error("The wrapper and the original object property must be a function")]
    NotCallable {
        /// Slot that was addressed
        key: PropertyKey,
    },

    /// Slot value carries no reversal capability
    #[error("Function {key} can't be unwrapped or already unwrapped")]
    NotReversible {
        /// Slot that was addressed
        key: PropertyKey,
    },

    /// Host slot refuses redefinition
    #[error("Property {key} cannot be patched: {source}")]
    Immutable {
        /// Slot that was addressed
        key: PropertyKey,
        /// Refusal reported by the host object
        #[source]
        source: patchie_core::Error,
    },

    /// Guard passed on the original, but the wrapper itself cannot be called
    #[error("Wrapper for {key} is not a function")]
    FactoryFailed {
        /// Slot that was addressed
        key: PropertyKey,
    },

    /// Wrapper returned something that cannot carry a patch record
    #[error("Replacement for {key} cannot carry a patch record: {reason}")]
    Unattachable {
        /// Slot that was addressed
        key: PropertyKey,
        /// What was wrong with the replacement
        reason: String,
    },
}

impl PatchError {
    /// Slot the failed operation addressed
    pub fn key(&self) -> &PropertyKey {
        match self {
            PatchError::MissingTarget { key }
            | PatchError::NotCallable { key }
            | PatchError::NotReversible { key }
            | PatchError::Immutable { key, .. }
            | PatchError::FactoryFailed { key }
            | PatchError::Unattachable { key, .. } => key,
        }
    }
}
