//! Error types for the host object model
//!
//! Every mutation of a property table can be refused by the attributes of
//! the slot or the object. We use `thiserror` for automatic `Display` and
//! `Error` trait implementations.

use crate::key::PropertyKey;
use thiserror::Error;

/// Result type alias for object model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the host object model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Attempted to call a value that carries no native function
    #[error("value is not a function")]
    NotCallable,

    /// Redefinition refused by a non-configurable slot
    #[error("cannot redefine property: {key}")]
    NotConfigurable {
        /// Slot that refused the redefinition
        key: PropertyKey,
    },

    /// Assignment refused by a read-only slot
    #[error("cannot assign to read only property: {key}")]
    NotWritable {
        /// Slot that refused the assignment
        key: PropertyKey,
    },

    /// New property refused by a non-extensible object
    #[error("cannot add property {key}, object is not extensible")]
    NotExtensible {
        /// Slot that could not be created
        key: PropertyKey,
    },
}
