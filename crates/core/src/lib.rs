//! Core types for patchie
//!
//! This crate defines the host object model the patch controller operates on:
//! - Value: dynamically typed value (primitives, objects, callables)
//! - PropertyKey: string, index or opaque symbol naming a property slot
//! - PropertyAttributes: writable / enumerable / configurable flags
//! - Object: identity-compared property table, optionally callable
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod object;
pub mod value;

pub use error::{Error, Result};
pub use key::{PropertyKey, Symbol};
pub use object::{NativeFn, Object, ObjectRef, PropertyAttributes};
pub use value::Value;
