//! Reversible property patching
//!
//! This crate replaces a named slot on a host object with a caller-built
//! replacement and keeps enough on the replacement to undo it later:
//! - PatchController: `wrap` / `unwrap` / `set_options`
//! - PatchRecord: the original, tag and reversal capability carried by a wrapped value
//! - LogSink: where failed operations are reported
//! - PatchOptions / PatchConfig: controller configuration
//! - global: the process-wide default controller

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod error;
pub mod global;
pub mod options;
pub mod record;
pub mod sink;

pub use controller::{Factory, PatchController, Unwrapped};
pub use error::{PatchError, Result};
pub use global::{default_controller, set_options, try_unwrap, try_wrap, unwrap, wrap};
pub use options::{ConfigError, PatchConfig, PatchOptions, CONFIG_FILE_NAME};
pub use record::{is_wrapped, original_of, PatchRecord};
pub use sink::{LogSink, MemorySink, SilentSink, SinkKind, StderrSink, TracingSink};

// Host object model, re-exported so callers depend on one crate
pub use patchie_core::{Object, ObjectRef, PropertyAttributes, PropertyKey, Symbol, Value};
