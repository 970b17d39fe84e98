//! patchie - reversible property patching for instrumentation agents
//!
//! Replaces a named slot on a host object with a wrapped replacement and
//! keeps enough on the replacement to restore the original later.
//!
//! # Quick Start
//!
//! ```ignore
//! use patchie::{Value, PropertyKey};
//!
//! let host = Value::object([("query", Value::function("query", |_, _| Value::from(1)))]);
//!
//! // Wrap through the process-wide default controller
//! patchie::wrap(&host, "query", |original: Value| {
//!     Value::function("query", move |this, args| original.call(this, args).unwrap_or_default())
//! });
//!
//! // Take the patch off again
//! patchie::unwrap(&host, "query");
//! ```
//!
//! # Architecture
//!
//! The host object model lives in `patchie-core`; the controller, patch
//! records, sinks and the default instance live in `patchie-controller`.
//! Both are re-exported here.

// Re-export the public API from patchie-controller
pub use patchie_controller::*;
