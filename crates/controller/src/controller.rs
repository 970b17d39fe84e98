//! PatchController: reversible replacement of a property slot
//!
//! ## Design Principles
//!
//! 1. **Never fail loudly**: `wrap` and `unwrap` report problems to the log
//!    sink and return. Instrumentation must not take its host down.
//! 2. **No controller state**: the bookkeeping of a patch lives on the
//!    replacement value (see [`crate::record`]). A controller only owns its
//!    sink.
//! 3. **Layered**: wrapping an already wrapped slot stacks a new layer whose
//!    original is the previous replacement. `unwrap` removes one layer.
//!
//! ## Weak callable guard
//!
//! `wrap` refuses only when *neither* the wrapper nor the current value is
//! callable. Wrapping a plain value with a callable wrapper is accepted, and
//! so is a wrapper that returns a non-function. When the guard passes on the
//! original alone but the wrapper cannot be invoked, the wrap fails with
//! [`PatchError::FactoryFailed`] before anything is mutated.

use crate::error::{PatchError, Result};
use crate::options::PatchOptions;
use crate::record::{self, unwrap_key};
use crate::sink::{LogSink, StderrSink};
use patchie_core::{PropertyKey, Value};
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Produces the replacement for a slot from its current value
#[derive(Clone)]
pub enum Factory {
    /// Rust closure
    Native(Arc<dyn Fn(Value) -> Value + Send + Sync>),
    /// Host value, invoked as `value(original)` if callable
    Value(Value),
}

impl Factory {
    /// Whether the factory can be invoked
    pub fn is_callable(&self) -> bool {
        match self {
            Factory::Native(_) => true,
            Factory::Value(v) => v.is_callable(),
        }
    }

    fn invoke(&self, original: Value) -> patchie_core::Result<Value> {
        match self {
            Factory::Native(f) => Ok(f(original)),
            Factory::Value(v) => v.call(&Value::Undefined, &[original]),
        }
    }
}

impl<F> From<F> for Factory
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Factory::Native(Arc::new(f))
    }
}

impl From<Value> for Factory {
    fn from(v: Value) -> Self {
        Factory::Value(v)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Native(_) => f.write_str("Factory::Native"),
            Factory::Value(v) => f.debug_tuple("Factory::Value").field(v).finish(),
        }
    }
}

/// How a successful `try_unwrap` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwrapped {
    /// The slot now holds the layer's original again
    Restored,
    /// The capability found the slot no longer holding its layer and left it alone
    Superseded,
}

/// Applies and reverses patches, reporting failures to a sink
///
/// ## Example
///
/// ```rust,ignore
/// use patchie::{PatchController, Value};
///
/// let controller = PatchController::new();
/// let host = Value::object([("query", Value::function("query", |_, _| Value::from(1)))]);
///
/// controller.wrap(&host, "query", |original: Value| {
///     Value::function("query", move |this, args| {
///         tracing::info!("query called");
///         original.call(this, args).unwrap_or_default()
///     })
/// });
///
/// controller.unwrap(&host, "query");
/// ```
#[derive(Clone)]
pub struct PatchController {
    logger: Arc<dyn LogSink>,
}

impl PatchController {
    /// Create a controller logging to standard error
    pub fn new() -> Self {
        Self {
            logger: Arc::new(StderrSink),
        }
    }

    /// Create a controller and apply `options`
    pub fn with_options(options: PatchOptions) -> Self {
        let mut controller = Self::new();
        controller.set_options(options);
        controller
    }

    /// Apply options. Absent fields leave the current setting unchanged.
    pub fn set_options(&mut self, options: PatchOptions) {
        if let Some(logger) = options.logger {
            self.logger = logger;
        }
    }

    /// The sink receiving diagnostics
    pub fn logger(&self) -> &Arc<dyn LogSink> {
        &self.logger
    }

    // ========== Wrap ==========

    /// Replace `host[key]` with `factory(host[key])`.
    ///
    /// Returns the installed replacement, or `None` after logging why nothing
    /// was patched.
    pub fn wrap(
        &self,
        host: &Value,
        key: impl Into<PropertyKey>,
        factory: impl Into<Factory>,
    ) -> Option<Value> {
        match self.try_wrap(host, key, factory) {
            Ok(replacement) => Some(replacement),
            Err(err) => {
                debug!(target: "patchie", key = %err.key(), error = %err, "wrap refused");
                self.logger.log(&err.to_string());
                None
            }
        }
    }

    /// [`wrap`](Self::wrap) without logging: the failure is returned instead
    pub fn try_wrap(
        &self,
        host: &Value,
        key: impl Into<PropertyKey>,
        factory: impl Into<Factory>,
    ) -> Result<Value> {
        let key = key.into();
        let factory = factory.into();

        let original = host.get(&key);
        let host_obj = match host.as_object() {
            Some(obj) if original.is_truthy() => obj,
            _ => return Err(PatchError::MissingTarget { key }),
        };

        if !factory.is_callable() && !original.is_callable() {
            return Err(PatchError::NotCallable { key });
        }

        if let Err(source) = host_obj.can_define(&key) {
            return Err(PatchError::Immutable { key, source });
        }

        let replacement = match factory.invoke(original.clone()) {
            Ok(value) => value,
            Err(_) => return Err(PatchError::FactoryFailed { key }),
        };

        let replacement_obj = match &replacement {
            Value::Object(obj) => obj.clone(),
            other => {
                return Err(PatchError::Unattachable {
                    key,
                    reason: format!("wrapper returned a {}", other.type_name()),
                })
            }
        };

        // The wrapper may have frozen or locked the host while it ran.
        if let Err(source) = host_obj.can_define(&key) {
            return Err(PatchError::Immutable { key, source });
        }

        let attached = record::can_attach(&replacement_obj)
            .and_then(|_| record::attach(host_obj, &key, &original, &replacement_obj));
        if let Err(source) = attached {
            return Err(PatchError::Unattachable {
                key,
                reason: source.to_string(),
            });
        }

        if let Err(source) = record::define_slot(host_obj, key.clone(), replacement.clone()) {
            return Err(PatchError::Immutable { key, source });
        }

        debug!(target: "patchie", key = %key, "wrapped");
        Ok(replacement)
    }

    // ========== Unwrap ==========

    /// Remove the topmost patch layer from `host[key]`.
    ///
    /// Failures are logged; when the target is missing a backtrace follows
    /// the message as a second log entry.
    pub fn unwrap(&self, host: &Value, key: impl Into<PropertyKey>) {
        if let Err(err) = self.try_unwrap(host, key) {
            debug!(target: "patchie", key = %err.key(), error = %err, "unwrap refused");
            self.logger.log(&err.to_string());
            if matches!(err, PatchError::MissingTarget { .. }) {
                self.logger.log(&Backtrace::force_capture().to_string());
            }
        }
    }

    /// [`unwrap`](Self::unwrap) without logging: the outcome is returned instead
    pub fn try_unwrap(&self, host: &Value, key: impl Into<PropertyKey>) -> Result<Unwrapped> {
        let key = key.into();

        let current = host.get(&key);
        let host_obj = match host.as_object() {
            Some(obj) if key.is_truthy() && current.is_truthy() => obj,
            _ => return Err(PatchError::MissingTarget { key }),
        };

        let capability = current.get(unwrap_key());
        if !capability.is_truthy() {
            return Err(PatchError::NotReversible { key });
        }

        if let Err(source) = host_obj.can_define(&key) {
            return Err(PatchError::Immutable { key, source });
        }

        let restored = match capability.call(&current, &[]) {
            Ok(result) => result.is_truthy(),
            Err(_) => return Err(PatchError::NotReversible { key }),
        };

        if restored {
            debug!(target: "patchie", key = %key, "unwrapped");
            Ok(Unwrapped::Restored)
        } else {
            debug!(target: "patchie", key = %key, "slot changed since wrap, left untouched");
            Ok(Unwrapped::Superseded)
        }
    }
}

impl Default for PatchController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchController").finish_non_exhaustive()
    }
}
