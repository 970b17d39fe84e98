//! Process-wide default controller
//!
//! A ready-to-use [`PatchController`] constructed on first use and living
//! for the rest of the process. The free functions here delegate to it;
//! everything they do is also available on an owned controller.
//!
//! The lock only guards the controller value itself. Each call clones the
//! controller (one `Arc` bump) and releases the lock before any wrapper
//! runs, so wrappers may call back into these functions.

use crate::controller::{Factory, PatchController, Unwrapped};
use crate::error::Result;
use crate::options::PatchOptions;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use patchie_core::{PropertyKey, Value};
use tracing::info;

static DEFAULT_CONTROLLER: Lazy<RwLock<PatchController>> =
    Lazy::new(|| RwLock::new(PatchController::new()));

/// Snapshot of the default controller
pub fn default_controller() -> PatchController {
    DEFAULT_CONTROLLER.read().clone()
}

/// Apply options to the default controller
pub fn set_options(options: PatchOptions) {
    let replaces_logger = options.logger.is_some();
    DEFAULT_CONTROLLER.write().set_options(options);
    if replaces_logger {
        info!(target: "patchie", "default controller logger replaced");
    }
}

/// [`PatchController::wrap`] on the default controller
pub fn wrap(host: &Value, key: impl Into<PropertyKey>, factory: impl Into<Factory>) -> Option<Value> {
    default_controller().wrap(host, key, factory)
}

/// [`PatchController::try_wrap`] on the default controller
pub fn try_wrap(
    host: &Value,
    key: impl Into<PropertyKey>,
    factory: impl Into<Factory>,
) -> Result<Value> {
    default_controller().try_wrap(host, key, factory)
}

/// [`PatchController::unwrap`] on the default controller
pub fn unwrap(host: &Value, key: impl Into<PropertyKey>) {
    default_controller().unwrap(host, key)
}

/// [`PatchController::try_unwrap`] on the default controller
pub fn try_unwrap(host: &Value, key: impl Into<PropertyKey>) -> Result<Unwrapped> {
    default_controller().try_unwrap(host, key)
}
