//! Shared helpers for the default controller suite

#![allow(dead_code)]

use parking_lot::{Mutex, MutexGuard};
use patchie::{MemorySink, PatchOptions, Value};
use std::sync::Arc;

static SERIAL: Mutex<()> = Mutex::new(());

/// Hold for the duration of a test that touches the default controller
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock()
}

/// Point the default controller at a fresh in-memory sink
pub fn capture() -> Arc<MemorySink> {
    let sink = Arc::new(MemorySink::new());
    patchie::set_options(PatchOptions::new().with_shared_logger(sink.clone()));
    sink
}

pub fn answer() -> Value {
    Value::function("answer", |_, _| Value::from(42))
}

pub fn passthrough(original: Value) -> Value {
    Value::function("wrapped", move |this, args| {
        original.call(this, args).unwrap_or_default()
    })
}
