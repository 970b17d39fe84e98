//! set_options on the default controller

use crate::common::*;
use patchie::{MemorySink, PatchConfig, PatchOptions, Value};
use std::sync::Arc;

#[test]
fn test_options_without_logger_keep_current_sink() {
    let _guard = serial();
    let sink = capture();

    patchie::set_options(PatchOptions::new());
    patchie::unwrap(&Value::Null, "anything");

    // Message plus backtrace
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_later_logger_replaces_earlier() {
    let _guard = serial();
    let first = capture();
    let second = Arc::new(MemorySink::new());
    patchie::set_options(PatchOptions::new().with_shared_logger(second.clone()));

    patchie::wrap(&Value::Undefined, "f", passthrough);

    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}

#[test]
fn test_options_from_config() {
    let _guard = serial();
    let config = PatchConfig::from_toml_str("sink = \"silent\"").unwrap();
    patchie::set_options(PatchOptions::from_config(&config));

    // Silent sink: nothing to observe beyond not panicking
    patchie::wrap(&Value::Undefined, "f", passthrough);
    patchie::unwrap(&Value::Undefined, "f");

    let sink = capture();
    patchie::unwrap(&Value::Undefined, "f");
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_default_controller_snapshot_uses_current_sink() {
    let _guard = serial();
    let sink = capture();
    let snapshot = patchie::default_controller();

    snapshot.wrap(&Value::Undefined, "f", passthrough);
    assert_eq!(sink.len(), 1);
}
