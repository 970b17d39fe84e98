//! wrap / unwrap through the default controller

use crate::common::*;
use patchie::{is_wrapped, original_of, PatchError, PropertyKey, Unwrapped, Value};

#[test]
fn test_wrap_unwrap_roundtrip() {
    let _guard = serial();
    let sink = capture();
    let f = answer();
    let host = Value::object([("answer", f.clone())]);

    let w = patchie::wrap(&host, "answer", passthrough).unwrap();
    assert_eq!(original_of(&w), Some(f.clone()));
    assert_eq!(w.call(&host, &[]).unwrap(), Value::from(42));

    patchie::unwrap(&host, "answer");
    assert_eq!(host.get(&PropertyKey::from("answer")), f);
    assert!(sink.is_empty());
}

#[test]
fn test_failures_reach_configured_sink() {
    let _guard = serial();
    let sink = capture();
    let host = Value::object([("count", Value::from(1))]);

    assert!(patchie::wrap(&host, "missing", passthrough).is_none());
    assert!(patchie::wrap(&host, "count", Value::Null).is_none());
    patchie::unwrap(&host, "count");

    let messages = sink.take();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("missing"));
    assert!(messages[1].contains("must be a function"));
    assert!(messages[2].contains("can't be unwrapped"));
}

#[test]
fn test_try_variants_do_not_log() {
    let _guard = serial();
    let sink = capture();
    let host = Value::object([("answer", answer())]);

    assert!(matches!(
        patchie::try_wrap(&host, "missing", passthrough),
        Err(PatchError::MissingTarget { .. })
    ));
    patchie::try_wrap(&host, "answer", passthrough).unwrap();
    assert_eq!(patchie::try_unwrap(&host, "answer"), Ok(Unwrapped::Restored));
    assert!(matches!(
        patchie::try_unwrap(&host, "answer"),
        Err(PatchError::NotReversible { .. })
    ));
    assert!(sink.is_empty());
}

#[test]
fn test_wrapper_may_reenter_default_controller() {
    let _guard = serial();
    let _sink = capture();
    let inner = Value::object([("answer", answer())]);
    let outer = Value::object([("answer", answer())]);
    let inner_for_factory = inner.clone();

    patchie::wrap(&outer, "answer", move |original: Value| {
        patchie::wrap(&inner_for_factory, "answer", passthrough);
        passthrough(original)
    })
    .unwrap();

    assert!(is_wrapped(&outer.get(&PropertyKey::from("answer"))));
    assert!(is_wrapped(&inner.get(&PropertyKey::from("answer"))));
}
