//! Patch records
//!
//! ## Design
//!
//! A patch record travels with the replacement value itself, never in a side
//! table. It is three facets stored on the replacement object under reserved
//! symbols:
//!
//! - `ORIGINAL`: the value the slot held when the patch was applied
//! - `UNWRAP`: a zero-argument callable that restores the slot
//! - `WRAPPED`: tag marking the value as a patch
//!
//! [`PatchRecord`] is the typed, fixed-shape view of those facets.
//!
//! ## Enumerability
//!
//! Every slot written here (the facets and the host slot) goes through
//! [`define_slot`]: the new slot is writable and configurable, and enumerable
//! exactly when the same slot already held a truthy, enumerable value.
//!
//! ## Reversal guard
//!
//! The capability restores the host slot only while the slot still holds the
//! replacement it was attached to. Anything newer is left alone.

use once_cell::sync::Lazy;
use patchie_core::{Object, ObjectRef, PropertyAttributes, PropertyKey, Symbol, Value};
use std::sync::Arc;

struct Facets {
    original: PropertyKey,
    wrapped: PropertyKey,
    unwrap: PropertyKey,
}

static FACETS: Lazy<Facets> = Lazy::new(|| Facets {
    original: PropertyKey::Symbol(Symbol::new("ORIGINAL")),
    wrapped: PropertyKey::Symbol(Symbol::new("WRAPPED")),
    unwrap: PropertyKey::Symbol(Symbol::new("WRAP")),
});

/// Key of the facet holding the original value
pub fn original_key() -> &'static PropertyKey {
    &FACETS.original
}

/// Key of the facet tagging a value as wrapped
pub fn wrapped_key() -> &'static PropertyKey {
    &FACETS.wrapped
}

/// Key of the facet holding the reversal capability
pub fn unwrap_key() -> &'static PropertyKey {
    &FACETS.unwrap
}

/// Define `key` on `object`, carrying over enumerability of the slot it replaces
pub(crate) fn define_slot(
    object: &Object,
    key: PropertyKey,
    value: Value,
) -> patchie_core::Result<()> {
    let enumerable = object.get(&key).is_truthy() && object.property_is_enumerable(&key);
    object.define_property(
        key,
        value,
        PropertyAttributes {
            enumerable,
            ..PropertyAttributes::data()
        },
    )
}

/// Check that all three facets can be written to `object`
pub(crate) fn can_attach(object: &Object) -> patchie_core::Result<()> {
    object.can_define(original_key())?;
    object.can_define(unwrap_key())?;
    object.can_define(wrapped_key())
}

/// Attach the patch record to `replacement`.
///
/// Does not touch the host; installing the replacement is the caller's job.
/// When the wrapper handed back the original itself, the layer is a self
/// layer: see [`attach_self`].
pub(crate) fn attach(
    host: &ObjectRef,
    key: &PropertyKey,
    original: &Value,
    replacement: &ObjectRef,
) -> patchie_core::Result<()> {
    if matches!(original, Value::Object(o) if Arc::ptr_eq(o, replacement)) {
        return attach_self(host, key, replacement);
    }
    define_slot(replacement, original_key().clone(), original.clone())?;
    define_slot(
        replacement,
        unwrap_key().clone(),
        reversal(host, key, original, replacement),
    )?;
    define_slot(replacement, wrapped_key().clone(), Value::Bool(true))
}

/// A facet slot as it was before a self layer overwrote it
type SavedFacet = (PropertyKey, Option<(Value, PropertyAttributes)>);

fn save_facet(object: &Object, key: &PropertyKey) -> SavedFacet {
    let saved = object
        .attributes(key)
        .map(|attributes| (object.get(key), attributes));
    (key.clone(), saved)
}

/// Attach a layer whose replacement is the original.
///
/// No `ORIGINAL` facet is stored (the value is its own original, and a facet
/// pointing at itself would keep it alive forever). The facets present
/// before the layer are saved in the capability and put back on reversal,
/// so an identity wrap of an already wrapped value unwinds to that value's
/// own record.
fn attach_self(
    host: &ObjectRef,
    key: &PropertyKey,
    target: &ObjectRef,
) -> patchie_core::Result<()> {
    let saved: Vec<SavedFacet> = [original_key(), unwrap_key(), wrapped_key()]
        .into_iter()
        .map(|facet| save_facet(target, facet))
        .collect();

    target.delete(original_key())?;

    let host_ref = Arc::downgrade(host);
    let target_ref = Arc::downgrade(target);
    let slot = key.clone();
    let capability = Value::function("unwrap", move |_, _| {
        let (Some(host), Some(target)) = (host_ref.upgrade(), target_ref.upgrade()) else {
            return Value::Bool(false);
        };
        if !host.get(&slot).strict_equals(&Value::Object(target.clone())) {
            return Value::Bool(false);
        }
        let restored = saved.iter().try_for_each(|(facet, previous)| match previous {
            Some((value, attributes)) => {
                target.define_property(facet.clone(), value.clone(), *attributes)
            }
            None => target.delete(facet).map(|_| ()),
        });
        Value::Bool(restored.is_ok())
    });

    define_slot(target, unwrap_key().clone(), capability)?;
    define_slot(target, wrapped_key().clone(), Value::Bool(true))
}

/// Build the reversal capability.
///
/// Host and replacement are held weakly: the replacement stores this closure,
/// and the host stores the replacement.
fn reversal(host: &ObjectRef, key: &PropertyKey, original: &Value, replacement: &ObjectRef) -> Value {
    let host = Arc::downgrade(host);
    let replacement = Arc::downgrade(replacement);
    let key = key.clone();
    let original = original.clone();

    Value::function("unwrap", move |_, _| {
        let (Some(host), Some(replacement)) = (host.upgrade(), replacement.upgrade()) else {
            return Value::Bool(false);
        };
        if !host.get(&key).strict_equals(&Value::Object(replacement)) {
            return Value::Bool(false);
        }
        Value::Bool(define_slot(&host, key.clone(), original.clone()).is_ok())
    })
}

/// Typed view of the patch record carried by a wrapped value
#[derive(Clone, Debug)]
pub struct PatchRecord {
    original: Value,
    unwrap: Value,
}

impl PatchRecord {
    /// Read the record off `value`; `None` unless it carries the wrapped tag
    pub fn of(value: &Value) -> Option<Self> {
        if !value.get(wrapped_key()).is_truthy() {
            return None;
        }
        // A self layer carries no ORIGINAL facet: the value is its own original.
        let original = match value.as_object() {
            Some(obj) if !obj.has_own(original_key()) => value.clone(),
            _ => value.get(original_key()),
        };
        Some(Self {
            original,
            unwrap: value.get(unwrap_key()),
        })
    }

    /// Value the slot held when this layer was applied
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The reversal capability as stored on the value
    pub fn capability(&self) -> &Value {
        &self.unwrap
    }

    /// Invoke the reversal capability.
    ///
    /// Returns `true` if the slot was restored, `false` if it had been
    /// replaced since (or the capability is unusable).
    pub fn reverse(&self) -> bool {
        self.unwrap
            .call(&Value::Undefined, &[])
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }
}

/// Whether `value` carries a patch record
pub fn is_wrapped(value: &Value) -> bool {
    value.get(wrapped_key()).is_truthy()
}

/// The original a wrapped value replaced, if any
pub fn original_of(value: &Value) -> Option<Value> {
    PatchRecord::of(value).map(|r| r.original)
}
