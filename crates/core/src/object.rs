//! Objects and property tables
//!
//! ## Design
//!
//! An [`Object`] is an identity-compared, insertion-ordered property table
//! behind a `parking_lot::RwLock`. It is shared as an [`ObjectRef`]
//! (`Arc<Object>`). An object may additionally carry a native function,
//! which makes it callable; callables are objects too and can hold their
//! own properties.
//!
//! The lock is only held for the duration of a single table operation and
//! never while user code (a native function) runs.
//!
//! Slot mutation follows the usual data-property rules:
//! - `set` is plain assignment: it keeps the slot's attributes and creates
//!   new slots as enumerable data properties.
//! - `define_property` replaces value and attributes together.
//! - Non-configurable slots refuse redefinition, read-only slots refuse
//!   assignment, non-extensible objects refuse new slots.

use crate::error::{Error, Result};
use crate::key::PropertyKey;
use crate::value::Value;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an object
pub type ObjectRef = Arc<Object>;

/// Native function body: `(this, args) -> result`
pub type NativeFn = Arc<dyn Fn(&Value, &[Value]) -> Value + Send + Sync>;

/// Property attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Slot may be assigned
    pub writable: bool,
    /// Slot is listed by [`Object::keys`]
    pub enumerable: bool,
    /// Slot may be redefined or deleted
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Default data property attributes (all true)
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable and configurable, but not enumerable
    pub const fn hidden() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self::data()
    }
}

#[derive(Clone)]
struct PropertyEntry {
    key: PropertyKey,
    value: Value,
    attributes: PropertyAttributes,
}

struct PropertyTable {
    entries: SmallVec<[PropertyEntry; 4]>,
    extensible: bool,
}

impl PropertyTable {
    fn position(&self, key: &PropertyKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }

    fn check_define(&self, key: &PropertyKey, attributes: Option<PropertyAttributes>) -> Result<()> {
        match self.position(key) {
            Some(idx) => {
                let existing = self.entries[idx].attributes;
                if existing.configurable {
                    return Ok(());
                }
                // A non-configurable slot may only have its value replaced,
                // and only while it stays writable with the same attributes.
                match attributes {
                    Some(attrs) if existing.writable && attrs == existing => Ok(()),
                    _ => Err(Error::NotConfigurable { key: key.clone() }),
                }
            }
            None if self.extensible => Ok(()),
            None => Err(Error::NotExtensible { key: key.clone() }),
        }
    }
}

/// A host object: property table plus an optional native function
pub struct Object {
    name: Option<Arc<str>>,
    call: Option<NativeFn>,
    table: RwLock<PropertyTable>,
}

impl Object {
    fn build(name: Option<Arc<str>>, call: Option<NativeFn>) -> Self {
        Self {
            name,
            call,
            table: RwLock::new(PropertyTable {
                entries: SmallVec::new(),
                extensible: true,
            }),
        }
    }

    /// Create an empty, non-callable object
    pub fn new() -> ObjectRef {
        Arc::new(Self::build(None, None))
    }

    /// Create a plain object from `(key, value)` pairs, all enumerable
    pub fn with_properties<K, I>(props: I) -> ObjectRef
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let obj = Self::new();
        {
            let mut table = obj.table.write();
            for (key, value) in props {
                let key = key.into();
                match table.position(&key) {
                    Some(idx) => table.entries[idx].value = value,
                    None => table.entries.push(PropertyEntry {
                        key,
                        value,
                        attributes: PropertyAttributes::data(),
                    }),
                }
            }
        }
        obj
    }

    /// Create a callable object wrapping a native function
    pub fn function<F>(name: impl Into<Arc<str>>, f: F) -> ObjectRef
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        Arc::new(Self::build(Some(name.into()), Some(Arc::new(f))))
    }

    /// Function name, if this object is a named callable
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the object carries a native function
    pub fn is_callable(&self) -> bool {
        self.call.is_some()
    }

    /// Invoke the native function
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match &self.call {
            Some(f) => Ok(f(this, args)),
            None => Err(Error::NotCallable),
        }
    }

    // ========== Reads ==========

    /// Read a slot; `Undefined` if absent
    pub fn get(&self, key: &PropertyKey) -> Value {
        let table = self.table.read();
        table
            .position(key)
            .map(|idx| table.entries[idx].value.clone())
            .unwrap_or(Value::Undefined)
    }

    /// Whether the object has its own slot named `key`
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.table.read().position(key).is_some()
    }

    /// Attributes of an own slot
    pub fn attributes(&self, key: &PropertyKey) -> Option<PropertyAttributes> {
        let table = self.table.read();
        table.position(key).map(|idx| table.entries[idx].attributes)
    }

    /// Whether `key` is an own, enumerable slot
    pub fn property_is_enumerable(&self, key: &PropertyKey) -> bool {
        self.attributes(key).map(|a| a.enumerable).unwrap_or(false)
    }

    /// Enumerable string and index keys, in insertion order
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.table
            .read()
            .entries
            .iter()
            .filter(|e| e.attributes.enumerable && e.key.as_symbol().is_none())
            .map(|e| e.key.clone())
            .collect()
    }

    /// All own keys including symbols and hidden slots, in insertion order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.table.read().entries.iter().map(|e| e.key.clone()).collect()
    }

    // ========== Writes ==========

    /// Plain assignment.
    ///
    /// Existing slots keep their attributes; new slots are enumerable data
    /// properties.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) -> Result<()> {
        let key = key.into();
        let mut table = self.table.write();
        match table.position(&key) {
            Some(idx) => {
                if !table.entries[idx].attributes.writable {
                    return Err(Error::NotWritable { key });
                }
                table.entries[idx].value = value;
            }
            None => {
                if !table.extensible {
                    return Err(Error::NotExtensible { key });
                }
                table.entries.push(PropertyEntry {
                    key,
                    value,
                    attributes: PropertyAttributes::data(),
                });
            }
        }
        Ok(())
    }

    /// Check whether `key` could be redefined with arbitrary attributes
    pub fn can_define(&self, key: &PropertyKey) -> Result<()> {
        self.table.read().check_define(key, None)
    }

    /// Define a slot, replacing both value and attributes
    pub fn define_property(
        &self,
        key: impl Into<PropertyKey>,
        value: Value,
        attributes: PropertyAttributes,
    ) -> Result<()> {
        let key = key.into();
        let mut table = self.table.write();
        table.check_define(&key, Some(attributes))?;
        match table.position(&key) {
            Some(idx) => {
                let entry = &mut table.entries[idx];
                entry.value = value;
                entry.attributes = attributes;
            }
            None => table.entries.push(PropertyEntry {
                key,
                value,
                attributes,
            }),
        }
        Ok(())
    }

    /// Remove an own slot. Returns whether a slot was removed.
    pub fn delete(&self, key: &PropertyKey) -> Result<bool> {
        let mut table = self.table.write();
        match table.position(key) {
            Some(idx) => {
                if !table.entries[idx].attributes.configurable {
                    return Err(Error::NotConfigurable { key: key.clone() });
                }
                table.entries.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========== Integrity levels ==========

    /// Refuse any new slot from now on
    pub fn prevent_extensions(&self) {
        self.table.write().extensible = false;
    }

    /// Whether new slots may be added
    pub fn is_extensible(&self) -> bool {
        self.table.read().extensible
    }

    /// Make every slot read-only and non-configurable, and refuse new slots
    pub fn freeze(&self) {
        let mut table = self.table.write();
        table.extensible = false;
        for entry in table.entries.iter_mut() {
            entry.attributes.writable = false;
            entry.attributes.configurable = false;
        }
    }

    /// Whether the object is frozen
    pub fn is_frozen(&self) -> bool {
        let table = self.table.read();
        !table.extensible
            && table
                .entries
                .iter()
                .all(|e| !e.attributes.writable && !e.attributes.configurable)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are not printed: objects may reference each other.
        f.debug_struct("Object")
            .field("name", &self.name)
            .field("callable", &self.is_callable())
            .field("keys", &self.own_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PropertyKey {
        PropertyKey::from(s)
    }

    #[test]
    fn test_get_missing_is_undefined() {
        let obj = Object::new();
        assert!(obj.get(&key("missing")).is_undefined());
    }

    #[test]
    fn test_set_creates_enumerable_slot() {
        let obj = Object::new();
        obj.set("a", Value::from(1.0)).unwrap();
        assert_eq!(obj.attributes(&key("a")), Some(PropertyAttributes::data()));
        assert_eq!(obj.keys(), vec![key("a")]);
    }

    #[test]
    fn test_set_keeps_attributes() {
        let obj = Object::new();
        obj.define_property("a", Value::from(1.0), PropertyAttributes::hidden())
            .unwrap();
        obj.set("a", Value::from(2.0)).unwrap();
        assert_eq!(obj.get(&key("a")), Value::from(2.0));
        assert!(!obj.property_is_enumerable(&key("a")));
    }

    #[test]
    fn test_keys_preserve_insertion_order() {
        let obj = Object::with_properties([("b", Value::Null), ("a", Value::Null)]);
        obj.set("c", Value::Null).unwrap();
        assert_eq!(obj.keys(), vec![key("b"), key("a"), key("c")]);
    }

    #[test]
    fn test_keys_skip_hidden_and_symbols() {
        let obj = Object::new();
        obj.set("visible", Value::Null).unwrap();
        obj.define_property("hidden", Value::Null, PropertyAttributes::hidden())
            .unwrap();
        obj.set(crate::Symbol::new("tag"), Value::Null).unwrap();
        assert_eq!(obj.keys(), vec![key("visible")]);
        assert_eq!(obj.own_keys().len(), 3);
    }

    #[test]
    fn test_non_configurable_refuses_redefine() {
        let obj = Object::new();
        obj.define_property("fixed", Value::Null, PropertyAttributes::frozen())
            .unwrap();
        let err = obj
            .define_property("fixed", Value::from(1.0), PropertyAttributes::data())
            .unwrap_err();
        assert!(matches!(err, Error::NotConfigurable { .. }));
        assert!(obj.can_define(&key("fixed")).is_err());
    }

    #[test]
    fn test_non_configurable_writable_allows_value_change() {
        let obj = Object::new();
        let attrs = PropertyAttributes {
            writable: true,
            enumerable: true,
            configurable: false,
        };
        obj.define_property("slot", Value::Null, attrs).unwrap();
        obj.define_property("slot", Value::from(5.0), attrs).unwrap();
        assert_eq!(obj.get(&key("slot")), Value::from(5.0));
    }

    #[test]
    fn test_read_only_refuses_set() {
        let obj = Object::new();
        obj.define_property(
            "ro",
            Value::Null,
            PropertyAttributes {
                writable: false,
                enumerable: true,
                configurable: true,
            },
        )
        .unwrap();
        assert!(matches!(
            obj.set("ro", Value::Null),
            Err(Error::NotWritable { .. })
        ));
    }

    #[test]
    fn test_freeze() {
        let obj = Object::with_properties([("a", Value::from(1.0))]);
        assert!(!obj.is_frozen());
        obj.freeze();
        assert!(obj.is_frozen());
        assert!(!obj.is_extensible());
        assert!(matches!(
            obj.set("b", Value::Null),
            Err(Error::NotExtensible { .. })
        ));
        assert!(matches!(
            obj.set("a", Value::Null),
            Err(Error::NotWritable { .. })
        ));
    }

    #[test]
    fn test_prevent_extensions_keeps_existing_writable() {
        let obj = Object::with_properties([("a", Value::from(1.0))]);
        obj.prevent_extensions();
        obj.set("a", Value::from(2.0)).unwrap();
        assert!(obj.can_define(&key("a")).is_ok());
        assert!(obj.can_define(&key("b")).is_err());
    }

    #[test]
    fn test_delete() {
        let obj = Object::with_properties([("a", Value::Null)]);
        assert!(obj.delete(&key("a")).unwrap());
        assert!(!obj.delete(&key("a")).unwrap());
        assert!(!obj.has_own(&key("a")));
    }

    #[test]
    fn test_function_call() {
        let f = Object::function("double", |_, args| match args.first() {
            Some(Value::Number(n)) => Value::Number(n * 2.0),
            _ => Value::Undefined,
        });
        assert!(f.is_callable());
        assert_eq!(f.name(), Some("double"));
        assert_eq!(
            f.call(&Value::Undefined, &[Value::from(21.0)]).unwrap(),
            Value::from(42.0)
        );
    }

    #[test]
    fn test_plain_object_not_callable() {
        let obj = Object::new();
        assert_eq!(obj.call(&Value::Undefined, &[]), Err(Error::NotCallable));
    }
}
