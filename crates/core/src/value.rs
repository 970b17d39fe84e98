//! Value type for host objects
//!
//! ## Equality
//!
//! `PartialEq` is strict equality: primitives compare by value (`NaN` never
//! equals itself), objects compare by identity. Two distinct objects with
//! identical properties are not equal.
//!
//! ## Truthiness
//!
//! `Undefined`, `Null`, `false`, `0`, `-0`, `NaN` and the empty string are
//! falsy. Every object is truthy, callable or not.

use crate::error::{Error, Result};
use crate::key::PropertyKey;
use crate::object::{Object, ObjectRef};
use std::fmt;
use std::sync::Arc;

/// Dynamically typed value stored in a property slot
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// IEEE-754 number
    Number(f64),
    /// Immutable string
    String(Arc<str>),
    /// Object reference (plain or callable)
    Object(ObjectRef),
}

impl Value {
    /// Build a callable value from a Rust closure
    pub fn function<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Object(Object::function(name, f))
    }

    /// Build a plain object value from `(key, value)` pairs
    pub fn object<K, I>(props: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Object::with_properties(props))
    }

    /// Check if the value is `Undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Truthiness as used by guards
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Whether the value is an object carrying a native function
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_callable())
    }

    /// Returns the object reference if this is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the string if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Type name as reported by diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(o) if o.is_callable() => "function",
            Value::Object(_) => "object",
        }
    }

    /// Strict equality: primitives by value, objects by identity
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read a property. Primitives have no properties and yield `Undefined`.
    pub fn get(&self, key: &PropertyKey) -> Value {
        match self {
            Value::Object(o) => o.get(key),
            _ => Value::Undefined,
        }
    }

    /// Call the value as a function
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Value::Object(o) => o.call(this, args),
            _ => Err(Error::NotCallable),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(o) => match o.name() {
                Some(name) if o.is_callable() => write!(f, "[Function {}]@{:p}", name, Arc::as_ptr(o)),
                _ if o.is_callable() => write!(f, "[Function]@{:p}", Arc::as_ptr(o)),
                _ => write!(f, "[Object]@{:p}", Arc::as_ptr(o)),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<&ObjectRef> for Value {
    fn from(o: &ObjectRef) -> Self {
        Value::Object(o.clone())
    }
}
