//! Property keys
//!
//! A slot on an object is named by a string, an array-style index, or an
//! opaque [`Symbol`]. Symbols compare by identity: two symbols created with
//! the same description are still distinct keys.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque unique token usable as a property key
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    /// Mint a new symbol. Every call yields a distinct key.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    /// Human-readable description (not part of the identity)
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})#{}", self.description, self.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// Identifier naming a property slot
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Named property
    String(Arc<str>),
    /// Integer index
    Index(u32),
    /// Opaque token
    Symbol(Symbol),
}

impl PropertyKey {
    /// Whether the key counts as present when used as a condition.
    ///
    /// The empty string and index `0` are falsy; symbols are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Index(i) => *i != 0,
            Self::Symbol(_) => true,
        }
    }

    /// Returns the symbol if this is a symbol key
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Index(i) => write!(f, "{}", i),
            Self::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<&String> for PropertyKey {
    fn from(s: &String) -> Self {
        Self::String(Arc::from(s.as_str()))
    }
}

impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(s: &Symbol) -> Self {
        Self::Symbol(s.clone())
    }
}

impl From<&PropertyKey> for PropertyKey {
    fn from(k: &PropertyKey) -> Self {
        k.clone()
    }
}
