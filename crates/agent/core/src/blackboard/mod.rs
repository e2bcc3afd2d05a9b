//! Typed key/value store shared by the behavior tree nodes.
//!
//! Keys are declared once as [`Key<T>`] constants (see [`keys`]); the store
//! itself holds tagged [`Value`]s so that a key keeps the type it was
//! registered with for the lifetime of the blackboard.
pub mod keys;
mod value;

pub use value::{BlackboardValue, Value, ValueKind};

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::{AgentError, ErrorSeverity};

/// Compile-time typed blackboard key.
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> core::fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlackboardError {
    #[error("blackboard key '{0}' is not registered")]
    MissingKey(String),

    #[error("blackboard key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("blackboard key '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl AgentError for BlackboardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingKey(_) | Self::TypeMismatch { .. } => ErrorSeverity::Recoverable,
            Self::AlreadyRegistered(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingKey(_) => "BLACKBOARD_MISSING_KEY",
            Self::TypeMismatch { .. } => "BLACKBOARD_TYPE_MISMATCH",
            Self::AlreadyRegistered(_) => "BLACKBOARD_ALREADY_REGISTERED",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Blackboard {
    entries: HashMap<&'static str, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` with its initial value.
    pub fn add<T: BlackboardValue>(&mut self, key: Key<T>, value: T) -> Result<(), BlackboardError> {
        if self.entries.contains_key(key.name) {
            return Err(BlackboardError::AlreadyRegistered(key.name.to_owned()));
        }
        self.entries.insert(key.name, value.into_value());
        Ok(())
    }

    pub fn get<T: BlackboardValue>(&self, key: Key<T>) -> Result<T, BlackboardError> {
        self.get_by_name(key.name)
    }

    /// Dynamic lookup for callers that only know the key name.
    pub fn get_by_name<T: BlackboardValue>(&self, name: &str) -> Result<T, BlackboardError> {
        let value = self
            .entries
            .get(name)
            .ok_or_else(|| BlackboardError::MissingKey(name.to_owned()))?;
        T::from_value(value).ok_or_else(|| BlackboardError::TypeMismatch {
            key: name.to_owned(),
            expected: T::KIND,
            found: value.kind(),
        })
    }

    /// Overwrites a registered key. The stored type may not change.
    pub fn change<T: BlackboardValue>(&mut self, key: Key<T>, value: T) -> Result<(), BlackboardError> {
        let slot = self
            .entries
            .get_mut(key.name)
            .ok_or_else(|| BlackboardError::MissingKey(key.name.to_owned()))?;
        if slot.kind() != T::KIND {
            return Err(BlackboardError::TypeMismatch {
                key: key.name.to_owned(),
                expected: T::KIND,
                found: slot.kind(),
            });
        }
        *slot = value.into_value();
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.entries.get(name).map(Value::kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
