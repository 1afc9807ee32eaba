//! Validator-facing types.
//!
//! A validator receives a [`ValidationContext`] built fresh for every call.
//! The context carries the field value, a local error slot written by
//! [`ValidationContext::set_error`], and read access to sibling fields
//! through [`ValidationContext::get_field`].

use crate::error::Result;
use crate::store::project;
use crate::types::{find, FieldData, FieldRecord, Value};

/// Short-lived value object handed to a validator.
pub struct ValidationContext<'a> {
    value: &'a Value,
    fields: &'a [FieldRecord],
    error: String,
}

impl<'a> ValidationContext<'a> {
    /// Build a context for `value`, resolving sibling lookups against `fields`.
    pub fn new(value: &'a Value, fields: &'a [FieldRecord]) -> Self {
        Self {
            value,
            fields,
            error: String::new(),
        }
    }

    /// Current value of the field being validated.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Record a custom error. A non-empty message overrides the validator's verdict;
    /// the last call wins and an empty message clears it.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
    }

    /// Public data of another field, as a detached copy.
    ///
    /// Changes made to the returned value are discarded; they never reach
    /// the collection.
    pub fn get_field(&self, name: &str) -> Result<FieldData> {
        find(self.fields, name).map(project)
    }

    /// The custom error, if one was set.
    pub fn custom_error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    pub fn into_custom_error(self) -> Option<String> {
        (!self.error.is_empty()).then_some(self.error)
    }
}

/// What a validator returns.
///
/// Only a strict `true` passes. `()` stands for a validator that returns
/// nothing and therefore never passes on its own.
pub trait Verdict {
    fn into_verdict(self) -> Result<bool>;
}

impl Verdict for bool {
    fn into_verdict(self) -> Result<bool> {
        Ok(self)
    }
}

impl Verdict for () {
    fn into_verdict(self) -> Result<bool> {
        Ok(false)
    }
}

impl Verdict for Option<bool> {
    fn into_verdict(self) -> Result<bool> {
        Ok(self == Some(true))
    }
}

impl<V: Verdict> Verdict for Result<V> {
    fn into_verdict(self) -> Result<bool> {
        self.and_then(Verdict::into_verdict)
    }
}
