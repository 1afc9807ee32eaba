//! Core field types: records, their public data and the ordered collection.
//!
//! A [`FieldRecord`] is the live state of one field. Records are cloned,
//! never shared mutably: every transition builds a new [`FieldCollection`].

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};
use crate::validation::ValidationContext;

pub use serde_json::Value;

/// Normalizes a proposed value. Receives `(new_value, previous_value)`.
pub type TransformFn = Arc<dyn Fn(Value, &Value) -> Value + Send + Sync>;

/// Validates a field value. `Ok(true)` is the only passing verdict.
pub type ValidateFn = Arc<dyn Fn(&mut ValidationContext<'_>) -> Result<bool> + Send + Sync>;

/// Value used when a declaration does not provide one.
pub fn empty_value() -> Value {
    Value::String(String::new())
}

/// The reducer-managed state of a single field.
#[derive(Clone)]
pub struct FieldRecord {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) initial_value: Value,
    pub(crate) dirty: bool,
    pub(crate) error: String,
    pub(crate) invalid: bool,
    pub(crate) transform: Option<TransformFn>,
    pub(crate) validate: Option<ValidateFn>,
}

impl FieldRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn initial_value(&self) -> &Value {
        &self.initial_value
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    pub fn transform(&self) -> Option<&TransformFn> {
        self.transform.as_ref()
    }

    pub fn validator(&self) -> Option<&ValidateFn> {
        self.validate.as_ref()
    }

    /// Replace the value and recompute `dirty` against the initial value.
    pub fn assign_value(&mut self, value: Value) {
        self.dirty = self.initial_value != value;
        self.value = value;
    }

    /// Replace the error and keep `invalid` in step with it.
    pub fn assign_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
        self.invalid = !self.error.is_empty();
    }
}

impl fmt::Debug for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRecord")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("initial_value", &self.initial_value)
            .field("dirty", &self.dirty)
            .field("error", &self.error)
            .field("invalid", &self.invalid)
            .field("transform", &self.transform.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// Public data of a field, stripped of its callbacks.
///
/// Always a detached copy: changing it never touches the collection it
/// was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    pub name: String,
    pub value: Value,
    pub error: String,
    pub dirty: bool,
    pub invalid: bool,
    pub initial_value: Value,
}

/// Ordered, immutable sequence of field records.
///
/// Clones share the same allocation, so [`FieldCollection::ptr_eq`] tells
/// whether a transition produced a new collection or handed back the old one.
#[derive(Clone, Default)]
pub struct FieldCollection(Arc<[FieldRecord]>);

impl FieldCollection {
    /// True when both handles point at the same collection.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Find a record by name. First match wins.
    pub fn find(&self, name: &str) -> Result<&FieldRecord> {
        find(&self.0, name)
    }

    /// Public data of every record, in collection order.
    pub fn to_data(&self) -> Vec<FieldData> {
        self.0.iter().map(crate::store::project).collect()
    }
}

impl Deref for FieldCollection {
    type Target = [FieldRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FieldRecord>> for FieldCollection {
    fn from(records: Vec<FieldRecord>) -> Self {
        Self(records.into())
    }
}

impl FromIterator<FieldRecord> for FieldCollection {
    fn from_iter<I: IntoIterator<Item = FieldRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a FieldRecord;
    type IntoIter = std::slice::Iter<'a, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for FieldCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Linear scan by name over any slice of records.
pub fn find<'a>(records: &'a [FieldRecord], name: &str) -> Result<&'a FieldRecord> {
    records
        .iter()
        .find(|record| record.name == name)
        .ok_or_else(|| FieldsError::field_not_found(name))
}

/// Index of the first record with the given name.
pub fn position(records: &[FieldRecord], name: &str) -> Result<usize> {
    records
        .iter()
        .position(|record| record.name == name)
        .ok_or_else(|| FieldsError::field_not_found(name))
}
