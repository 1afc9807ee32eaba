//! Read-only view of field values handed to submit callbacks.

use formkit_fields::{FieldCollection, Result, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// A field name with its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: Value,
}

/// Values of a field collection at submit time.
///
/// Serializes as a `{name: value}` object.
#[derive(Debug, Clone)]
pub struct FormData {
    fields: FieldCollection,
}

impl FormData {
    pub fn new(state: &FieldCollection) -> Self {
        Self {
            fields: state.clone(),
        }
    }

    /// Value of the named field.
    pub fn get_value(&self, name: &str) -> Result<&Value> {
        self.fields.find(name).map(|record| record.value())
    }

    /// `{name, value}` pairs in collection order.
    pub fn get_fields(&self) -> Vec<NameValue> {
        self.fields
            .iter()
            .map(|record| NameValue {
                name: record.name().to_string(),
                value: record.value().clone(),
            })
            .collect()
    }

    /// Name to value mapping. A repeated name keeps its first position and
    /// its last value.
    pub fn get_object(&self) -> IndexMap<String, Value> {
        let mut object = IndexMap::with_capacity(self.fields.len());
        for record in self.fields.iter() {
            object.insert(record.name().to_string(), record.value().clone());
        }
        object
    }
}

impl Serialize for FormData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(&self.get_object())
    }
}
