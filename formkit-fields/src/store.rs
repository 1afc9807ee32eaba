//! Field store primitives: construction, reset and projection.

use tracing::debug;

use crate::declaration::FieldDeclaration;
use crate::error::{FieldsError, Result};
use crate::types::{FieldCollection, FieldData, FieldRecord};

/// Build a record from the declaration at `index` of its list.
pub fn construct(index: usize, declaration: &FieldDeclaration) -> Result<FieldRecord> {
    if declaration.name.is_empty() {
        return Err(FieldsError::invalid_argument(format!(
            "name missing for the field at index {index}"
        )));
    }

    Ok(FieldRecord {
        name: declaration.name.clone(),
        value: declaration.value.clone(),
        initial_value: declaration.value.clone(),
        dirty: false,
        error: String::new(),
        invalid: false,
        transform: declaration.transform.clone(),
        validate: declaration.validate.clone(),
    })
}

/// Build the initial collection, preserving declaration order.
pub fn initialize(declarations: &[FieldDeclaration]) -> Result<FieldCollection> {
    let records = declarations
        .iter()
        .enumerate()
        .map(|(index, declaration)| construct(index, declaration))
        .collect::<Result<Vec<_>>>()?;

    debug!(fields = records.len(), "fields initialized");
    Ok(records.into())
}

/// Load declarations from YAML and initialize them.
pub fn initialize_from_yaml(source: &str) -> Result<FieldCollection> {
    initialize(&crate::declarations_from_yaml(source)?)
}

/// Return the record to its initial state, keeping its callbacks.
pub fn reset(record: &FieldRecord) -> FieldRecord {
    FieldRecord {
        name: record.name.clone(),
        value: record.initial_value.clone(),
        initial_value: record.initial_value.clone(),
        dirty: false,
        error: String::new(),
        invalid: false,
        transform: record.transform.clone(),
        validate: record.validate.clone(),
    }
}

/// Public data of a record, without callbacks.
pub fn project(record: &FieldRecord) -> FieldData {
    FieldData {
        name: record.name.clone(),
        value: record.value.clone(),
        error: record.error.clone(),
        dirty: record.dirty,
        invalid: record.invalid,
        initial_value: record.initial_value.clone(),
    }
}
