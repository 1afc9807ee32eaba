//! Field declarations: the caller-supplied definition of each field.
//!
//! Declarations can be built in code or loaded from a YAML/JSON list.
//! Loaded declarations carry only `name` and `value`; keys such as
//! `transform` or `validate` are ignored since no callable can be read
//! from a document. Attach callbacks with [`FieldDeclaration::with_transform`]
//! and [`FieldDeclaration::with_validate`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};
use crate::types::{empty_value, TransformFn, ValidateFn, Value};
use crate::validation::{ValidationContext, Verdict};

const NOT_A_LIST: &str = "invalid argument type, must be an array";

/// Initial definition of one form field.
#[derive(Clone, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Required and unique within a form. Empty counts as missing.
    #[serde(default)]
    pub name: String,
    #[serde(default = "empty_value")]
    pub value: Value,
    #[serde(skip)]
    pub(crate) transform: Option<TransformFn>,
    #[serde(skip)]
    pub(crate) validate: Option<ValidateFn>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the initial value
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the transform applied to every new value
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value, &Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Set the validator run after every value change and on explicit validation
    pub fn with_validate<F, V>(mut self, validate: F) -> Self
    where
        F: Fn(&mut ValidationContext<'_>) -> V + Send + Sync + 'static,
        V: Verdict,
    {
        self.validate = Some(Arc::new(move |ctx: &mut ValidationContext<'_>| {
            validate(ctx).into_verdict()
        }));
        self
    }
}

impl Default for FieldDeclaration {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: empty_value(),
            transform: None,
            validate: None,
        }
    }
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("transform", &self.transform.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// Parse a YAML sequence of declarations.
pub fn declarations_from_yaml(source: &str) -> Result<Vec<FieldDeclaration>> {
    let doc: serde_yaml_ng::Value = serde_yaml_ng::from_str(source)?;
    if !doc.is_sequence() {
        return Err(FieldsError::invalid_argument(NOT_A_LIST));
    }
    Ok(serde_yaml_ng::from_value(doc)?)
}

/// Parse a JSON array of declarations.
pub fn declarations_from_json(source: &str) -> Result<Vec<FieldDeclaration>> {
    let doc: serde_json::Value = serde_json::from_str(source)?;
    if !doc.is_array() {
        return Err(FieldsError::invalid_argument(NOT_A_LIST));
    }
    Ok(serde_json::from_value(doc)?)
}
