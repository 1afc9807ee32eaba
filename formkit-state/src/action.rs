//! Reducer actions

use std::fmt;

use formkit_fields::Value;
use serde::{Deserialize, Serialize};

/// Callback told whether VALIDATE_ALL found at least one error.
pub type ValidatedCallback<'a> = Box<dyn FnOnce(bool) + 'a>;

/// The fixed set of transitions the reducer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Reset,
    SetFieldValue,
    SetFieldError,
    ValidateField,
    ValidateAll,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reset => "RESET",
            Self::SetFieldValue => "SET_FIELD_VALUE",
            Self::SetFieldError => "SET_FIELD_ERROR",
            Self::ValidateField => "VALIDATE_FIELD",
            Self::ValidateAll => "VALIDATE_ALL",
        };
        f.write_str(name)
    }
}

/// A request to transition the field collection.
///
/// Every part is optional so callers can dispatch conditionally without
/// guarding each call: an action missing what its kind needs leaves the
/// state untouched. `data: None` is "no data", distinct from `Some(Value::Null)`.
#[derive(Default)]
pub struct Action<'a> {
    pub kind: Option<ActionKind>,
    pub field_name: Option<String>,
    pub data: Option<Value>,
    pub on_validated: Option<ValidatedCallback<'a>>,
}

impl<'a> Action<'a> {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn reset() -> Self {
        Self::new(ActionKind::Reset)
    }

    pub fn set_field_value(field_name: impl Into<String>, data: impl Into<Value>) -> Self {
        Self::new(ActionKind::SetFieldValue)
            .with_field_name(field_name)
            .with_data(data)
    }

    pub fn set_field_error(field_name: impl Into<String>, error: impl Into<Value>) -> Self {
        Self::new(ActionKind::SetFieldError)
            .with_field_name(field_name)
            .with_data(error)
    }

    /// SET_FIELD_ERROR with no data, which clears the error.
    pub fn clear_field_error(field_name: impl Into<String>) -> Self {
        Self::new(ActionKind::SetFieldError).with_field_name(field_name)
    }

    pub fn validate_field(field_name: impl Into<String>) -> Self {
        Self::new(ActionKind::ValidateField).with_field_name(field_name)
    }

    pub fn validate_all() -> Self {
        Self::new(ActionKind::ValidateAll)
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Register the VALIDATE_ALL outcome callback
    pub fn on_validated(mut self, callback: impl FnOnce(bool) + 'a) -> Self {
        self.on_validated = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind)
            .field("field_name", &self.field_name)
            .field("data", &self.data)
            .field("on_validated", &self.on_validated.is_some())
            .finish()
    }
}
