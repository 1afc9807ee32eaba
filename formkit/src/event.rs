//! Input and submit events coming from a rendering layer.

use formkit_fields::Value;

/// Kind of input element that raised a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Checkbox,
    Radio,
    Other(String),
}

impl From<&str> for InputKind {
    fn from(kind: &str) -> Self {
        match kind {
            "" | "text" => Self::Text,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A change event from an input element.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
}

impl InputEvent {
    pub fn new(kind: impl Into<InputKind>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            checked,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(InputKind::Text, value, false)
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new(InputKind::Checkbox, "on", checked)
    }

    pub fn radio(checked: bool) -> Self {
        Self::new(InputKind::Radio, "on", checked)
    }

    /// The field data this event carries: the checked flag for checkboxes
    /// and radios, the text value otherwise.
    pub fn data(&self) -> Value {
        match self.kind {
            InputKind::Checkbox | InputKind::Radio => Value::Bool(self.checked),
            InputKind::Text | InputKind::Other(_) => Value::String(self.value.clone()),
        }
    }
}

/// A form submit event.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
