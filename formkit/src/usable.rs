//! Handles a rendering layer works with.
//!
//! A [`Form`] is a snapshot: its field data and `is_dirty`/`is_invalid`
//! flags are taken when it is built. Actions go through the dispatcher, so
//! rebuild the form after dispatching to observe the new state.

use std::fmt;
use std::rc::Rc;

use formkit_fields::{project, FieldCollection, FieldData, Result, Value};
use formkit_state::{Action, FormData};
use tracing::debug;

use crate::event::{InputEvent, SubmitEvent};
use crate::options::FormOptions;
use crate::store::Dispatch;

/// One field's data plus callbacks bound to its name.
pub struct FieldHandle {
    data: FieldData,
    dispatcher: Rc<dyn Dispatch>,
}

impl FieldHandle {
    pub fn new(data: FieldData, dispatcher: Rc<dyn Dispatch>) -> Self {
        Self { data, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn value(&self) -> &Value {
        &self.data.value
    }

    pub fn initial_value(&self) -> &Value {
        &self.data.initial_value
    }

    pub fn error(&self) -> &str {
        &self.data.error
    }

    pub fn dirty(&self) -> bool {
        self.data.dirty
    }

    pub fn invalid(&self) -> bool {
        self.data.invalid
    }

    /// The field's public data.
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    pub fn set_value(&self, value: impl Into<Value>) -> Result<()> {
        self.dispatcher
            .dispatch(Action::set_field_value(self.name(), value))
    }

    pub fn set_error(&self, error: impl Into<Value>) -> Result<()> {
        self.dispatcher
            .dispatch(Action::set_field_error(self.name(), error))
    }

    pub fn validate(&self) -> Result<()> {
        self.dispatcher.dispatch(Action::validate_field(self.name()))
    }

    /// Change handler for the field's input element.
    pub fn handle_change(&self, event: &InputEvent) -> Result<()> {
        self.set_value(event.data())
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldHandle").field(&self.data).finish()
    }
}

/// Form-level view over a field collection.
pub struct Form {
    pub fields: Vec<FieldHandle>,
    pub is_dirty: bool,
    pub is_invalid: bool,
    dispatcher: Rc<dyn Dispatch>,
    options: Rc<FormOptions>,
}

impl Form {
    pub fn new(
        state: &FieldCollection,
        dispatcher: Rc<dyn Dispatch>,
        options: Rc<FormOptions>,
    ) -> Self {
        let mut is_dirty = false;
        let mut is_invalid = false;
        let fields = state
            .iter()
            .map(|record| {
                is_dirty |= record.dirty();
                is_invalid |= record.invalid();
                FieldHandle::new(project(record), dispatcher.clone())
            })
            .collect();

        Self {
            fields,
            is_dirty,
            is_invalid,
            dispatcher,
            options,
        }
    }

    /// Handle of the first field with this name.
    pub fn field(&self, name: &str) -> Option<&FieldHandle> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn set_field_value(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.dispatcher
            .dispatch(Action::set_field_value(name, value))
    }

    pub fn set_field_error(&self, name: &str, error: impl Into<Value>) -> Result<()> {
        self.dispatcher
            .dispatch(Action::set_field_error(name, error))
    }

    pub fn reset(&self) -> Result<()> {
        self.dispatcher.dispatch(Action::reset())
    }

    /// Validate every field. Returns whether any field has an error.
    pub fn validate(&self) -> Result<bool> {
        let mut has_error = false;
        self.dispatcher
            .dispatch(Action::validate_all().on_validated(|found| has_error = found))?;
        Ok(has_error)
    }

    /// Validate every field and, when all pass, hand the values to the
    /// submit callback. Returns whether the callback ran.
    pub fn submit(&self) -> Result<bool> {
        if self.validate()? {
            debug!("submit blocked by invalid fields");
            return Ok(false);
        }

        let Some(submit) = self.options.submit_callback() else {
            debug!("form valid, no submit callback");
            return Ok(false);
        };

        // The dispatcher may have moved on since this form was built.
        let state = self.dispatcher.state();
        submit(FormData::new(&state));
        debug!(fields = state.len(), "form submitted");
        Ok(true)
    }

    /// Submit handler: suppresses the default action, then submits.
    pub fn handle_submit(&self, event: &mut SubmitEvent) -> Result<bool> {
        event.prevent_default();
        self.submit()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("is_dirty", &self.is_dirty)
            .field("is_invalid", &self.is_invalid)
            .field("options", &self.options)
            .finish()
    }
}
