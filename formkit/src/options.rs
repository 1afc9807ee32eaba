//! Form-level options

use std::fmt;

use formkit_state::FormData;

/// Called with the form values once a submit passes validation.
pub type SubmitCallback = Box<dyn Fn(FormData)>;

/// Options shared by every [`Form`](crate::Form) built from a store.
#[derive(Default)]
pub struct FormOptions {
    submit: Option<SubmitCallback>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submit callback
    pub fn on_submit(mut self, submit: impl Fn(FormData) + 'static) -> Self {
        self.submit = Some(Box::new(submit));
        self
    }

    pub fn submit_callback(&self) -> Option<&SubmitCallback> {
        self.submit.as_ref()
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("submit", &self.submit.is_some())
            .finish()
    }
}
