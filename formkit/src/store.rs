//! State container that owns the current field collection.
//!
//! The reducer is pure; something has to hold the latest collection and
//! replace it after every dispatch. [`FormStore`] is that holder for a
//! single thread. Handles talk to it through the [`Dispatch`] trait so other
//! containers can stand in for it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formkit_fields::{initialize, FieldCollection, FieldDeclaration, Result};
use formkit_state::{reduce, Action};
use tracing::trace;

use crate::options::FormOptions;
use crate::usable::Form;

/// Something that accepts actions for a field collection.
pub trait Dispatch {
    fn dispatch(&self, action: Action<'_>) -> Result<()>;

    /// The collection as of the last dispatch.
    fn state(&self) -> FieldCollection;
}

/// Single-threaded holder of the current field collection.
#[derive(Debug)]
pub struct FormStore {
    state: RefCell<FieldCollection>,
    revision: Cell<u64>,
}

impl FormStore {
    /// Initialize a store from declarations.
    pub fn new(declarations: &[FieldDeclaration]) -> Result<Rc<Self>> {
        Ok(Self::from_state(initialize(declarations)?))
    }

    /// Wrap an existing collection.
    pub fn from_state(state: FieldCollection) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(state),
            revision: Cell::new(0),
        })
    }

    /// The current collection.
    pub fn state(&self) -> FieldCollection {
        self.state.borrow().clone()
    }

    /// Number of dispatches that replaced the collection.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Build a form handle over the current collection.
    pub fn form(self: &Rc<Self>, options: &Rc<FormOptions>) -> Form {
        let dispatcher: Rc<dyn Dispatch> = self.clone();
        Form::new(&self.state(), dispatcher, options.clone())
    }
}

impl Dispatch for FormStore {
    fn dispatch(&self, action: Action<'_>) -> Result<()> {
        let Action {
            kind,
            field_name,
            data,
            on_validated,
        } = action;

        // The caller's callback runs after the commit so it may dispatch again.
        let outcome = Cell::new(None);
        let mut staged = Action {
            kind,
            field_name,
            data,
            on_validated: None,
        };
        if on_validated.is_some() {
            staged = staged.on_validated(|found| outcome.set(Some(found)));
        }

        let current = FormStore::state(self);
        let next = reduce(&current, staged)?;

        if next.ptr_eq(&current) {
            trace!(?kind, "dispatch left state unchanged");
        } else {
            *self.state.borrow_mut() = next;
            self.revision.set(self.revision.get() + 1);
            trace!(?kind, revision = self.revision.get(), "state replaced");
        }

        if let (Some(callback), Some(found)) = (on_validated, outcome.get()) {
            callback(found);
        }
        Ok(())
    }

    fn state(&self) -> FieldCollection {
        FormStore::state(self)
    }
}
