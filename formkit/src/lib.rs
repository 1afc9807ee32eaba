//! Form handles over the formkit reducer
//!
//! Ties the pure reducer from `formkit-state` to something a rendering layer
//! can drive: a [`FormStore`] that owns the current collection, a [`Form`]
//! with per-field [`FieldHandle`]s, and adapters for change and submit events.
//!
//! ```
//! use std::rc::Rc;
//! use formkit::{FieldDeclaration, FormOptions, FormStore, InputEvent};
//!
//! let store = FormStore::new(&[FieldDeclaration::new("fullName")
//!     .with_validate(|ctx| ctx.value().as_str().is_some_and(|s| !s.is_empty()))])?;
//! let options = Rc::new(FormOptions::new().on_submit(|data| {
//!     assert_eq!(data.get_value("fullName").unwrap(), "Ada");
//! }));
//!
//! store.form(&options).fields[0].handle_change(&InputEvent::text("Ada"))?;
//! assert!(store.form(&options).submit()?);
//! # Ok::<(), formkit::FieldsError>(())
//! ```

pub mod event;
pub mod options;
pub mod store;
pub mod usable;

pub use event::{InputEvent, InputKind, SubmitEvent};
pub use options::{FormOptions, SubmitCallback};
pub use store::{Dispatch, FormStore};
pub use usable::{FieldHandle, Form};

pub use formkit_fields::{
    declarations_from_json, declarations_from_yaml, FieldData, FieldDeclaration, FieldsError,
    Result, ValidationContext, Value,
};
pub use formkit_state::{Action, ActionKind, FormData, NameValue};
