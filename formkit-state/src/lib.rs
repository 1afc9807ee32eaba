//! Reducer and validation engine for declarative form state
//!
//! The external caller holds the current [`FieldCollection`] and feeds it,
//! together with an [`Action`], through [`reduce`]. The reducer is the single
//! place where business rules run: value transforms, validators, dirty and
//! invalid bookkeeping.
//!
//! ```
//! use formkit_state::{initialize, reduce, Action, FieldDeclaration};
//!
//! let state = initialize(&[FieldDeclaration::new("age")
//!     .with_value(20)
//!     .with_validate(|ctx| ctx.value().as_i64().is_some_and(|age| age < 30))])?;
//!
//! let state = reduce(&state, Action::set_field_value("age", 40))?;
//! assert_eq!(state[0].error(), "Invalid value");
//! # Ok::<(), formkit_state::FieldsError>(())
//! ```

pub mod action;
pub mod form_data;
pub mod reducer;
pub mod validation;

pub use action::{Action, ActionKind, ValidatedCallback};
pub use form_data::{FormData, NameValue};
pub use reducer::{find, reduce};
pub use validation::{get_error, DEFAULT_ERROR};

pub use formkit_fields::{
    initialize, FieldCollection, FieldData, FieldDeclaration, FieldRecord, FieldsError, Result,
    ValidationContext, Value,
};
