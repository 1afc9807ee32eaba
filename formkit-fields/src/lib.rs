//! Field store for declarative form state
//!
//! `formkit-fields` owns the shape of a form field and the primitives the
//! reducer builds on. It knows nothing about actions or dispatch.
//!
//! # Architecture
//!
//! - **Declarations in, records out**: [`initialize`] turns an ordered list of
//!   [`FieldDeclaration`]s into a [`FieldCollection`] of [`FieldRecord`]s
//! - **Copy-on-write**: records are cloned into new collections, never mutated in place
//! - **Detached reads**: [`project`] and [`ValidationContext::get_field`] hand out
//!   owned [`FieldData`] copies

pub mod declaration;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use declaration::{declarations_from_json, declarations_from_yaml, FieldDeclaration};
pub use error::{FieldsError, Result};
pub use store::{construct, initialize, initialize_from_yaml, project, reset};
pub use types::{
    empty_value, find, position, FieldCollection, FieldData, FieldRecord, TransformFn,
    ValidateFn, Value,
};
pub use validation::{ValidationContext, Verdict};
