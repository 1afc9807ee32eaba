//! Per-field validation protocol.

use formkit_fields::{FieldRecord, Result, ValidationContext};
use tracing::trace;

/// Error used when a validator fails without setting its own message.
pub const DEFAULT_ERROR: &str = "Invalid value";

/// Run the record's validator against `fields` and return its error.
///
/// An empty string means valid. A custom error set through the context
/// always wins, even over a passing verdict.
pub fn get_error(record: &FieldRecord, fields: &[FieldRecord]) -> Result<String> {
    let Some(validate) = record.validator() else {
        return Ok(String::new());
    };

    let mut ctx = ValidationContext::new(record.value(), fields);
    let valid = validate(&mut ctx)?;

    let error = match ctx.into_custom_error() {
        Some(custom) => custom,
        None if valid => String::new(),
        None => DEFAULT_ERROR.to_string(),
    };
    trace!(field = %record.name(), %error, "field validated");
    Ok(error)
}
