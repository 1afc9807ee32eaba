//! The pure state-transition function.
//!
//! [`reduce`] never mutates the collection it is given. Mutating actions
//! clone every record into a new collection; VALIDATE_ALL hands back the
//! input collection itself when no field has an error so callers can skip
//! change propagation by comparing with [`FieldCollection::ptr_eq`].

use formkit_fields::{position, reset, FieldCollection, FieldRecord, Result, Value};
use tracing::{debug, trace};

use crate::action::{Action, ActionKind, ValidatedCallback};
use crate::validation::get_error;

/// Find a field by name in a collection.
pub fn find<'a>(state: &'a FieldCollection, name: &str) -> Result<&'a FieldRecord> {
    state.find(name)
}

/// Apply `action` to `state` and return the resulting collection.
///
/// Fails only when a named field does not exist, or when a validator
/// propagates a lookup failure.
pub fn reduce(state: &FieldCollection, action: Action<'_>) -> Result<FieldCollection> {
    let Action {
        kind,
        field_name,
        data,
        on_validated,
    } = action;

    let Some(kind) = kind else {
        trace!("action without kind, state unchanged");
        return Ok(state.clone());
    };

    match kind {
        ActionKind::Reset => {
            trace!(%kind, "resetting all fields");
            return Ok(state.iter().map(reset).collect());
        }
        ActionKind::ValidateAll => return validate_all(state, on_validated),
        _ => {}
    }

    let Some(field_name) = field_name.filter(|name| !name.is_empty()) else {
        trace!(%kind, "action without field name, state unchanged");
        return Ok(state.clone());
    };
    trace!(%kind, field = %field_name, "applying action");

    match kind {
        ActionKind::SetFieldValue => match data {
            Some(data) => set_field_value(state, &field_name, data),
            None => {
                trace!(field = %field_name, "no data for value change, state unchanged");
                Ok(state.clone())
            }
        },
        ActionKind::SetFieldError => set_field_error(state, &field_name, data),
        ActionKind::ValidateField => validate_field(state, &field_name),
        ActionKind::Reset | ActionKind::ValidateAll => Ok(state.clone()),
    }
}

fn validate_all(
    state: &FieldCollection,
    on_validated: Option<ValidatedCallback<'_>>,
) -> Result<FieldCollection> {
    let mut has_error = false;
    let mut validated = Vec::with_capacity(state.len());
    for record in state.iter() {
        // Every field sees the pre-transition snapshot.
        let error = get_error(record, state)?;
        has_error |= !error.is_empty();
        let mut next = record.clone();
        next.assign_error(error);
        validated.push(next);
    }

    if let Some(callback) = on_validated {
        callback(has_error);
    }

    if has_error {
        debug!(
            invalid = validated.iter().filter(|r| r.invalid()).count(),
            "validation found errors"
        );
        Ok(validated.into())
    } else {
        debug!(fields = state.len(), "all fields valid, state unchanged");
        Ok(state.clone())
    }
}

fn set_field_value(state: &FieldCollection, name: &str, data: Value) -> Result<FieldCollection> {
    let mut records = state.to_vec();
    let index = position(&records, name)?;

    let record = &mut records[index];
    let next = match record.transform() {
        Some(transform) => transform(data, record.value()),
        None => data,
    };
    record.assign_value(next);

    // Validate against the new records: this field's new value, everyone else's old one.
    let error = get_error(&records[index], &records)?;
    records[index].assign_error(error);
    Ok(records.into())
}

fn set_field_error(
    state: &FieldCollection,
    name: &str,
    data: Option<Value>,
) -> Result<FieldCollection> {
    let mut records = state.to_vec();
    let index = position(&records, name)?;
    records[index].assign_error(error_text(data));
    Ok(records.into())
}

fn validate_field(state: &FieldCollection, name: &str) -> Result<FieldCollection> {
    let mut records = state.to_vec();
    let index = position(&records, name)?;
    let error = get_error(&records[index], &records)?;
    records[index].assign_error(error);
    Ok(records.into())
}

/// Falsy data clears the error; strings are used as-is, anything else as JSON text.
fn error_text(data: Option<Value>) -> String {
    match data {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DEFAULT_ERROR;
    use formkit_fields::{initialize, project, FieldDeclaration, FieldsError};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn single(value: impl Into<Value>) -> FieldCollection {
        initialize(&[FieldDeclaration::new("myNumber").with_value(value)]).unwrap()
    }

    /// Second field fails when the product of both values exceeds 50, and
    /// tries to overwrite the peeked copy of the first field.
    fn product_guard() -> FieldDeclaration {
        FieldDeclaration::new("secondNumber")
            .with_value(20)
            .with_validate(|ctx| {
                let mut first = ctx.get_field("firstNumber")?;
                let product = first.value.as_i64().unwrap_or(0)
                    * ctx.value().as_i64().unwrap_or(0);
                if product > 50 {
                    ctx.set_error("NUMBER_TOO_BIG");
                }
                first.value = json!(5);
                Ok::<Option<bool>, FieldsError>(None)
            })
    }

    #[test_log::test]
    fn unknown_field_name_errors() {
        let state = single(20);
        let err = reduce(&state, Action::set_field_value("wrongName", "")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no field found with the name: 'wrongName'"
        );
    }

    #[test_log::test]
    fn incomplete_actions_return_same_state() {
        let state = single(20);

        let next = reduce(&state, Action::default()).unwrap();
        assert!(next.ptr_eq(&state));

        let next = reduce(&state, Action::default().with_field_name("myNumber")).unwrap();
        assert!(next.ptr_eq(&state));

        let next = reduce(
            &state,
            Action::new(ActionKind::SetFieldValue).with_field_name(""),
        )
        .unwrap();
        assert!(next.ptr_eq(&state));

        let next = reduce(
            &state,
            Action::new(ActionKind::SetFieldValue).with_field_name("myNumber"),
        )
        .unwrap();
        assert!(next.ptr_eq(&state));
    }

    #[test_log::test]
    fn null_data_still_builds_new_state() {
        let state = single(20);
        let next = reduce(&state, Action::set_field_value("myNumber", Value::Null)).unwrap();
        assert!(!next.ptr_eq(&state));
        assert_eq!(next[0].value(), &Value::Null);
        assert!(next[0].dirty());
    }

    #[test_log::test]
    fn reset_restores_initial_values() {
        let state = single(20);
        let changed = reduce(&state, Action::set_field_value("myNumber", 50)).unwrap();
        let changed = reduce(&changed, Action::set_field_error("myNumber", "bad")).unwrap();

        let next = reduce(&changed, Action::reset()).unwrap();
        assert!(!next.ptr_eq(&changed));
        assert_eq!(project(&next[0]), project(&state[0]));
    }

    #[test_log::test]
    fn reset_retains_transform() {
        let state = initialize(&[FieldDeclaration::new("myNumber")
            .with_value(20)
            .with_transform(|next, _| json!(next.as_i64().unwrap_or(0) + 1))])
        .unwrap();
        let next = reduce(&state, Action::reset()).unwrap();
        let transform = next[0].transform().unwrap();
        assert_eq!(transform(json!(20), &json!(0)), json!(21));
    }

    #[test_log::test]
    fn reset_retains_validator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let state = initialize(&[FieldDeclaration::new("age")
            .with_value(20)
            .with_validate(move |ctx| {
                seen.fetch_add(1, Ordering::SeqCst);
                ctx.value().as_i64().is_some_and(|age| age < 30)
            })])
        .unwrap();

        let next = reduce(&state, Action::reset()).unwrap();
        assert!(next[0].validator().is_some());

        let next = reduce(&next, Action::set_field_value("age", 40)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(next[0].error(), DEFAULT_ERROR);
    }

    #[test_log::test]
    fn set_value_updates_value_and_dirty() {
        let state = single(20);
        let next = reduce(&state, Action::set_field_value("myNumber", 30)).unwrap();
        assert_eq!(next[0].value(), &json!(30));
        assert!(next[0].dirty());
        assert_eq!(state[0].value(), &json!(20));

        let back = reduce(&next, Action::set_field_value("myNumber", 20)).unwrap();
        assert!(!back[0].dirty());
    }

    #[test_log::test]
    fn set_value_touches_only_target_field() {
        let state = initialize(&[
            FieldDeclaration::new("name"),
            FieldDeclaration::new("age").with_value(30),
        ])
        .unwrap();

        let state2 = reduce(&state, Action::set_field_value("name", "Daniel")).unwrap();
        let state3 = reduce(&state2, Action::set_field_value("age", 40)).unwrap();

        assert_eq!(state[0].value(), &json!(""));
        assert_eq!(state[1].value(), &json!(30));
        assert_eq!(state2[0].value(), &json!("Daniel"));
        assert_eq!(state2[1].value(), &json!(30));
        assert_eq!(state3[0].value(), &json!("Daniel"));
        assert_eq!(state3[1].value(), &json!(40));
        assert_eq!(project(&state[1]), project(&state2[1]));
    }

    #[test_log::test]
    fn transform_receives_new_and_previous_values() {
        let state = initialize(&[FieldDeclaration::new("text")
            .with_value("a")
            .with_transform(|next, prev| {
                json!(format!("{}{}", prev.as_str().unwrap_or(""), next.as_str().unwrap_or("")))
            })])
        .unwrap();

        let state2 = reduce(&state, Action::set_field_value("text", "test1")).unwrap();
        assert_eq!(state2[0].value(), &json!("atest1"));

        let state3 = reduce(&state2, Action::set_field_value("text", "test2")).unwrap();
        assert_eq!(state3[0].value(), &json!("atest1test2"));
        assert!(state3[0].dirty());
    }

    #[test_log::test]
    fn set_value_runs_validator_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let state = initialize(&[FieldDeclaration::new("f").with_validate(move |ctx| {
            seen.fetch_add(1, Ordering::SeqCst);
            ctx.value() == &json!("test1")
        })])
        .unwrap();

        let next = reduce(&state, Action::set_field_value("f", "test1")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!next[0].invalid());
    }

    #[test_log::test]
    fn validator_sees_own_new_value_through_lookup() {
        let state = initialize(&[FieldDeclaration::new("age")
            .with_value(20)
            .with_validate(|ctx| {
                let own = ctx.get_field("age")?;
                Ok::<bool, FieldsError>(&own.value == ctx.value() && own.dirty)
            })])
        .unwrap();

        let next = reduce(&state, Action::set_field_value("age", 40)).unwrap();
        assert_eq!(next[0].error(), "");
        assert!(!next[0].invalid());
    }

    #[test_log::test]
    fn existing_error_is_cleared_on_value_change() {
        let state = initialize(&[FieldDeclaration::new("f").with_validate(|_| true)]).unwrap();
        let state = reduce(&state, Action::set_field_error("f", "stale")).unwrap();
        assert!(state[0].invalid());

        let next = reduce(&state, Action::set_field_value("f", "test1")).unwrap();
        assert_eq!(next[0].error(), "");
        assert!(!next[0].invalid());
    }

    #[test_log::test]
    fn default_error_when_validator_fails() {
        let state = initialize(&[FieldDeclaration::new("age")
            .with_value(20)
            .with_validate(|ctx| ctx.value().as_i64().is_some_and(|age| age < 30))])
        .unwrap();
        let next = reduce(&state, Action::set_field_value("age", 40)).unwrap();
        assert_eq!(next[0].error(), DEFAULT_ERROR);
        assert!(next[0].invalid());
    }

    #[test_log::test]
    fn set_error_updates_only_target() {
        let state = initialize(&[
            FieldDeclaration::new("f1"),
            FieldDeclaration::new("f2"),
        ])
        .unwrap();
        let next = reduce(&state, Action::set_field_error("f2", "This is an error")).unwrap();
        assert_eq!(next[0].error(), "");
        assert!(!next[0].invalid());
        assert_eq!(next[1].error(), "This is an error");
        assert!(next[1].invalid());
    }

    #[test_log::test]
    fn set_error_without_data_clears_error() {
        let state = single(20);
        let state = reduce(&state, Action::set_field_error("myNumber", "bad")).unwrap();
        let next = reduce(&state, Action::clear_field_error("myNumber")).unwrap();
        assert!(!next.ptr_eq(&state));
        assert_eq!(next[0].error(), "");
        assert!(!next[0].invalid());
    }

    #[test_log::test]
    fn set_error_does_not_run_validator() {
        let state = initialize(&[FieldDeclaration::new("f").with_validate(|_| false)]).unwrap();
        let next = reduce(&state, Action::set_field_error("f", Value::Null)).unwrap();
        assert_eq!(next[0].error(), "");
    }

    #[test]
    fn error_text_coercion() {
        assert_eq!(error_text(None), "");
        assert_eq!(error_text(Some(Value::Null)), "");
        assert_eq!(error_text(Some(json!(false))), "");
        assert_eq!(error_text(Some(json!("oops"))), "oops");
        assert_eq!(error_text(Some(json!(42))), "42");
    }

    #[test_log::test]
    fn validate_field_keeps_value() {
        let state = initialize(&[FieldDeclaration::new("f")
            .with_value("v1")
            .with_validate(|ctx| ctx.set_error("F1_ERROR"))])
        .unwrap();
        let next = reduce(&state, Action::validate_field("f")).unwrap();
        assert!(!next.ptr_eq(&state));
        assert_eq!(next[0].value(), &json!("v1"));
        assert!(!next[0].dirty());
        assert_eq!(next[0].error(), "F1_ERROR");
    }

    #[test_log::test]
    fn cross_field_validator_reads_snapshot() {
        let state = initialize(&[
            FieldDeclaration::new("firstNumber").with_value(20),
            product_guard(),
        ])
        .unwrap();

        let next = reduce(&state, Action::set_field_value("secondNumber", 3)).unwrap();

        assert_eq!(next[0].value(), &json!(20));
        assert!(!next[0].dirty());
        assert!(!next[0].invalid());
        assert_eq!(next[1].value(), &json!(3));
        assert!(next[1].dirty());
        assert_eq!(next[1].error(), "NUMBER_TOO_BIG");
    }

    #[test_log::test]
    fn validate_all_reports_every_field() {
        let state = initialize(&[
            FieldDeclaration::new("firstNumber")
                .with_value(40)
                .with_validate(|ctx| ctx.value().as_i64().is_some_and(|n| n < 30)),
            product_guard(),
        ])
        .unwrap();

        let mut reported = None;
        let next = reduce(
            &state,
            Action::validate_all().on_validated(|has_error| reported = Some(has_error)),
        )
        .unwrap();

        assert_eq!(reported, Some(true));
        assert!(!next.ptr_eq(&state));
        assert_eq!(next[0].error(), DEFAULT_ERROR);
        assert_eq!(next[1].error(), "NUMBER_TOO_BIG");
        assert_eq!(next[1].value(), &json!(20));
    }

    #[test_log::test]
    fn validate_all_without_errors_returns_same_state() {
        let state = initialize(&[
            FieldDeclaration::new("a").with_validate(|_| true),
            FieldDeclaration::new("b"),
        ])
        .unwrap();

        let mut reported = None;
        let next = reduce(
            &state,
            Action::validate_all().on_validated(|has_error| reported = Some(has_error)),
        )
        .unwrap();

        assert_eq!(reported, Some(false));
        assert!(next.ptr_eq(&state));
    }

    #[test_log::test]
    fn validate_all_without_callback() {
        let state = initialize(&[FieldDeclaration::new("a").with_validate(|_| false)]).unwrap();
        let next = reduce(&state, Action::validate_all()).unwrap();
        assert!(next[0].invalid());
    }

    #[test_log::test]
    fn validate_all_observes_pre_transition_errors() {
        // "b" reads "a" while "a" gains an error in the same pass.
        let state = initialize(&[
            FieldDeclaration::new("a").with_validate(|_| false),
            FieldDeclaration::new("b").with_validate(|ctx| {
                let a = ctx.get_field("a")?;
                Ok::<bool, FieldsError>(!a.invalid)
            }),
        ])
        .unwrap();

        let next = reduce(&state, Action::validate_all()).unwrap();
        assert!(next[0].invalid());
        assert!(!next[1].invalid());
    }
}
