use std::collections::BTreeMap;
use std::sync::Arc;

use kana_entry::errors::FormError;
use kana_entry::form::{
    FieldDescriptor, FieldKind, FormDescriptor, FormEngine, FormField, FormState, KindValidator,
    ValidationResult,
};
use kana_entry::schema::full_width_transform;

fn no_errors(_: &FormState) -> ValidationResult {
    BTreeMap::new()
}

fn text_form(keys: &[&'static str]) -> FormDescriptor {
    FormDescriptor::new(
        "test",
        keys.iter()
            .map(|&key| FieldDescriptor::new(key, key, FieldKind::Text))
            .collect(),
    )
}

#[test]
fn initial_state_mirrors_the_descriptor() {
    let descriptor = FormDescriptor::new(
        "test",
        vec![FieldDescriptor::new("a", "A", FieldKind::Text).with_initial("x")],
    );
    let engine = FormEngine::new(descriptor, no_errors).unwrap();

    let mut expected = FormState::default();
    expected.fields.insert("a".into(), FormField::pristine("x"));
    assert_eq!(engine.state(), &expected);
}

#[test]
fn blur_then_reset_round_trips_to_the_initial_state() {
    let mut engine = FormEngine::new(text_form(&["a", "b"]), no_errors).unwrap();
    let initial = engine.state().clone();

    let blurred = engine.on_blur("a", "y").unwrap().field("a").cloned();
    assert_eq!(
        blurred,
        Some(FormField {
            value: "y".into(),
            touched: true,
            error: None,
        })
    );

    assert_eq!(engine.reset(None).unwrap(), &initial);
}

#[test]
fn validator_output_is_written_to_every_field() {
    let validator = |state: &FormState| {
        let mut result = ValidationResult::new();
        if !state.value("a").unwrap_or_default().is_empty() {
            result.insert("b".into(), "err".into());
        }
        result
    };
    let mut engine = FormEngine::new(text_form(&["a", "b"]), validator).unwrap();

    let state = engine.on_change("a", "something").unwrap();
    assert_eq!(state.field("b").and_then(|field| field.error.as_deref()), Some("err"));
    assert_eq!(state.field("b").map(|field| field.touched), Some(false));

    let state = engine.on_change("a", "").unwrap();
    assert!(!state.has_errors());
}

#[test]
fn key_set_never_changes() {
    let mut engine = FormEngine::new(text_form(&["a", "b"]), no_errors).unwrap();
    let keys = |engine: &FormEngine| engine.state().fields.keys().cloned().collect::<Vec<_>>();

    engine.on_change("a", "1").unwrap();
    engine.on_blur("b", "2").unwrap();
    assert!(engine.on_change("c", "3").is_err());
    engine.reset(None).unwrap();

    assert_eq!(keys(&engine), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn caller_errors_are_reported() {
    assert_eq!(
        FormEngine::new(text_form(&[]), no_errors).unwrap_err(),
        FormError::EmptyForm("test".into())
    );
    assert!(matches!(
        FormEngine::new(text_form(&["a", "a"]), no_errors),
        Err(FormError::DuplicateField { field, .. }) if field == "a"
    ));
}

#[test]
fn normalizing_transform_and_kind_validation_compose() {
    let descriptor = FormDescriptor::new(
        "names",
        vec![FieldDescriptor::new("kana", "Kana", FieldKind::Katakana)
            .with_on_change(full_width_transform())
            .with_on_blur(full_width_transform())],
    );
    let validator = KindValidator::from_descriptor(&descriptor);
    let mut engine = FormEngine::new(descriptor, validator).unwrap();

    let state = engine.on_blur("kana", "ｶﾀｶﾅ").unwrap();
    assert_eq!(state.value("kana"), Some("カタカナ"));
    assert_eq!(state.field("kana").and_then(FormField::visible_error), None);

    let state = engine.on_blur("kana", "ひらがな").unwrap();
    assert_eq!(
        state.field("kana").and_then(FormField::visible_error),
        Some("Ensure valid Full Width Katakana used only.")
    );
}

#[test]
fn transforms_receive_the_field_key() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let descriptor = FormDescriptor::new(
        "keys",
        vec![FieldDescriptor::new("a", "A", FieldKind::Text).with_on_change(Arc::new(
            move |raw: &str, field: &str| {
                log.lock().unwrap().push(field.to_string());
                raw.to_string()
            },
        ))],
    );
    let mut engine = FormEngine::new(descriptor, no_errors).unwrap();
    engine.on_change("a", "value").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["a".to_string()]);
}
