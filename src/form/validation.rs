use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::field::{FieldKind, FormDescriptor, FormState};

/// Field key to error message. A missing key means the field is valid.
pub type ValidationResult = BTreeMap<String, String>;

/// Whole-form validator invoked with every candidate state.
///
/// Implementations must be pure: they are called after every change and blur,
/// including while fields are still empty.
pub trait FormValidator: Send + Sync {
    fn validate(&self, state: &FormState) -> ValidationResult;
}

impl<F> FormValidator for F
where
    F: Fn(&FormState) -> ValidationResult + Send + Sync,
{
    fn validate(&self, state: &FormState) -> ValidationResult {
        self(state)
    }
}

/// Catalog of user-facing validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    Kanji,
    Katakana,
    Name,
    Required,
    PostalCode,
    RomanAddress,
    AddressMismatch,
}

impl ErrorMessage {
    /// Stable catalog key.
    pub fn key(self) -> &'static str {
        match self {
            ErrorMessage::Kanji => "errorKanji",
            ErrorMessage::Katakana => "errorKatakana",
            ErrorMessage::Name => "errorName",
            ErrorMessage::Required => "errorRequired",
            ErrorMessage::PostalCode => "errorPostalCode",
            ErrorMessage::RomanAddress => "errorRomanAddress",
            ErrorMessage::AddressMismatch => "errorAddressMismatch",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            ErrorMessage::Kanji => "Ensure valid Full Width Kanji/Katakana/Hiragana used only.",
            ErrorMessage::Katakana => "Ensure valid Full Width Katakana used only.",
            ErrorMessage::Name => "Ensure only roman letters used only.",
            ErrorMessage::Required => "This field is required.",
            ErrorMessage::PostalCode => "Enter a postal code such as 530-0001.",
            ErrorMessage::RomanAddress => "Ensure only roman letters and digits used only.",
            ErrorMessage::AddressMismatch => "Does not match the selected postal code.",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Extra check run after the per-field pass; sees the whole candidate state.
pub type ValidationRule = Arc<dyn Fn(&FormState, &mut ValidationResult) + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    key: &'static str,
    kind: FieldKind,
    required: bool,
}

/// Validator derived from the field kinds declared in a [`FormDescriptor`].
#[derive(Clone)]
pub struct KindValidator {
    fields: Vec<FieldRule>,
    rules: Vec<ValidationRule>,
}

impl KindValidator {
    pub fn from_descriptor(descriptor: &FormDescriptor) -> Self {
        let fields = descriptor
            .fields
            .iter()
            .map(|field| FieldRule {
                key: field.key,
                kind: field.kind,
                required: field.required,
            })
            .collect();
        Self {
            fields,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn check(rule: &FieldRule, value: &str) -> Option<ErrorMessage> {
        if value.is_empty() {
            return rule.required.then_some(ErrorMessage::Required);
        }
        if rule.kind.accepts(value) {
            None
        } else {
            rule.kind.rejection()
        }
    }
}

impl FormValidator for KindValidator {
    fn validate(&self, state: &FormState) -> ValidationResult {
        let mut result = ValidationResult::new();
        for rule in &self.fields {
            let value = state.value(rule.key).unwrap_or_default();
            if let Some(message) = Self::check(rule, value) {
                result.insert(rule.key.to_string(), message.text().to_string());
            }
        }
        for rule in &self.rules {
            rule(state, &mut result);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::{FieldDescriptor, FormField};

    fn descriptor() -> FormDescriptor {
        FormDescriptor::new(
            "names",
            vec![
                FieldDescriptor::new("kanji", "Kanji", FieldKind::Kanji),
                FieldDescriptor::new("kana", "Kana", FieldKind::Katakana),
                FieldDescriptor::new("roman", "Roman", FieldKind::Roman).with_optional(),
            ],
        )
    }

    fn state(values: &[(&str, &str)]) -> FormState {
        let mut state = FormState::default();
        for (key, value) in values {
            state
                .fields
                .insert(key.to_string(), FormField::pristine(*value));
        }
        state
    }

    #[test]
    fn required_and_optional_empty_fields() {
        let validator = KindValidator::from_descriptor(&descriptor());
        let result = validator.validate(&state(&[("kanji", ""), ("kana", ""), ("roman", "")]));

        assert_eq!(result.get("kanji").map(String::as_str), Some("This field is required."));
        assert_eq!(result.get("kana").map(String::as_str), Some("This field is required."));
        assert!(!result.contains_key("roman"));
    }

    #[test]
    fn rejected_content_uses_the_kind_message() {
        let validator = KindValidator::from_descriptor(&descriptor());
        let result = validator.validate(&state(&[
            ("kanji", "山田!"),
            ("kana", "やまだ"),
            ("roman", "Taro1"),
        ]));

        assert_eq!(result["kanji"], ErrorMessage::Kanji.text());
        assert_eq!(result["kana"], ErrorMessage::Katakana.text());
        assert_eq!(result["roman"], ErrorMessage::Name.text());
    }

    #[test]
    fn valid_state_has_no_errors() {
        let validator = KindValidator::from_descriptor(&descriptor());
        let result = validator.validate(&state(&[
            ("kanji", "山田"),
            ("kana", "ヤマダ"),
            ("roman", "Yamada"),
        ]));

        assert!(result.is_empty());
    }

    #[test]
    fn rules_see_the_whole_state() {
        let validator = KindValidator::from_descriptor(&descriptor()).with_rule(Arc::new(
            |state: &FormState, result: &mut ValidationResult| {
                if state.value("kanji") == Some("山田") && state.value("kana") != Some("ヤマダ") {
                    result
                        .entry("kana".to_string())
                        .or_insert_with(|| "Reading does not match".to_string());
                }
            },
        ));
        let result = validator.validate(&state(&[
            ("kanji", "山田"),
            ("kana", "タナカ"),
            ("roman", ""),
        ]));

        assert_eq!(result["kana"], "Reading does not match");
    }
}
