use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use kentry_text::{
    is_valid_kanji_text, is_valid_katakana_text, is_valid_postal_code,
    is_valid_roman_address_text, is_valid_roman_text,
};
use serde::{Deserialize, Serialize};

use super::validation::ErrorMessage;

/// Rewrites raw input before it is stored. Receives the raw value and the
/// field key.
pub type Transform = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Character class a field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, never rejected for its content.
    Text,
    Kanji,
    Katakana,
    Roman,
    /// Romaji street line or building name; digits allowed.
    RomanAddress,
    PostalCode,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Text,
        FieldKind::Kanji,
        FieldKind::Katakana,
        FieldKind::Roman,
        FieldKind::RomanAddress,
        FieldKind::PostalCode,
    ];

    /// Whether a non-empty `value` belongs to this class.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Kanji => is_valid_kanji_text(value),
            FieldKind::Katakana => is_valid_katakana_text(value),
            FieldKind::Roman => is_valid_roman_text(value),
            FieldKind::RomanAddress => is_valid_roman_address_text(value),
            FieldKind::PostalCode => is_valid_postal_code(value),
        }
    }

    /// Message reported when [`FieldKind::accepts`] fails.
    pub fn rejection(self) -> Option<ErrorMessage> {
        match self {
            FieldKind::Text => None,
            FieldKind::Kanji => Some(ErrorMessage::Kanji),
            FieldKind::Katakana => Some(ErrorMessage::Katakana),
            FieldKind::Roman => Some(ErrorMessage::Name),
            FieldKind::RomanAddress => Some(ErrorMessage::RomanAddress),
            FieldKind::PostalCode => Some(ErrorMessage::PostalCode),
        }
    }

    /// Kinds whose values are canonicalised to full width.
    pub fn converts_to_full_width(self) -> bool {
        matches!(
            self,
            FieldKind::Kanji | FieldKind::Katakana | FieldKind::PostalCode
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Kanji => "kanji",
            FieldKind::Katakana => "katakana",
            FieldKind::Roman => "roman",
            FieldKind::RomanAddress => "street",
            FieldKind::PostalCode => "postal",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = FieldKind::ALL.iter().map(|kind| kind.as_str()).collect();
                format!("Unknown field kind `{}` (expected one of: {})", value, names.join(", "))
            })
    }
}

/// Declarative description of a single form field.
///
/// The descriptor is fixed for the lifetime of the engine that owns it.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub initial: String,
    pub on_change: Option<Transform>,
    pub on_blur: Option<Transform>,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            help: None,
            initial: String::new(),
            on_change: None,
            on_blur: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.initial = value.into();
        self
    }

    pub fn with_on_change(mut self, transform: Transform) -> Self {
        self.on_change = Some(transform);
        self
    }

    pub fn with_on_blur(mut self, transform: Transform) -> Self {
        self.on_blur = Some(transform);
        self
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("help", &self.help)
            .field("initial", &self.initial)
            .field("on_change", &self.on_change.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

/// Metadata describing a whole form, including field order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }
}

/// Whether a field has lost focus at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Pristine,
    Touched,
}

/// Live state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub value: String,
    pub touched: bool,
    /// Latest verdict of the form validator, `None` when valid.
    pub error: Option<String>,
}

impl FormField {
    pub fn pristine(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            touched: false,
            error: None,
        }
    }

    pub fn status(&self) -> FieldStatus {
        if self.touched {
            FieldStatus::Touched
        } else {
            FieldStatus::Pristine
        }
    }

    /// Error to show the user. Errors on untouched fields stay hidden.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }
}

/// Complete state of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub fields: BTreeMap<String, FormField>,
}

impl FormState {
    /// Seeds every field from its descriptor's initial value.
    pub fn seeded(descriptor: &FormDescriptor) -> Self {
        let fields = descriptor
            .fields
            .iter()
            .map(|field| (field.key.to_string(), FormField::pristine(field.initial.clone())))
            .collect();
        Self { fields }
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|field| field.value.as_str())
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(key, field)| (key.clone(), field.value.clone()))
            .collect()
    }

    /// True when both states track exactly the same field names.
    pub fn has_same_fields(&self, other: &FormState) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.keys().zip(other.fields.keys()).all(|(a, b)| a == b)
    }

    pub fn has_errors(&self) -> bool {
        self.fields.values().any(|field| field.error.is_some())
    }

    pub fn has_visible_errors(&self) -> bool {
        self.fields
            .values()
            .any(|field| field.visible_error().is_some())
    }
}
