use std::collections::HashMap;
use std::sync::Arc;

use kentry_text::to_full_width;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::errors::{FlowError, FormError};
use crate::form::{
    ErrorMessage, FieldKind, FormDescriptor, FormEngine, FormState, KindValidator,
    ValidationResult, ValidationRule,
};

use super::field;

pub const FORM_NAME: &str = "address";

pub const POSTAL_CODE: &str = "postalCode";
pub const PREFECTURE_KANJI: &str = "prefectureKanji";
pub const CITY_KANJI: &str = "cityKanji";
pub const CHOME_KANJI: &str = "chomeKanji";
pub const BUILDING_NAME_KANJI: &str = "buildingNameKanji";
pub const PREFECTURE_KATAKANA: &str = "prefectureKatakana";
pub const CITY_KATAKANA: &str = "cityKatakana";
pub const PREFECTURE: &str = "prefecture";
pub const CITY: &str = "city";
pub const CHOME: &str = "chome";
pub const BUILDING_NAME: &str = "buildingName";

/// One postal code with the prefecture and city it resolves to in every
/// script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressEntry {
    pub postal_code: &'static str,
    pub prefecture_kanji: &'static str,
    pub city_kanji: &'static str,
    pub prefecture_katakana: &'static str,
    pub city_katakana: &'static str,
    pub prefecture: &'static str,
    pub city: &'static str,
}

impl AddressEntry {
    /// Address fields this entry fills in, paired with their values.
    pub fn derived_fields(&self) -> [(&'static str, &'static str); 6] {
        [
            (PREFECTURE_KANJI, self.prefecture_kanji),
            (CITY_KANJI, self.city_kanji),
            (PREFECTURE_KATAKANA, self.prefecture_katakana),
            (CITY_KATAKANA, self.city_katakana),
            (PREFECTURE, self.prefecture),
            (CITY, self.city),
        ]
    }
}

static DIRECTORY: [AddressEntry; 2] = [
    AddressEntry {
        postal_code: "530-0001",
        prefecture_kanji: "東京都",
        city_kanji: "千代田,千代田区",
        prefecture_katakana: "トウキョウト",
        city_katakana: "チヨダ,チヨダク",
        prefecture: "Tokyo",
        city: "Chiyoda, Chiyoda-ku, Tokyo",
    },
    AddressEntry {
        postal_code: "249-0005",
        prefecture_kanji: "神奈川県",
        city_kanji: "逗子市",
        prefecture_katakana: "カナガワケン",
        city_katakana: "ズシシ",
        prefecture: "Kanagawa",
        city: "Zushi",
    },
];

static INDEX: Lazy<HashMap<String, &'static AddressEntry>> = Lazy::new(|| {
    DIRECTORY
        .iter()
        .map(|entry| (normalize_code(entry.postal_code), entry))
        .collect()
});

fn normalize_code(code: &str) -> String {
    to_full_width(code.trim())
}

pub fn directory() -> &'static [AddressEntry] {
    &DIRECTORY
}

/// Resolves a postal code typed in either width.
pub fn lookup(code: &str) -> Option<&'static AddressEntry> {
    INDEX.get(&normalize_code(code)).copied()
}

/// Codes offered for autocompletion, widened when input is converted
/// immediately.
pub fn postal_options(convert_immediately: bool) -> Vec<String> {
    DIRECTORY
        .iter()
        .map(|entry| {
            if convert_immediately {
                to_full_width(entry.postal_code)
            } else {
                entry.postal_code.to_string()
            }
        })
        .collect()
}

pub fn descriptor(convert_immediately: bool) -> FormDescriptor {
    let convert = convert_immediately;
    FormDescriptor::new(
        FORM_NAME,
        vec![
            field(POSTAL_CODE, "Postal Code", FieldKind::PostalCode, convert)
                .with_help("Seven digits, e.g. 530-0001"),
            field(PREFECTURE_KANJI, "Prefecture", FieldKind::Kanji, convert),
            field(CITY_KANJI, "City / Ward", FieldKind::Kanji, convert),
            field(CHOME_KANJI, "Chome and Banchi", FieldKind::Kanji, convert),
            field(BUILDING_NAME_KANJI, "Building name / Floor / Room number", FieldKind::Kanji, convert)
                .with_optional(),
            field(PREFECTURE_KATAKANA, "Prefecture (katakana)", FieldKind::Katakana, convert),
            field(CITY_KATAKANA, "City / Ward (katakana)", FieldKind::Katakana, convert),
            field(PREFECTURE, "Prefecture (romaji)", FieldKind::Roman, convert),
            field(CITY, "District / Town area / Ward (romaji)", FieldKind::Roman, convert),
            field(CHOME, "Chome (romaji)", FieldKind::RomanAddress, convert)
                .with_help("Street numbers allowed, e.g. 1-2-3"),
            field(BUILDING_NAME, "Building name (romaji)", FieldKind::RomanAddress, convert)
                .with_optional(),
        ],
    )
}

/// Flags derived fields that disagree with the address the postal code
/// resolves to. Kind errors already present win.
pub fn mismatch_rule() -> ValidationRule {
    Arc::new(|state: &FormState, result: &mut ValidationResult| {
        let Some(entry) = state.value(POSTAL_CODE).and_then(lookup) else {
            return;
        };
        for (key, expected) in entry.derived_fields() {
            let value = state.value(key).unwrap_or_default();
            if !value.is_empty() && to_full_width(value) != to_full_width(expected) {
                result
                    .entry(key.to_string())
                    .or_insert_with(|| ErrorMessage::AddressMismatch.text().to_string());
            }
        }
    })
}

pub fn engine(convert_immediately: bool) -> Result<FormEngine, FormError> {
    let descriptor = descriptor(convert_immediately);
    let validator = KindValidator::from_descriptor(&descriptor).with_rule(mismatch_rule());
    FormEngine::new(descriptor, validator)
}

/// Selects `code` and fills the derived fields through the normal change
/// path, so transforms and validation apply as if typed.
pub fn autofill(engine: &mut FormEngine, code: &str) -> Result<&'static AddressEntry, FlowError> {
    let entry = lookup(code).ok_or_else(|| FlowError::UnknownPostalCode(code.to_string()))?;
    engine.on_blur(POSTAL_CODE, code)?;
    for (key, value) in entry.derived_fields() {
        engine.on_change(key, value)?;
    }
    debug!(form = engine.name(), id = %engine.id(), postal_code = entry.postal_code, "address autofilled");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_width_insensitive() {
        let entry = lookup("530-0001").unwrap();
        assert_eq!(lookup("５３０－０００１"), Some(entry));
        assert_eq!(lookup(" 249-0005 ").unwrap().prefecture, "Kanagawa");
        assert_eq!(lookup("5300001"), None);
        assert_eq!(lookup("100-0000"), None);
    }

    #[test]
    fn options_follow_the_toggle() {
        assert_eq!(postal_options(false), vec!["530-0001", "249-0005"]);
        assert_eq!(postal_options(true), vec!["５３０－０００１", "２４９－０００５"]);
    }

    #[test]
    fn optional_building_names() {
        let descriptor = descriptor(false);
        let optional: Vec<&str> = descriptor
            .fields
            .iter()
            .filter(|field| !field.required)
            .map(|field| field.key)
            .collect();

        assert_eq!(optional, vec![BUILDING_NAME_KANJI, BUILDING_NAME]);
        assert_eq!(descriptor.fields.len(), 11);
    }

    #[test]
    fn street_lines_take_digits_but_prefectures_do_not() {
        let mut engine = engine(false).unwrap();
        autofill(&mut engine, "530-0001").unwrap();
        engine.on_blur(CHOME, "1-2-3").unwrap();
        engine.on_blur(BUILDING_NAME, "ABC Bldg 3F").unwrap();
        let state = engine.on_blur(PREFECTURE, "Tokyo 1").unwrap();

        assert_eq!(state.field(CHOME).unwrap().error, None);
        assert_eq!(state.field(BUILDING_NAME).unwrap().error, None);
        assert_eq!(
            state.field(PREFECTURE).unwrap().error.as_deref(),
            Some(ErrorMessage::Name.text())
        );
    }

    #[test]
    fn autofill_populates_derived_fields() {
        let mut engine = engine(false).unwrap();
        let entry = autofill(&mut engine, "249-0005").unwrap();
        let state = engine.state();

        assert_eq!(entry.city_kanji, "逗子市");
        assert!(state.field(POSTAL_CODE).unwrap().touched);
        assert_eq!(state.value(PREFECTURE_KANJI), Some("神奈川県"));
        assert_eq!(state.value(CITY_KATAKANA), Some("ズシシ"));
        assert_eq!(state.value(CITY), Some("Zushi"));
        assert!(!state.field(CITY).unwrap().touched);
        for (key, _) in entry.derived_fields() {
            assert_eq!(state.field(key).unwrap().error, None, "{key}");
        }
        assert!(state.field(CHOME_KANJI).unwrap().error.is_some());
    }

    #[test]
    fn autofill_with_conversion_widens_script_fields() {
        let mut engine = engine(true).unwrap();
        autofill(&mut engine, "530-0001").unwrap();
        let state = engine.state();

        assert_eq!(state.value(POSTAL_CODE), Some("５３０－０００１"));
        assert_eq!(state.value(CITY_KANJI), Some("千代田，千代田区"));
        assert_eq!(state.value(PREFECTURE), Some("Tokyo"));
        assert_eq!(state.field(CITY_KANJI).unwrap().error, None);
    }

    #[test]
    fn unknown_code_is_rejected_without_changes() {
        let mut engine = engine(false).unwrap();
        let err = autofill(&mut engine, "999-9999").unwrap_err();

        assert_eq!(err, FlowError::UnknownPostalCode("999-9999".into()));
        assert_eq!(engine.state(), engine.initial_state());
    }

    #[test]
    fn edited_derived_field_is_a_mismatch() {
        let mut engine = engine(false).unwrap();
        autofill(&mut engine, "249-0005").unwrap();
        let state = engine.on_blur(PREFECTURE_KANJI, "東京都").unwrap();

        assert_eq!(
            state.field(PREFECTURE_KANJI).unwrap().visible_error(),
            Some(ErrorMessage::AddressMismatch.text())
        );
    }

    #[test]
    fn kind_errors_win_over_mismatch() {
        let mut engine = engine(false).unwrap();
        autofill(&mut engine, "249-0005").unwrap();
        let state = engine.on_blur(PREFECTURE_KATAKANA, "かながわけん").unwrap();

        assert_eq!(
            state.field(PREFECTURE_KATAKANA).unwrap().error.as_deref(),
            Some(ErrorMessage::Katakana.text())
        );
    }
}
