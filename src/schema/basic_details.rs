use crate::errors::FormError;
use crate::form::{FieldKind, FormDescriptor, FormEngine};

use super::field;

pub const FORM_NAME: &str = "basicDetails";

pub const LAST_NAME_KANJI: &str = "lastNameKanji";
pub const FIRST_NAME_KANJI: &str = "firstNameKanji";
pub const LAST_NAME_KATAKANA: &str = "lastNameKatakana";
pub const FIRST_NAME_KATAKANA: &str = "firstNameKatakana";
pub const LAST_NAME: &str = "lastName";
pub const FIRST_NAME: &str = "firstName";

pub fn descriptor(convert_immediately: bool) -> FormDescriptor {
    let convert = convert_immediately;
    FormDescriptor::new(
        FORM_NAME,
        vec![
            field(LAST_NAME_KANJI, "姓", FieldKind::Kanji, convert),
            field(FIRST_NAME_KANJI, "名", FieldKind::Kanji, convert),
            field(LAST_NAME_KATAKANA, "セイ", FieldKind::Katakana, convert)
                .with_help("Full width katakana, e.g. ヤマダ"),
            field(FIRST_NAME_KATAKANA, "メイ", FieldKind::Katakana, convert),
            field(LAST_NAME, "Last name (romaji)", FieldKind::Roman, convert),
            field(FIRST_NAME, "First name (romaji)", FieldKind::Roman, convert),
        ],
    )
}

pub fn engine(convert_immediately: bool) -> Result<FormEngine, FormError> {
    FormEngine::with_kind_validation(descriptor(convert_immediately))
}
