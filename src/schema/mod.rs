//! Concrete forms of the entry flow and the postal-code directory behind the
//! address page.

pub mod address;
pub mod basic_details;

use std::sync::Arc;

use kentry_text::to_full_width;

use crate::form::{FieldDescriptor, FieldKind, Transform};

pub use address::{AddressEntry, POSTAL_CODE};

/// Transform that canonicalises input to full width.
pub fn full_width_transform() -> Transform {
    Arc::new(|raw: &str, _field: &str| to_full_width(raw))
}

/// Field builder shared by both forms.
///
/// With `convert_immediately`, script kinds normalize on change and blur.
pub(crate) fn field(
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    convert_immediately: bool,
) -> FieldDescriptor {
    let descriptor = FieldDescriptor::new(key, label, kind);
    if convert_immediately && kind.converts_to_full_width() {
        descriptor
            .with_on_change(full_width_transform())
            .with_on_blur(full_width_transform())
    } else {
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_follow_the_toggle_and_the_kind() {
        let kanji = field("k", "K", FieldKind::Kanji, true);
        assert!(kanji.on_change.is_some() && kanji.on_blur.is_some());

        let roman = field("r", "R", FieldKind::Roman, true);
        assert!(roman.on_change.is_none() && roman.on_blur.is_none());

        let off = field("k", "K", FieldKind::Katakana, false);
        assert!(off.on_change.is_none() && off.on_blur.is_none());
    }

    #[test]
    fn full_width_transform_ignores_the_field_key() {
        let transform = full_width_transform();
        assert_eq!(transform("ﾔﾏﾀ", "anything"), "ヤマタ");
    }
}
