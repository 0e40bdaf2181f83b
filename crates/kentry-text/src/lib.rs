//! kentry-text
//!
//! Character-level helpers for Japanese name and address entry.
//! Owns the half-width to full-width normalizer and the script allow-lists
//! used to classify field contents.

pub mod script;
pub mod width;

pub use script::{
    is_valid_kanji_text, is_valid_katakana_text, is_valid_postal_code,
    is_valid_roman_address_text, is_valid_roman_text,
};
pub use width::{to_full_width, widen};
