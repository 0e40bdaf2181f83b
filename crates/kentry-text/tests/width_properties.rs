use kentry_text::{to_full_width, widen};

fn bmp() -> impl Iterator<Item = char> {
    (0u32..=0xFFFF).filter_map(char::from_u32)
}

fn is_half_width_input(c: char) -> bool {
    matches!(
        c,
        '!'..='~'
            | '\u{FF61}'..='\u{FF9F}'
            | '\u{FFA1}'..='\u{FFBE}'
            | '\u{FFC2}'..='\u{FFDC}'
            | '¢'
            | '£'
            | '¬'
            | '¯'
            | '¦'
            | '¥'
            | '₩'
            | ' '
            | '←'
            | '↑'
            | '→'
            | '↓'
            | '■'
            | '°'
    )
}

#[test]
fn widening_is_idempotent_across_the_bmp() {
    for c in bmp() {
        let once = widen(c);
        assert_eq!(widen(once), once, "U+{:04X} is not stable", c as u32);
    }
}

#[test]
fn characters_outside_the_inventories_pass_through() {
    for c in bmp().filter(|c| !is_half_width_input(*c)) {
        assert_eq!(widen(c), c, "U+{:04X} changed", c as u32);
    }
}

#[test]
fn every_inventory_character_changes() {
    for c in bmp().filter(|c| is_half_width_input(*c)) {
        assert_ne!(widen(c), c, "U+{:04X} was left unchanged", c as u32);
    }
}

#[test]
fn string_conversion_is_idempotent_for_mixed_text() {
    let samples = [
        "ﾔﾏﾀﾞ ﾀﾛｳ",
        "Tokyo 100-0001",
        "東京都千代田区1-2-3 ABCﾋﾞﾙ",
        "¥1,000 ← →",
        "",
    ];
    for sample in samples {
        let once = to_full_width(sample);
        assert_eq!(to_full_width(&once), once);
        assert_eq!(sample.chars().count(), once.chars().count());
    }
}

#[test]
fn astral_characters_are_untouched() {
    assert_eq!(to_full_width("𠮷野家"), "𠮷野家");
}
