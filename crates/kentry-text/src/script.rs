//! Script allow-lists for name and address fields.
//!
//! Every predicate is an anchored whole-string check: the input is rejected
//! when it is missing, empty, or contains a single character outside the
//! allow-list.

fn all_chars<'a>(input: impl Into<Option<&'a str>>, allowed: fn(char) -> bool) -> bool {
    match input.into() {
        Some(text) if !text.is_empty() => text.chars().all(allowed),
        _ => false,
    }
}

/// Punctuation shared by the Kanji and Katakana classes.
fn is_shared_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{30FB}'              // ・
            | '\u{30FC}'        // ー
            | '\u{2010}'        // ‐
            | '\u{FF0D}'        // －
            | '\u{2212}'        // −
            | '\u{2019}'        // ’
            | '\u{FF0C}'        // ，
            | '\u{FF0E}'        // ．
            | '\u{FF06}'        // ＆
            | '\u{3000}'
            | ' '
            | ','
            | '.'
            | '&'
    )
}

fn is_full_width_alphanumeric(c: char) -> bool {
    matches!(c, '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}')
}

fn is_roman_numeral(c: char) -> bool {
    ('\u{2160}'..='\u{216A}').contains(&c)
}

fn is_half_width_katakana(c: char) -> bool {
    ('\u{FF65}'..='\u{FF9F}').contains(&c)
}

fn is_kanji_class(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{3041}'..='\u{3096}'
            | '\u{30A1}'..='\u{30FA}'
            | '\u{30FC}'..='\u{30FF}'
    ) || c.is_ascii_alphanumeric()
        || is_full_width_alphanumeric(c)
        || is_shared_punctuation(c)
        || is_roman_numeral(c)
        || is_half_width_katakana(c)
}

fn is_katakana_class(c: char) -> bool {
    matches!(
        c,
        '\u{30A1}'..='\u{30F6}'
            | '\u{31F0}'..='\u{31FF}'
            // へ べ ぺ are routinely typed in place of their katakana twins in addresses.
            | '\u{3078}'..='\u{307A}'
    ) || is_full_width_alphanumeric(c)
        || is_shared_punctuation(c)
        || is_roman_numeral(c)
        || is_half_width_katakana(c)
}

fn is_roman_class(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(
            c,
            '\u{FF21}'..='\u{FF3A}'
                | '\u{FF41}'..='\u{FF5A}'
                | ' '
                | '\u{3000}'
                | ','
                | '.'
                | '-'
                | '\''
                | '\u{FF0C}'
                | '\u{FF0E}'
                | '\u{FF0D}'
                | '\u{FF07}'
        )
}

/// Kanji-class text: CJK ideographs, kana, alphanumerics in either width and
/// the punctuation used in names and addresses.
///
/// ```
/// use kentry_text::is_valid_kanji_text;
///
/// assert!(is_valid_kanji_text("東京都"));
/// assert!(is_valid_kanji_text("東京都1a"));
/// assert!(!is_valid_kanji_text("東京都!"));
/// assert!(!is_valid_kanji_text(None));
/// ```
pub fn is_valid_kanji_text<'a>(input: impl Into<Option<&'a str>>) -> bool {
    all_chars(input, is_kanji_class)
}

/// Katakana-class text: katakana in either width, full-width alphanumerics and
/// the shared punctuation.
pub fn is_valid_katakana_text<'a>(input: impl Into<Option<&'a str>>) -> bool {
    all_chars(input, is_katakana_class)
}

fn is_roman_address_class(c: char) -> bool {
    is_roman_class(c) || c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c)
}

/// Roman-letter text for romaji names, prefectures and cities.
pub fn is_valid_roman_text<'a>(input: impl Into<Option<&'a str>>) -> bool {
    all_chars(input, is_roman_class)
}

/// Romaji street lines and building names: the roman class plus digits in
/// either width.
///
/// ```
/// use kentry_text::is_valid_roman_address_text;
///
/// assert!(is_valid_roman_address_text("1-2-3"));
/// assert!(is_valid_roman_address_text("ABC Bldg 3F"));
/// assert!(!is_valid_roman_address_text("#301"));
/// ```
pub fn is_valid_roman_address_text<'a>(input: impl Into<Option<&'a str>>) -> bool {
    all_chars(input, is_roman_address_class)
}

/// Japanese postal code: `NNN-NNNN` or `NNNNNNN`, digits and hyphen in either
/// width.
pub fn is_valid_postal_code<'a>(input: impl Into<Option<&'a str>>) -> bool {
    let Some(text) = input.into() else {
        return false;
    };
    let chars: Vec<char> = text.chars().collect();
    let is_digit = |c: &char| c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(c);
    match chars.len() {
        7 => chars.iter().all(is_digit),
        8 => {
            matches!(chars[3], '-' | '\u{FF0D}')
                && chars[..3].iter().all(is_digit)
                && chars[4..].iter().all(is_digit)
        }
        _ => false,
    }
}
