//! Half-width to full-width conversion.
//!
//! Characters are converted one at a time. Three inventories are consulted in
//! order: contiguous ranges that map by a fixed code point offset (printable
//! ASCII and two half-width Hangul Jamo blocks), the half-width Katakana table,
//! and a short list of symbols. Anything outside those inventories is copied
//! through unchanged, so the conversion never fails and every mapping is
//! one-to-one.

/// Contiguous half-width range converted by adding a fixed offset.
struct WidthShift {
    first: char,
    last: char,
    delta: i32,
}

impl WidthShift {
    const fn new(first: char, last: char, delta: i32) -> Self {
        Self { first, last, delta }
    }

    fn apply(&self, c: char) -> Option<char> {
        if !(self.first..=self.last).contains(&c) {
            return None;
        }
        (c as u32)
            .checked_add_signed(self.delta)
            .and_then(char::from_u32)
    }
}

/// `!`..`~` to `！`..`～`.
const LATIN: WidthShift = WidthShift::new('!', '~', 0xFEE0);
/// Half-width Hangul final consonants to conjoining Jamo.
const HANGUL_FINALS: WidthShift = WidthShift::new('\u{FFA1}', '\u{FFBE}', -0xEDF9);
/// Half-width Hangul vowels to conjoining Jamo.
const HANGUL_VOWELS: WidthShift = WidthShift::new('\u{FFC2}', '\u{FFDC}', -0xEE61);

const SHIFTS: [WidthShift; 3] = [LATIN, HANGUL_FINALS, HANGUL_VOWELS];

#[rustfmt::skip]
const HALF_WIDTH_KATAKANA: [char; 63] = [
    '｡', '｢', '｣', '､', '･', 'ｦ', 'ｧ', 'ｨ',
    'ｩ', 'ｪ', 'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｰ',
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ',
    'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ',
    'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ',
    'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ',
    'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ',
    'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ﾝ', 'ﾞ', 'ﾟ',
];

#[rustfmt::skip]
const FULL_WIDTH_KATAKANA: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ',
    'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク',
    'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ',
    'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ',
    'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

// `|` never reaches this table because LATIN claims it first.
const HALF_WIDTH_EXTRAS: [char; 15] = [
    '¢', '£', '¬', '¯', '¦', '¥', '₩', ' ', '|', '←', '↑', '→', '↓', '■', '°',
];

const FULL_WIDTH_EXTRAS: [char; 15] = [
    '￠', '￡', '￢', '￣', '￤', '￥', '￦', '\u{3000}', '￨', '￩', '￪', '￫', '￬', '￭', '￮',
];

fn lookup(half: &[char], full: &[char], c: char) -> Option<char> {
    half.iter()
        .position(|candidate| *candidate == c)
        .and_then(|index| full.get(index).copied())
}

/// Converts a single character, returning it unchanged when no inventory
/// covers it.
pub fn widen(c: char) -> char {
    SHIFTS
        .iter()
        .find_map(|shift| shift.apply(c))
        .or_else(|| lookup(&HALF_WIDTH_KATAKANA, &FULL_WIDTH_KATAKANA, c))
        .or_else(|| lookup(&HALF_WIDTH_EXTRAS, &FULL_WIDTH_EXTRAS, c))
        .unwrap_or(c)
}

/// Replaces every half-width character in `input` with its full-width
/// counterpart.
///
/// ```
/// use kentry_text::to_full_width;
///
/// assert_eq!(to_full_width("ｱｲｳｴｵ"), "アイウエオ");
/// assert_eq!(to_full_width("ABC123!"), "ＡＢＣ１２３！");
/// assert_eq!(to_full_width("漢字"), "漢字");
/// ```
pub fn to_full_width(input: &str) -> String {
    input.chars().map(widen).collect()
}
