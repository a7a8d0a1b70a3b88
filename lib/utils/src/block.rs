//! Unicode block tables and character classification.
//!
//! Blocks are grouped into categories (Kana, common/rare Kanji, punctuation,
//! symbols, letters, non-spacing). The categories must not overlap, which is
//! verified by tests rather than at runtime.

use crate::utf8::{
    get_code, validate_mb_utf8, Code, MbUtf8Result, COMBINING_SEMI_VOICED_CODE,
    COMBINING_VOICED_CODE,
};

/// an inclusive code point range with the Unicode version it was added in
#[derive(Clone, Copy, Debug)]
pub struct UnicodeBlock {
    pub start: Code,
    pub end: Code,
    pub version: &'static str,
}

impl UnicodeBlock {
    const fn new(start: Code, end: Code, version: &'static str) -> Self {
        UnicodeBlock {
            start,
            end,
            version,
        }
    }

    pub fn contains(&self, c: Code) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

const fn b(start: Code, end: Code, version: &'static str) -> UnicodeBlock {
    UnicodeBlock::new(start, end, version)
}

pub const HIRAGANA_BLOCKS: [UnicodeBlock; 1] = [b(0x3040, 0x309f, "1.1")];

pub const KATAKANA_BLOCKS: [UnicodeBlock; 2] = [
    b(0x30a0, 0x30ff, "1.1"),  // Katakana
    b(0x31f0, 0x31ff, "3.2"),  // Katakana Phonetic Extensions
];

pub const COMMON_KANJI_BLOCKS: [UnicodeBlock; 4] = [
    b(0x3400, 0x4dbf, "3.0"),    // CJK Extension A
    b(0x4e00, 0x9fff, "1.1"),    // CJK Unified Ideographs
    b(0xf900, 0xfaff, "1.1"),    // CJK Compatibility Ideographs
    b(0x20000, 0x2a6df, "3.1"),  // CJK Extension B
];

pub const RARE_KANJI_BLOCKS: [UnicodeBlock; 4] = [
    b(0x2e80, 0x2fdf, "3.0"),    // CJK Radicals Supplement, Kangxi Radicals
    b(0x2a700, 0x2ebef, "5.2"),  // CJK Extensions C through F
    b(0x2f800, 0x2fa1f, "3.1"),  // CJK Compatibility Ideographs Supplement
    b(0x30000, 0x3134f, "13.0"), // CJK Extension G
];

pub const PUNCTUATION_BLOCKS: [UnicodeBlock; 3] = [
    b(0x2000, 0x206f, "1.1"),  // General Punctuation
    b(0x3000, 0x303f, "1.1"),  // CJK Symbols and Punctuation
    b(0xfff0, 0xffff, "1.1"),  // Specials (includes U+FFFD)
];

pub const SYMBOL_BLOCKS: [UnicodeBlock; 7] = [
    b(0x2100, 0x214f, "1.1"),  // Letterlike Symbols
    b(0x2190, 0x21ff, "1.1"),  // Arrows
    b(0x2200, 0x22ff, "1.1"),  // Mathematical Operators
    b(0x2500, 0x257f, "1.1"),  // Box Drawing
    b(0x25a0, 0x25ff, "1.1"),  // Geometric Shapes
    b(0x2600, 0x26ff, "1.1"),  // Miscellaneous Symbols
    b(0x3190, 0x319f, "1.1"),  // Kanbun
];

pub const LETTER_BLOCKS: [UnicodeBlock; 6] = [
    b(0x80, 0xff, "1.1"),      // Latin-1 Supplement
    b(0x100, 0x17f, "1.1"),    // Latin Extended-A
    b(0x2150, 0x2185, "1.1"),  // Number Forms
    b(0x2460, 0x24ff, "1.1"),  // Enclosed Alphanumerics
    b(0x2c60, 0x2c7f, "5.0"),  // Latin Extended-C
    b(0xff00, 0xffef, "1.1"),  // Halfwidth and Fullwidth Forms
];

/// Variation Selectors (the combining Kana marks U+3099 and U+309A are also
/// treated as non-spacing even though they sit inside the Hiragana block)
pub const NON_SPACING_BLOCKS: [UnicodeBlock; 1] = [b(0xfe00, 0xfe0f, "3.2")];

/// wide space (U+3000), only accepted by [`is_mb_punctuation`] when requested
pub const WIDE_SPACE: Code = 0x3000;

fn in_blocks(c: Code, blocks: &[UnicodeBlock]) -> bool {
    blocks.iter().any(|block| block.contains(c))
}

/// first character of `s`, honoring the `size_one` restriction (exactly one
/// multi-byte character, no trailing bytes)
fn first_code(s: &str, size_one: bool) -> Option<Code> {
    if size_one && validate_mb_utf8(s.as_bytes(), true) != MbUtf8Result::Valid {
        return None;
    }
    (!s.is_empty()).then(|| get_code(s))
}

macro_rules! block_predicates {
    ($single:ident, $all:ident, $code:ident, $blocks:expr) => {
        pub fn $code(c: Code) -> bool {
            in_blocks(c, &$blocks)
        }

        /// checks the first character of `s` (with `size_one` the input must
        /// be exactly one character)
        pub fn $single(s: &str, size_one: bool) -> bool {
            first_code(s, size_one).is_some_and($code)
        }

        /// return true if every character of `s` matches (and `s` is not empty)
        pub fn $all(s: &str) -> bool {
            !s.is_empty() && s.chars().all(|c| $code(c as Code))
        }
    };
}

block_predicates!(is_hiragana, is_all_hiragana, is_hiragana_code, HIRAGANA_BLOCKS);
block_predicates!(is_katakana, is_all_katakana, is_katakana_code, KATAKANA_BLOCKS);
block_predicates!(
    is_common_kanji,
    is_all_common_kanji,
    is_common_kanji_code,
    COMMON_KANJI_BLOCKS
);
block_predicates!(is_rare_kanji, is_all_rare_kanji, is_rare_kanji_code, RARE_KANJI_BLOCKS);
block_predicates!(is_mb_symbol, is_all_mb_symbol, is_mb_symbol_code, SYMBOL_BLOCKS);
block_predicates!(is_mb_letter, is_all_mb_letter, is_mb_letter_code, LETTER_BLOCKS);

pub fn is_kanji_code(c: Code) -> bool {
    is_common_kanji_code(c) || is_rare_kanji_code(c)
}

pub fn is_kanji(s: &str, size_one: bool) -> bool {
    first_code(s, size_one).is_some_and(is_kanji_code)
}

pub fn is_all_kanji(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_kanji_code(c as Code))
}

pub fn is_kana_code(c: Code) -> bool {
    is_hiragana_code(c) || is_katakana_code(c)
}

pub fn is_kana(s: &str, size_one: bool) -> bool {
    first_code(s, size_one).is_some_and(is_kana_code)
}

pub fn is_all_kana(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_kana_code(c as Code))
}

pub fn is_mb_punctuation_code(c: Code, include_space: bool) -> bool {
    if c == WIDE_SPACE {
        return include_space;
    }
    in_blocks(c, &PUNCTUATION_BLOCKS)
}

/// multi-byte punctuation check, the wide space U+3000 is only accepted when
/// `include_space` is set
pub fn is_mb_punctuation(s: &str, include_space: bool, size_one: bool) -> bool {
    first_code(s, size_one).is_some_and(|c| is_mb_punctuation_code(c, include_space))
}

pub fn is_all_mb_punctuation(s: &str, include_space: bool) -> bool {
    !s.is_empty() && s.chars().all(|c| is_mb_punctuation_code(c as Code, include_space))
}

pub fn is_non_spacing_code(c: Code) -> bool {
    in_blocks(c, &NON_SPACING_BLOCKS)
        || c == COMBINING_VOICED_CODE
        || c == COMBINING_SEMI_VOICED_CODE
}

/// variation selectors and combining Kana marks
pub fn is_non_spacing(s: &str, size_one: bool) -> bool {
    first_code(s, size_one).is_some_and(is_non_spacing_code)
}

pub fn is_recognized_code(c: Code) -> bool {
    is_kana_code(c)
        || is_kanji_code(c)
        || is_mb_punctuation_code(c, true)
        || is_mb_symbol_code(c)
        || is_mb_letter_code(c)
        || is_non_spacing_code(c)
}

/// return true if the first character of `s` is in one of the recognized
/// multi-byte blocks
pub fn is_recognized_utf8(s: &str, size_one: bool) -> bool {
    first_code(s, size_one).is_some_and(is_recognized_code)
}

pub fn is_all_recognized_utf8(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_recognized_code(c as Code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_blocks() -> Vec<(&'static str, UnicodeBlock)> {
        let mut result = Vec::new();
        let categories: [(&str, &[UnicodeBlock]); 8] = [
            ("hiragana", &HIRAGANA_BLOCKS),
            ("katakana", &KATAKANA_BLOCKS),
            ("common kanji", &COMMON_KANJI_BLOCKS),
            ("rare kanji", &RARE_KANJI_BLOCKS),
            ("punctuation", &PUNCTUATION_BLOCKS),
            ("symbol", &SYMBOL_BLOCKS),
            ("letter", &LETTER_BLOCKS),
            ("non-spacing", &NON_SPACING_BLOCKS),
        ];
        for (name, blocks) in categories {
            for &block in blocks {
                result.push((name, block));
            }
        }
        result
    }

    #[test]
    fn blocks_are_well_formed() {
        for (name, block) in all_blocks() {
            assert!(block.start < block.end, "{name} {:x}", block.start);
            assert!(!block.version.is_empty(), "{name}");
        }
    }

    #[test]
    fn blocks_do_not_overlap_across_categories() {
        let blocks = all_blocks();
        for (i, (name, block)) in blocks.iter().enumerate() {
            for (other_name, other) in &blocks[i + 1..] {
                assert!(
                    block.end < other.start || other.end < block.start,
                    "{name} [{:x},{:x}] overlaps {other_name} [{:x},{:x}]",
                    block.start,
                    block.end,
                    other.start,
                    other.end
                );
            }
        }
    }

    #[test]
    fn kana_checks() {
        assert!(is_hiragana("あ", true));
        assert!(!is_hiragana("ア", true));
        assert!(!is_hiragana("あい", true));
        assert!(is_hiragana("あい", false));
        assert!(is_all_hiragana("あいう"));
        assert!(!is_all_hiragana("あイ"));
        assert!(is_katakana("ア", true));
        assert!(is_all_katakana("アイー")); // prolong mark is in the Katakana block
        assert!(is_kana("あ", true) && is_kana("ア", true));
        assert!(!is_kana("音", true));
    }

    #[test]
    fn kanji_checks() {
        assert!(is_common_kanji("音", true));
        assert!(!is_rare_kanji("音", true));
        assert!(is_kanji("音", true));
        assert!(is_rare_kanji("⺅", true));
        assert!(is_kanji("𠮟", true)); // extension B
        assert!(!is_kanji("あ", true));
        assert!(is_all_kanji("漢字"));
        assert!(!is_all_kanji("漢じ"));
    }

    #[test]
    fn punctuation_checks() {
        assert!(is_mb_punctuation("。", false, true));
        assert!(!is_mb_punctuation("　", false, true));
        assert!(is_mb_punctuation("　", true, true));
        assert!(!is_mb_punctuation("音", false, true));
    }

    #[test]
    fn symbol_and_letter_checks() {
        assert!(is_mb_symbol("↑", true));
        assert!(is_mb_symbol("○", true));
        assert!(is_mb_letter("Ｋ", true));
        assert!(is_mb_letter("é", true));
        assert!(!is_mb_letter("。", true));
    }

    #[test]
    fn non_spacing_checks() {
        assert!(is_non_spacing("\u{fe01}", true));
        assert!(is_non_spacing("\u{3099}", true));
        assert!(is_non_spacing("\u{309a}", true));
        assert!(!is_non_spacing("あ", true));
    }

    #[test]
    fn recognized_checks() {
        for s in ["あ", "ア", "音", "。", "↑", "Ｋ", "\u{fe01}"] {
            assert!(is_recognized_utf8(s, true), "{s}");
        }
        // Hangul is not part of any recognized block
        assert!(!is_recognized_utf8("한", true));
        assert!(is_all_recognized_utf8("あ音。"));
        assert!(!is_all_recognized_utf8("あ한"));
    }
}
