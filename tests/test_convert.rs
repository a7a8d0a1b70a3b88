//! Cross-checks of the conversion engine and the UTF-8 iterator working
//! together, mirroring real usage by the drivers.

use kana::{CharType, ConvertFlags, Converter, KanaTable, Utf8Char};
use test_case::test_case;

fn convert(input: &str, target: CharType) -> String {
    Converter::new(target, ConvertFlags::empty()).convert(input)
}

#[test_case("kippu", CharType::Hiragana, "きっぷ"; "s1 sokuon")]
#[test_case("rāmen", CharType::Katakana, "ラーメン"; "s2 macron")]
#[test_case("kan'i", CharType::Hiragana, "かんい"; "s3 apostrophe")]
#[test_case("kani", CharType::Hiragana, "かに"; "s3 na row")]
fn seed_scenarios(input: &str, target: CharType, expected: &str) {
    assert_eq!(convert(input, target), expected);
}

#[test]
fn kunrei_and_hepburn_output() {
    let mut converter = Converter::new(CharType::Romaji, ConvertFlags::KUNREI);
    assert_eq!(converter.convert_from(CharType::Hiragana, "し"), "si");
    converter.set_flags(ConvertFlags::HEPBURN);
    assert_eq!(converter.convert_from(CharType::Hiragana, "し"), "shi");
}

#[test]
fn identity_for_all_targets() {
    let inputs = ["kanji", "かんじ", "カンジ", "漢字 123 かな!"];
    for target in [CharType::Hiragana, CharType::Katakana, CharType::Romaji] {
        let converter = Converter::new(target, ConvertFlags::empty());
        for input in inputs {
            assert_eq!(converter.convert_from(target, input), input);
        }
    }
}

#[test]
fn hiragana_katakana_bijection() {
    let to_katakana = Converter::new(CharType::Katakana, ConvertFlags::empty());
    let to_hiragana = Converter::new(CharType::Hiragana, ConvertFlags::empty());
    for entry in KanaTable::get().entries() {
        let katakana = to_katakana.convert_from(CharType::Hiragana, entry.hiragana());
        assert_eq!(katakana, entry.katakana(), "for {}", entry.romaji());
        let hiragana = to_hiragana.convert_from(CharType::Katakana, entry.katakana());
        assert_eq!(hiragana, entry.hiragana(), "for {}", entry.romaji());
    }
}

#[test]
fn canonical_kana_round_trip() {
    // hiragana -> romaji -> hiragana is lossless for every table entry
    // (ambiguous macron forms never appear since the table is canonical)
    let to_romaji = Converter::new(CharType::Romaji, ConvertFlags::empty());
    let to_hiragana = Converter::new(CharType::Hiragana, ConvertFlags::empty());
    for entry in KanaTable::get().entries() {
        let romaji = to_romaji.convert_from(CharType::Hiragana, entry.hiragana());
        assert_eq!(
            to_hiragana.convert_from(CharType::Romaji, &romaji),
            entry.hiragana(),
            "round trip via '{romaji}'"
        );
    }
}

#[test]
fn variation_selectors_scenario() {
    // S5: selectors attach to the preceding character
    let mut chars = Utf8Char::new("憎\u{fe00}憎む朗\u{fe01}");
    let mut result = Vec::new();
    while let Some(c) = chars.next(true) {
        result.push(c);
    }
    assert_eq!(result, ["憎\u{fe00}", "憎", "む", "朗\u{fe01}"]);
    assert_eq!(chars.variants(), 2);
    assert_eq!(chars.errors(), 0);
    assert_eq!(Utf8Char::size("憎\u{fe00}", true), 1);
}

#[test]
fn combining_marks_scenario() {
    // S6: combining marks fold into precomposed kana
    let input = format!("ガキ\u{3099}グホ\u{309a}");
    let mut chars = Utf8Char::new(&input);
    let mut result = Vec::new();
    while let Some(c) = chars.next(true) {
        result.push(c);
    }
    assert_eq!(result, ["ガ", "ギ", "グ", "ポ"]);
    assert_eq!(chars.combining_marks(), 2);
    assert_eq!(chars.errors(), 0);
}

#[test]
fn folded_input_converts_like_precomposed() {
    // a combining-mark input behaves like its precomposed form end to end
    let input = format!("カ\u{3099}キ\u{3099}");
    let mut chars = Utf8Char::new(&input);
    let mut folded = String::new();
    while let Some(c) = chars.next(true) {
        folded.push_str(&c);
    }
    let converter = Converter::new(CharType::Romaji, ConvertFlags::empty());
    assert_eq!(converter.convert_from(CharType::Katakana, &folded), "gagi");
}
