//! UTF-8 conversion and validation.
//!
//! Decoding never fails: invalid sequences are consumed at least one byte at
//! a time and replaced with U+FFFD, following RFC 3629 (surrogate halves and
//! code points above U+10FFFF are invalid byte sequences).

/// Unicode code point (UTF-32 value)
pub type Code = u32;

pub const MAX_ASCII: Code = 0x7f;
pub const MAX_UNICODE: Code = 0x10_ffff;
pub const REPLACEMENT: Code = 0xfffd;
pub const REPLACEMENT_UTF8: &str = "\u{fffd}";

const MIN_SURROGATE: Code = 0xd800;
const MAX_SURROGATE: Code = 0xdfff;
const MAX_TWO_BYTE: Code = 0x7ff;
const MAX_THREE_BYTE: Code = 0xffff;

/// Kanji variation selectors and Kana combining marks are 3 bytes in UTF-8
pub const VAR_SELECTOR_SIZE: usize = 3;
/// multi-byte UTF-8 minimum size
pub const MIN_MB_SIZE: usize = 2;
/// multi-byte UTF-8 maximum size
pub const MAX_MB_SIZE: usize = 4;

/// combining dakuten (U+3099) and han-dakuten (U+309A) marks
pub const COMBINING_VOICED: &str = "\u{3099}";
pub const COMBINING_SEMI_VOICED: &str = "\u{309a}";
pub const COMBINING_VOICED_CODE: Code = 0x3099;
pub const COMBINING_SEMI_VOICED_CODE: Code = 0x309a;

const CONTINUATION_MASK: u8 = 0b1100_0000;
const CONTINUATION: u8 = 0b1000_0000;
const TWO_BYTE_LEAD: u8 = 0b1110_0000;
const THREE_BYTE_LEAD: u8 = 0b1111_0000;
const FOUR_BYTE_LEAD: u8 = 0b1111_1000;

fn is_continuation(b: u8) -> bool {
    b & CONTINUATION_MASK == CONTINUATION
}

/// decode one code point starting at `pos`, advancing `pos` at least one byte
/// (invalid input decodes to U+FFFD)
fn decode_one(bytes: &[u8], pos: &mut usize) -> Code {
    let b0 = bytes[*pos];
    *pos += 1;
    if b0 <= MAX_ASCII as u8 {
        return Code::from(b0);
    }
    // first byte is a continuation byte or has more than four leading ones
    if is_continuation(b0) || b0 & FOUR_BYTE_LEAD == FOUR_BYTE_LEAD {
        return REPLACEMENT;
    }
    let len = if b0 & TWO_BYTE_LEAD == CONTINUATION_MASK {
        2
    } else if b0 & THREE_BYTE_LEAD == TWO_BYTE_LEAD {
        3
    } else {
        4
    };
    let mut code = Code::from(b0 & (0xff >> (len + 1)));
    for _ in 1..len {
        match bytes.get(*pos) {
            Some(&b) if is_continuation(b) => {
                code = (code << 6) + Code::from(b & 0x3f);
                *pos += 1;
            }
            _ => return REPLACEMENT,
        }
    }
    let min = match len {
        2 => 0x80,
        3 => MAX_TWO_BYTE + 1,
        _ => MAX_THREE_BYTE + 1,
    };
    if code < min || code > MAX_UNICODE || (MIN_SURROGATE..=MAX_SURROGATE).contains(&code) {
        return REPLACEMENT;
    }
    code
}

/// convert UTF-8 bytes to a sequence of UTF-32 code points
///
/// `max_chars` limits the number of characters converted (`0` means no limit).
pub fn from_utf8(bytes: &[u8], max_chars: usize) -> Vec<Code> {
    let mut result = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() && (max_chars == 0 || result.len() < max_chars) {
        result.push(decode_one(bytes, &mut pos));
    }
    result
}

/// convert the first UTF-8 character of `s` to a code point (`0` if empty)
pub fn get_code(s: &str) -> Code {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return 0;
    }
    decode_one(bytes, &mut 0)
}

/// convert one UTF-32 value to UTF-8 (invalid values become U+FFFD)
pub fn to_utf8(x: Code) -> String {
    char::from_u32(x).map_or_else(|| REPLACEMENT_UTF8.into(), String::from)
}

/// convert a sequence of UTF-32 values to a UTF-8 string
pub fn codes_to_utf8(codes: &[Code]) -> String {
    codes.iter().map(|&c| to_utf8(c)).collect()
}

/// detailed error for invalid UTF-8 found by [`validate_mb_utf8`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Utf8Error {
    /// first byte starts with more than four ones
    CharTooLong,
    /// first byte is a continuation byte
    ContinuationByte,
    /// decodes to a surrogate or a value above U+10FFFF
    InvalidCodePoint,
    /// not enough continuation bytes
    MissingBytes,
    /// encoded with more bytes than the minimum required
    Overlong,
    /// more than one character when `size_one` was requested
    StringTooLong,
}

/// result of [`validate_mb_utf8`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbUtf8Result {
    /// valid multi-byte UTF-8
    Valid,
    /// single-byte (Ascii) first character, nothing multi-byte to validate
    NotMultiByte,
    NotValid(Utf8Error),
}

/// validate the multi-byte UTF-8 character at the start of `bytes`
///
/// Only the first character is examined unless `size_one` is true, in which
/// case any trailing byte results in `StringTooLong`. Examples:
/// ```
/// use utils::utf8::{validate_mb_utf8, MbUtf8Result, Utf8Error};
/// assert_eq!(validate_mb_utf8(b"", false), MbUtf8Result::NotMultiByte);
/// assert_eq!(validate_mb_utf8("a猫".as_bytes(), false), MbUtf8Result::NotMultiByte);
/// assert_eq!(validate_mb_utf8("雪".as_bytes(), true), MbUtf8Result::Valid);
/// assert_eq!(
///     validate_mb_utf8("吹雪".as_bytes(), true),
///     MbUtf8Result::NotValid(Utf8Error::StringTooLong)
/// );
/// ```
pub fn validate_mb_utf8(bytes: &[u8], size_one: bool) -> MbUtf8Result {
    let Some(&b0) = bytes.first() else {
        return MbUtf8Result::NotMultiByte;
    };
    if b0 <= MAX_ASCII as u8 {
        return MbUtf8Result::NotMultiByte;
    }
    let err = MbUtf8Result::NotValid;
    if is_continuation(b0) {
        return err(Utf8Error::ContinuationByte);
    }
    let len = if b0 & TWO_BYTE_LEAD == CONTINUATION_MASK {
        2
    } else if b0 & THREE_BYTE_LEAD == TWO_BYTE_LEAD {
        3
    } else if b0 & FOUR_BYTE_LEAD == THREE_BYTE_LEAD {
        4
    } else {
        return err(Utf8Error::CharTooLong);
    };
    let mut code = Code::from(b0 & (0xff >> (len + 1)));
    for i in 1..len {
        match bytes.get(i) {
            Some(&b) if is_continuation(b) => code = (code << 6) + Code::from(b & 0x3f),
            _ => return err(Utf8Error::MissingBytes),
        }
    }
    match len {
        2 if code <= MAX_ASCII => return err(Utf8Error::Overlong),
        3 if code <= MAX_TWO_BYTE => return err(Utf8Error::Overlong),
        4 if code <= MAX_THREE_BYTE => return err(Utf8Error::Overlong),
        _ => {}
    }
    if code > MAX_UNICODE || (MIN_SURROGATE..=MAX_SURROGATE).contains(&code) {
        return err(Utf8Error::InvalidCodePoint);
    }
    if size_one && bytes.len() > len {
        return err(Utf8Error::StringTooLong);
    }
    MbUtf8Result::Valid
}

/// validate UTF-8 and return the detailed error (`None` means valid,
/// single-byte Ascii included)
pub fn validate_utf8(bytes: &[u8], size_one: bool) -> Option<Utf8Error> {
    match validate_mb_utf8(bytes, size_one) {
        MbUtf8Result::NotValid(e) => Some(e),
        _ => None,
    }
}

/// return true if `bytes` starts with valid multi-byte UTF-8
pub fn is_valid_mb_utf8(bytes: &[u8], size_one: bool) -> bool {
    validate_mb_utf8(bytes, size_one) == MbUtf8Result::Valid
}

/// return true if `bytes` is valid UTF-8 (single-byte Ascii included)
pub fn is_valid_utf8(bytes: &[u8], size_one: bool) -> bool {
    validate_utf8(bytes, size_one).is_none()
}

/// return true if `x` is a single-byte (7-bit Ascii) value
pub fn is_single_byte_code(x: Code) -> bool {
    x <= MAX_ASCII
}

/// checks if the first character of `s` is single-byte
///
/// With `size_one` (the usual case) `s` must be exactly one byte long.
pub fn is_single_byte(s: &str, size_one: bool) -> bool {
    match s.as_bytes().first() {
        Some(&b) => b <= MAX_ASCII as u8 && (!size_one || s.len() == 1),
        None => false,
    }
}

/// return true if all characters of `s` are single-byte
pub fn is_all_single_byte(s: &str) -> bool {
    s.bytes().all(|b| b <= MAX_ASCII as u8)
}

/// return true if any character of `s` is single-byte
pub fn is_any_single_byte(s: &str) -> bool {
    s.bytes().any(|b| b <= MAX_ASCII as u8)
}
