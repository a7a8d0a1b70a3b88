pub mod choice;
pub mod converter;
pub mod display;
pub mod kana;
pub mod utf8char;

pub use converter::Converter;
pub use kana::{Kana, KanaEntry, KanaTable, RepeatMark, PROLONG_MARK, REPEAT_ACCENTED, REPEAT_PLAIN};
pub use utf8char::Utf8Char;

use bitflags::bitflags;
use strum_macros::{Display, EnumIter, EnumString};

/// 'source' and 'target' type for [`Converter`]
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum CharType {
    Hiragana,
    Katakana,
    Romaji,
}

bitflags! {
    /// options for [`Converter`]
    ///
    /// `HEPBURN` and `KUNREI` only affect Rōmaji output and are mutually
    /// exclusive there: when both are set the Hepburn value wins since it is
    /// checked first.
    pub struct ConvertFlags: u32 {
        const HEPBURN = 0b0001;
        const KUNREI = 0b0010;
        const NO_PROLONG_MARK = 0b0100;
        const REMOVE_SPACES = 0b1000;
    }
}

impl ConvertFlags {
    /// pipe separated flag names, "None" when empty
    pub fn to_flag_string(self) -> String {
        if self.is_empty() {
            return "None".into();
        }
        let names = [
            (ConvertFlags::HEPBURN, "Hepburn"),
            (ConvertFlags::KUNREI, "Kunrei"),
            (ConvertFlags::NO_PROLONG_MARK, "NoProlongMark"),
            (ConvertFlags::REMOVE_SPACES, "RemoveSpaces"),
        ];
        names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn char_type_strings() {
        assert_eq!(CharType::Hiragana.to_string(), "Hiragana");
        assert_eq!(CharType::from_str("Romaji").unwrap(), CharType::Romaji);
        assert_eq!(CharType::iter().count(), 3);
    }

    #[test]
    fn flag_strings() {
        assert_eq!(ConvertFlags::empty().to_flag_string(), "None");
        assert_eq!(ConvertFlags::KUNREI.to_flag_string(), "Kunrei");
        assert_eq!(
            (ConvertFlags::NO_PROLONG_MARK | ConvertFlags::REMOVE_SPACES).to_flag_string(),
            "NoProlongMark|RemoveSpaces"
        );
    }
}
