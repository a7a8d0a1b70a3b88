//! Scoped enums used across the Kanji catalog, with string maps and
//! iteration derived via strum.

use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// which official group a Kanji belongs to (or links to), plus a few more
/// groups for less common Kanji:
/// - `Jouyou`: 2136 official Jōyō Kanji
/// - `Jinmei`: 633 official Jinmeiyō Kanji
/// - `LinkedJinmei`: 230 more Jinmeiyō Kanji that are old or variant forms
///   of Jōyō (212) or Jinmei (18)
/// - `LinkedOld`: old or variant Jōyō Kanji not in `LinkedJinmei`
/// - `Frequency`: Kanji in the top 2501 frequency list not in the above
/// - `Extra`: Kanji loaded from 'extra.txt', not in any of the above
/// - `Kentei`: Kanji in a Kentei kyū list not already included
/// - `Ucd`: Kanji only present in the UCD data
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum KanjiType {
    Jouyou,
    Jinmei,
    LinkedJinmei,
    LinkedOld,
    Frequency,
    Extra,
    Kentei,
    Ucd,
    None,
}

/// school grade of a Jōyō Kanji: G1-G6 are the elementary school years and
/// S (secondary school) covers the rest
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum KanjiGrade {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    S,
    None,
}

/// JLPT (Japanese Language Proficiency Test) level, N5 is the easiest and
/// N1 the hardest (only Jōyō and Jinmei Kanji appear in JLPT lists)
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
    None,
}

/// Kanji Kentei (日本漢字能力検定) kyū, K10 is the easiest and K1 the
/// hardest, with KJ2 and KJ1 in between K3/K2 and K2/K1 respectively
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum KenteiKyu {
    K10,
    K9,
    K8,
    K7,
    K6,
    K5,
    K4,
    K3,
    KJ2,
    K2,
    KJ1,
    K1,
    None,
}

/// reason a Kanji was added to the Jinmeiyō list:
/// - `Names`: for use in names
/// - `Print`: for use in publications
/// - `Variant`: allowed variant form
/// - `Moved`: moved out of the Jōyō list
/// - `Simple`: simplified form
/// - `Other`: reason listed as その他
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, Hash)]
pub enum JinmeiReason {
    Names,
    Print,
    Variant,
    Moved,
    Simple,
    Other,
    None,
}

/// the XML property from which a UCD link was loaded. The `*R` variants mean
/// the link was also used to pull in readings ('*' is used in the text form
/// too) and sort first so `linked_readings` is a simple comparison. There is
/// no plain `Semantic` type by design.
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, EnumString, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UcdLinkType {
    #[strum(serialize = "Compatibility*")]
    CompatibilityR,
    #[strum(serialize = "Definition*")]
    DefinitionR,
    #[strum(serialize = "Jinmei*")]
    JinmeiR,
    #[strum(serialize = "Semantic*")]
    SemanticR,
    #[strum(serialize = "Simplified*")]
    SimplifiedR,
    #[strum(serialize = "Traditional*")]
    TraditionalR,
    Compatibility,
    Definition,
    Jinmei,
    Simplified,
    Traditional,
    None,
}

impl UcdLinkType {
    /// true if readings are also pulled in via the link
    pub fn linked_readings(self) -> bool {
        self < UcdLinkType::Compatibility
    }

    /// true for the traditional variants (in either reading flavor)
    pub fn is_traditional(self) -> bool {
        matches!(self, UcdLinkType::Traditional | UcdLinkType::TraditionalR)
    }
}
