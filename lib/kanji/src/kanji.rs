//! The Kanji record: shared fields plus a tagged payload per catalog type.
//!
//! The original official lists drive the taxonomy: Jōyō and Jinmeiyō Kanji
//! come from their own data files, 'linked' Kanji are old or variant forms
//! pointing at a primary Kanji, and the remaining types cover Kanji that
//! only appear in the frequency list, a Kentei list or the UCD data.

use crate::morohashi::MorohashiId;
use crate::radical::RadicalRef;
use crate::strokes::Strokes;
use crate::types::{JinmeiReason, JlptLevel, KanjiGrade, KanjiType, KenteiKyu};
use bitflags::bitflags;
use kana::Utf8Char;
use std::cmp::Ordering;
use std::sync::Arc;

pub type KanjiRef = Arc<Kanji>;
pub type NelsonId = u16;
/// frequency rank, 1 is the most common and 2501 the last ranked
pub type Frequency = u16;
pub type Year = u16;

/// link names pulled from UCD data for the non-official Kanji types: when
/// `traditional` is set the names are 'old' forms, otherwise the first name
/// is the 'new' (more standard) form
#[derive(Clone, Debug, Default)]
pub struct UcdLinks {
    names: Vec<String>,
    traditional: bool,
    linked_readings: bool,
}

impl UcdLinks {
    pub fn new(names: Vec<String>, traditional: bool, linked_readings: bool) -> Self {
        UcdLinks {
            names,
            traditional,
            linked_readings,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn traditional(&self) -> bool {
        self.traditional
    }

    pub fn linked_readings(&self) -> bool {
        self.linked_readings
    }
}

/// type specific payload
#[derive(Debug)]
pub enum KanjiKind {
    /// one of the 2,136 official Jōyō Kanji
    Jouyou {
        number: u16,
        year: Option<Year>,
        grade: KanjiGrade,
        level: JlptLevel,
        kyu: KenteiKyu,
        frequency: Option<Frequency>,
        old_names: Vec<String>,
        meaning: String,
        reading: String,
    },
    /// one of the 633 official Jinmeiyō Kanji
    Jinmei {
        number: u16,
        year: Option<Year>,
        reason: JinmeiReason,
        level: JlptLevel,
        kyu: KenteiKyu,
        frequency: Option<Frequency>,
        old_names: Vec<String>,
        meaning: String,
        reading: String,
    },
    /// manually curated 'fairly common' Kanji outside the official lists
    Extra {
        number: u16,
        kyu: KenteiKyu,
        meaning: String,
        reading: String,
        new_name: Option<String>,
    },
    /// official Jinmeiyō variant linking to its standard form
    LinkedJinmei {
        link: KanjiRef,
        frequency: Option<Frequency>,
        kyu: KenteiKyu,
    },
    /// published Jōyō variant that isn't a LinkedJinmei
    LinkedOld {
        link: KanjiRef,
        frequency: Option<Frequency>,
        kyu: KenteiKyu,
    },
    /// only appears in the top 2501 frequency list
    Frequency {
        frequency: Frequency,
        kyu: KenteiKyu,
        reading: String,
        meaning: String,
        links: UcdLinks,
    },
    /// only appears in a Kentei kyū list
    Kentei {
        kyu: KenteiKyu,
        reading: String,
        meaning: String,
        links: UcdLinks,
    },
    /// only appears in the UCD data
    Ucd {
        reading: String,
        meaning: String,
        links: UcdLinks,
    },
}

bitflags! {
    /// field selection for [`Kanji::info`]
    pub struct KanjiInfo: u16 {
        const RADICAL = 0x001;
        const STROKES = 0x002;
        const PINYIN = 0x004;
        const GRADE = 0x008;
        const LEVEL = 0x010;
        const FREQ = 0x020;
        const NEW = 0x040;
        const OLD = 0x080;
        const KYU = 0x100;
        const ALL = 0x1ff;
    }
}

/// legend for the suffixes produced by [`Kanji::qualified_name`]
pub const QUALIFIED_NAME_LEGEND: &str =
    ".=常用 '=JLPT \"=Freq ^=人名用 ~=LinkJ %=LinkO +=Extra @=検定 #=1級 *=Ucd";

/// suffix per qualified-name rank, ordered most to least common
const QUALIFIED_NAMES: [char; 10] = ['.', '\'', '"', '^', '~', '%', '+', '@', '#', '*'];

#[derive(Debug)]
pub struct Kanji {
    pub(crate) name: String,
    pub(crate) compatibility_name: Option<String>,
    pub(crate) radical: RadicalRef,
    pub(crate) strokes: Strokes,
    pub(crate) pinyin: Option<String>,
    pub(crate) morohashi_id: Option<MorohashiId>,
    pub(crate) nelson_ids: Vec<NelsonId>,
    pub(crate) kind: KanjiKind,
}

impl Kanji {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// true if the name includes a variation selector
    pub fn is_variant(&self) -> bool {
        Utf8Char::is_char_with_variation_selector(&self.name)
    }

    pub fn non_variant_name(&self) -> &str {
        Utf8Char::no_variation_selector(&self.name)
    }

    /// the UCD compatibility form when this Kanji was loaded with a
    /// variation selector, otherwise just the name
    pub fn compatibility_name(&self) -> &str {
        self.compatibility_name.as_deref().unwrap_or(&self.name)
    }

    pub fn radical(&self) -> &RadicalRef {
        &self.radical
    }

    pub fn strokes(&self) -> Strokes {
        self.strokes
    }

    pub fn pinyin(&self) -> Option<&str> {
        self.pinyin.as_deref()
    }

    pub fn morohashi_id(&self) -> Option<MorohashiId> {
        self.morohashi_id
    }

    pub fn nelson_ids(&self) -> &[NelsonId] {
        &self.nelson_ids
    }

    pub fn kanji_type(&self) -> KanjiType {
        match &self.kind {
            KanjiKind::Jouyou { .. } => KanjiType::Jouyou,
            KanjiKind::Jinmei { .. } => KanjiType::Jinmei,
            KanjiKind::LinkedJinmei { .. } => KanjiType::LinkedJinmei,
            KanjiKind::LinkedOld { .. } => KanjiType::LinkedOld,
            KanjiKind::Frequency { .. } => KanjiType::Frequency,
            KanjiKind::Extra { .. } => KanjiType::Extra,
            KanjiKind::Kentei { .. } => KanjiType::Kentei,
            KanjiKind::Ucd { .. } => KanjiType::Ucd,
        }
    }

    pub fn is(&self, t: KanjiType) -> bool {
        self.kanji_type() == t
    }

    pub fn kind(&self) -> &KanjiKind {
        &self.kind
    }

    pub fn frequency(&self) -> Option<Frequency> {
        match &self.kind {
            KanjiKind::Jouyou { frequency, .. }
            | KanjiKind::Jinmei { frequency, .. }
            | KanjiKind::LinkedJinmei { frequency, .. }
            | KanjiKind::LinkedOld { frequency, .. } => *frequency,
            KanjiKind::Frequency { frequency, .. } => Some(*frequency),
            _ => None,
        }
    }

    pub fn frequency_or(&self, default: Frequency) -> Frequency {
        self.frequency().unwrap_or(default)
    }

    pub fn frequency_or_max(&self) -> Frequency {
        self.frequency_or(Frequency::MAX)
    }

    pub fn grade(&self) -> KanjiGrade {
        match &self.kind {
            KanjiKind::Jouyou { grade, .. } => *grade,
            _ => KanjiGrade::None,
        }
    }

    pub fn level(&self) -> JlptLevel {
        match &self.kind {
            KanjiKind::Jouyou { level, .. } | KanjiKind::Jinmei { level, .. } => *level,
            _ => JlptLevel::None,
        }
    }

    pub fn kyu(&self) -> KenteiKyu {
        match &self.kind {
            KanjiKind::Jouyou { kyu, .. }
            | KanjiKind::Jinmei { kyu, .. }
            | KanjiKind::Extra { kyu, .. }
            | KanjiKind::LinkedJinmei { kyu, .. }
            | KanjiKind::LinkedOld { kyu, .. }
            | KanjiKind::Frequency { kyu, .. }
            | KanjiKind::Kentei { kyu, .. } => *kyu,
            KanjiKind::Ucd { .. } => KenteiKyu::None,
        }
    }

    pub fn reason(&self) -> JinmeiReason {
        match &self.kind {
            KanjiKind::Jinmei { reason, .. } => *reason,
            _ => JinmeiReason::None,
        }
    }

    pub fn year(&self) -> Option<Year> {
        match &self.kind {
            KanjiKind::Jouyou { year, .. } | KanjiKind::Jinmei { year, .. } => *year,
            _ => None,
        }
    }

    pub fn link(&self) -> Option<&KanjiRef> {
        match &self.kind {
            KanjiKind::LinkedJinmei { link, .. } | KanjiKind::LinkedOld { link, .. } => {
                Some(link)
            }
            _ => None,
        }
    }

    /// true if the meaning and reading come via a link
    pub fn linked_readings(&self) -> bool {
        match &self.kind {
            KanjiKind::LinkedJinmei { .. } | KanjiKind::LinkedOld { .. } => true,
            KanjiKind::Frequency { links, .. }
            | KanjiKind::Kentei { links, .. }
            | KanjiKind::Ucd { links, .. } => links.linked_readings,
            _ => false,
        }
    }

    /// the official 'old' (旧字体) forms: 365 Jōyō and 18 Jinmei Kanji have
    /// them, and UCD-sourced Kanji inherit traditional links
    pub fn old_names(&self) -> &[String] {
        match &self.kind {
            KanjiKind::Jouyou { old_names, .. } | KanjiKind::Jinmei { old_names, .. } => {
                old_names
            }
            KanjiKind::Frequency { links, .. }
            | KanjiKind::Kentei { links, .. }
            | KanjiKind::Ucd { links, .. }
                if links.traditional =>
            {
                &links.names
            }
            _ => &[],
        }
    }

    /// the 'new' (more standard) form: the link target for linked Kanji, a
    /// UCD forward link otherwise
    pub fn new_name(&self) -> Option<&str> {
        match &self.kind {
            KanjiKind::Extra { new_name, .. } => new_name.as_deref(),
            KanjiKind::LinkedJinmei { link, .. } | KanjiKind::LinkedOld { link, .. } => {
                Some(link.name())
            }
            KanjiKind::Frequency { links, .. }
            | KanjiKind::Kentei { links, .. }
            | KanjiKind::Ucd { links, .. }
                if !links.traditional =>
            {
                links.names.first().map(String::as_str)
            }
            _ => None,
        }
    }

    pub fn meaning(&self) -> &str {
        match &self.kind {
            KanjiKind::Jouyou { meaning, .. }
            | KanjiKind::Jinmei { meaning, .. }
            | KanjiKind::Extra { meaning, .. }
            | KanjiKind::Frequency { meaning, .. }
            | KanjiKind::Kentei { meaning, .. }
            | KanjiKind::Ucd { meaning, .. } => meaning,
            KanjiKind::LinkedJinmei { link, .. } | KanjiKind::LinkedOld { link, .. } => {
                link.meaning()
            }
        }
    }

    pub fn reading(&self) -> &str {
        match &self.kind {
            KanjiKind::Jouyou { reading, .. }
            | KanjiKind::Jinmei { reading, .. }
            | KanjiKind::Extra { reading, .. }
            | KanjiKind::Frequency { reading, .. }
            | KanjiKind::Kentei { reading, .. }
            | KanjiKind::Ucd { reading, .. } => reading,
            KanjiKind::LinkedJinmei { link, .. } | KanjiKind::LinkedOld { link, .. } => {
                link.reading()
            }
        }
    }

    /// row number in the source file for the types loaded from custom files
    pub fn number(&self) -> Option<u16> {
        match &self.kind {
            KanjiKind::Jouyou { number, .. }
            | KanjiKind::Jinmei { number, .. }
            | KanjiKind::Extra { number, .. } => Some(*number),
            _ => None,
        }
    }

    pub fn has_grade(&self) -> bool {
        self.grade() != KanjiGrade::None
    }

    pub fn has_level(&self) -> bool {
        self.level() != JlptLevel::None
    }

    pub fn has_kyu(&self) -> bool {
        self.kyu() != KenteiKyu::None
    }

    pub fn has_meaning(&self) -> bool {
        !self.meaning().is_empty()
    }

    pub fn has_reading(&self) -> bool {
        !self.reading().is_empty()
    }

    pub fn has_nelson_ids(&self) -> bool {
        !self.nelson_ids.is_empty()
    }

    /// extra info for types loaded from custom files, like "#123 2010" for
    /// Jōyō or "#5 1951 [Names]" for Jinmei
    pub fn extra_type_info(&self) -> Option<String> {
        match &self.kind {
            KanjiKind::Jouyou { number, year, .. } => Some(match year {
                Some(y) => format!("#{number} {y}"),
                None => format!("#{number}"),
            }),
            KanjiKind::Jinmei {
                number,
                year,
                reason,
                ..
            } => Some(match year {
                Some(y) => format!("#{number} {y} [{reason}]"),
                None => format!("#{number} [{reason}]"),
            }),
            KanjiKind::Extra { number, .. } => Some(format!("#{number}")),
            _ => None,
        }
    }

    /// comma separated summary of the requested fields. Multiple old names
    /// are separated by '／' and a linked name gets a '*' suffix when the
    /// readings come via the link.
    pub fn info(&self, fields: KanjiInfo) -> String {
        let mut parts = Vec::new();
        if fields.contains(KanjiInfo::RADICAL) {
            parts.push(format!("Rad {}", self.radical));
        }
        if fields.contains(KanjiInfo::STROKES) {
            parts.push(format!("Strokes {}", self.strokes));
        }
        if fields.contains(KanjiInfo::PINYIN) {
            if let Some(p) = &self.pinyin {
                parts.push(p.clone());
            }
        }
        if fields.contains(KanjiInfo::GRADE) && self.has_grade() {
            parts.push(self.grade().to_string());
        }
        if fields.contains(KanjiInfo::LEVEL) && self.has_level() {
            parts.push(self.level().to_string());
        }
        if fields.contains(KanjiInfo::FREQ) {
            if let Some(f) = self.frequency() {
                parts.push(format!("Frq {f}"));
            }
        }
        let star = if self.linked_readings() { "*" } else { "" };
        if let Some(new_name) = self.new_name() {
            if fields.contains(KanjiInfo::NEW) {
                parts.push(format!("New {new_name}{star}"));
            }
        } else if fields.contains(KanjiInfo::OLD) && !self.old_names().is_empty() {
            parts.push(format!("Old {}{star}", self.old_names().join("／")));
        }
        if fields.contains(KanjiInfo::KYU) && self.has_kyu() {
            parts.push(self.kyu().to_string());
        }
        parts.join(", ")
    }

    /// name plus a rank suffix (see [`QUALIFIED_NAME_LEGEND`])
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.name, QUALIFIED_NAMES[self.qualified_name_rank() as usize])
    }

    /// ordering used for display: Jōyō first, then JLPT, then anything with
    /// a frequency and so on, with ties broken by strokes, frequency and
    /// the compatibility name's Unicode value
    pub fn order_by_qualified_name(&self, other: &Kanji) -> Ordering {
        self.qualified_name_rank()
            .cmp(&other.qualified_name_rank())
            .then_with(|| self.order_by_strokes(other))
    }

    pub fn order_by_strokes(&self, other: &Kanji) -> Ordering {
        self.strokes
            .cmp(&other.strokes)
            .then_with(|| self.frequency_or_max().cmp(&other.frequency_or_max()))
            .then_with(|| {
                let name = self.compatibility_name();
                name.chars().cmp(other.compatibility_name().chars())
            })
    }

    fn qualified_name_rank(&self) -> u16 {
        match self.kanji_type() {
            KanjiType::Jouyou => 0,
            _ if self.has_level() => 1,
            _ if self.frequency().is_some() => 2,
            KanjiType::Jinmei => 3,
            KanjiType::LinkedJinmei => 4,
            KanjiType::LinkedOld => 5,
            KanjiType::Extra => 6,
            KanjiType::Ucd => 9,
            _ if self.kyu() != KenteiKyu::K1 => 7,
            _ => 8,
        }
    }
}

impl PartialEq for Kanji {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Kanji {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical::Radical;

    fn radical() -> RadicalRef {
        Arc::new(Radical::new(1, "一", "一部（いちぶ）", "イチ", Vec::new()))
    }

    fn jouyou(name: &str, strokes: u8, frequency: Option<Frequency>, level: JlptLevel) -> Kanji {
        Kanji {
            name: name.into(),
            compatibility_name: None,
            radical: radical(),
            strokes: Strokes::new(strokes).unwrap(),
            pinyin: Some("yī".into()),
            morohashi_id: Some("1".parse().unwrap()),
            nelson_ids: vec![1],
            kind: KanjiKind::Jouyou {
                number: 1,
                year: None,
                grade: KanjiGrade::G1,
                level,
                kyu: KenteiKyu::K10,
                frequency,
                old_names: Vec::new(),
                meaning: "one".into(),
                reading: "イチ、イツ、ひと-、ひと.つ".into(),
            },
        }
    }

    fn kentei(name: &str, strokes: u8, kyu: KenteiKyu) -> Kanji {
        Kanji {
            name: name.into(),
            compatibility_name: None,
            radical: radical(),
            strokes: Strokes::new(strokes).unwrap(),
            pinyin: None,
            morohashi_id: None,
            nelson_ids: Vec::new(),
            kind: KanjiKind::Kentei {
                kyu,
                reading: String::new(),
                meaning: String::new(),
                links: UcdLinks::default(),
            },
        }
    }

    #[test]
    fn accessors() {
        let k = jouyou("一", 1, Some(2), JlptLevel::N5);
        assert_eq!(k.kanji_type(), KanjiType::Jouyou);
        assert!(k.is(KanjiType::Jouyou));
        assert_eq!(k.frequency(), Some(2));
        assert_eq!(k.grade(), KanjiGrade::G1);
        assert_eq!(k.level(), JlptLevel::N5);
        assert_eq!(k.kyu(), KenteiKyu::K10);
        assert_eq!(k.reason(), JinmeiReason::None);
        assert_eq!(k.number(), Some(1));
        assert!(k.has_meaning() && k.has_reading());
        assert!(!k.is_variant());
        assert_eq!(k.compatibility_name(), "一");
    }

    #[test]
    fn info_string() {
        let k = jouyou("一", 1, Some(2), JlptLevel::N5);
        assert_eq!(
            k.info(KanjiInfo::ALL),
            "Rad 一(1), Strokes 1, yī, G1, N5, Frq 2, K10"
        );
        assert_eq!(k.info(KanjiInfo::GRADE | KanjiInfo::FREQ), "G1, Frq 2");
        let no_freq = jouyou("二", 2, None, JlptLevel::None);
        assert_eq!(no_freq.info(KanjiInfo::FREQ | KanjiInfo::LEVEL), "");
    }

    #[test]
    fn qualified_names() {
        assert_eq!(jouyou("一", 1, Some(2), JlptLevel::N5).qualified_name(), "一.");
        assert_eq!(kentei("唖", 10, KenteiKyu::KJ1).qualified_name(), "唖@");
        assert_eq!(kentei("丒", 4, KenteiKyu::K1).qualified_name(), "丒#");
    }

    #[test]
    fn ordering() {
        let a = jouyou("一", 1, Some(2), JlptLevel::N5);
        let b = kentei("丒", 4, KenteiKyu::K1);
        assert_eq!(a.order_by_qualified_name(&b), Ordering::Less);
        assert_eq!(b.order_by_qualified_name(&a), Ordering::Greater);
        // same rank falls back to strokes
        let c = jouyou("二", 2, Some(9), JlptLevel::N5);
        assert_eq!(a.order_by_qualified_name(&c), Ordering::Less);
        // same strokes falls back to frequency
        let d = jouyou("乙", 1, Some(100), JlptLevel::N5);
        assert_eq!(a.order_by_strokes(&d), Ordering::Less);
        // no frequency sorts after any frequency
        let e = jouyou("丁", 1, None, JlptLevel::N5);
        assert_eq!(a.order_by_strokes(&e), Ordering::Less);
    }

    #[test]
    fn linked_kanji_proxy_meaning_and_reading() {
        let primary = Arc::new(jouyou("一", 1, Some(2), JlptLevel::N5));
        let linked = Kanji {
            name: "壱".into(),
            compatibility_name: None,
            radical: radical(),
            strokes: Strokes::new(7).unwrap(),
            pinyin: None,
            morohashi_id: None,
            nelson_ids: Vec::new(),
            kind: KanjiKind::LinkedOld {
                link: primary.clone(),
                frequency: None,
                kyu: KenteiKyu::None,
            },
        };
        assert_eq!(linked.meaning(), "one");
        assert_eq!(linked.reading(), primary.reading());
        assert!(linked.linked_readings());
        assert_eq!(linked.new_name(), Some("一"));
        assert_eq!(linked.link().unwrap().name(), "一");
        assert_eq!(linked.qualified_name(), "壱%");
    }
}
