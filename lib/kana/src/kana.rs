//! The Kana table: monographs, digraphs and their accented (dakuten and
//! han-dakuten) forms, with Rōmaji variants and three lookup maps.
//!
//! A 'Monograph' is a single Kana character (large or small) and a 'Digraph'
//! is a normal sized Kana followed by a small Kana (one of the 5 vowels, 3
//! y's or 'wa'). Accent relationships are kept as indices into one static
//! arena so the plain and accented forms can reach each other both ways.

use crate::{CharType, ConvertFlags};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::Deref;
use utils::block::{is_all_hiragana, is_all_katakana};
use utils::utf8::is_all_single_byte;

/// the Katakana long vowel mark, officially in the Katakana block but it can
/// also rarely appear in (non-standard) Hiragana words like らーめん
pub const PROLONG_MARK: &str = "ー";

/// one Kana symbol or digraph with its Rōmaji spellings
#[derive(Debug)]
pub struct Kana {
    romaji: &'static str,
    hiragana: &'static str,
    katakana: &'static str,
    variants: &'static [&'static str],
    hepburn: Option<&'static str>,
    kunrei: Option<&'static str>,
    kunrei_variant: bool,
}

impl Kana {
    /// the canonical Rōmaji form, unique across the whole table (usually
    /// Modern Hepburn, but sometimes Nihon Shiki to keep the value unique,
    /// like "di" for ぢ and "du" for づ)
    pub fn romaji(&self) -> &'static str {
        self.romaji
    }

    pub fn hiragana(&self) -> &'static str {
        self.hiragana
    }

    pub fn katakana(&self) -> &'static str {
        self.katakana
    }

    /// additional accepted Rōmaji spellings ("kwa" for クァ, "hu" for ふ, ...)
    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Modern Hepburn output value for the few cases where it differs from
    /// the unique `romaji` field (づ → "zu")
    pub fn hepburn(&self) -> Option<&'static str> {
        self.hepburn
    }

    /// Kunrei Shiki output value (ぢゃ → "zya")
    pub fn kunrei(&self) -> Option<&'static str> {
        self.kunrei
    }

    /// true if the first entry of `variants` is the Kunrei Shiki spelling
    pub fn kunrei_variant(&self) -> bool {
        self.kunrei_variant
    }

    /// Rōmaji output honoring the Hepburn and Kunrei conversion flags
    pub fn get_romaji(&self, flags: ConvertFlags) -> &'static str {
        if flags.contains(ConvertFlags::HEPBURN) {
            if let Some(h) = self.hepburn {
                return h;
            }
        }
        if flags.contains(ConvertFlags::KUNREI) {
            if self.kunrei_variant {
                return self.variants[0];
            }
            if let Some(k) = self.kunrei {
                return k;
            }
        }
        self.romaji
    }

    /// value in the given target script
    pub fn get(&self, target: CharType, flags: ConvertFlags) -> &'static str {
        match target {
            CharType::Romaji => self.get_romaji(flags),
            CharType::Hiragana => self.hiragana,
            CharType::Katakana => self.katakana,
        }
    }

    /// Rōmaji with the first letter doubled for sokuon (促音) output, with
    /// the standard Hepburn substitution of 't' for 'c' ("tchi" not "cchi")
    pub fn sokuon_romaji(&self, flags: ConvertFlags) -> String {
        let r = self.get_romaji(flags);
        let first = r.as_bytes()[0] as char;
        format!("{}{r}", if first == 'c' { 't' } else { first })
    }

    pub fn contains_kana(&self, s: &str) -> bool {
        s == self.hiragana || s == self.katakana
    }

    fn validate(&self) {
        assert!(
            !self.romaji.is_empty() && self.romaji.len() < 4,
            "bad romaji '{}'",
            self.romaji
        );
        assert!(is_all_single_byte(self.romaji), "bad romaji '{}'", self.romaji);
        for v in self.variants {
            assert!(!v.is_empty() && v.len() < 4, "bad variant '{v}'");
        }
        assert!(
            self.hiragana.len() == 3 || self.hiragana.len() == 6,
            "bad hiragana '{}'",
            self.hiragana
        );
        assert!(
            self.katakana.len() == 3 || self.katakana.len() == 6,
            "bad katakana '{}'",
            self.katakana
        );
        assert!(is_all_hiragana(self.hiragana), "'{}' is not hiragana", self.hiragana);
        assert!(is_all_katakana(self.katakana), "'{}' is not katakana", self.katakana);
        if self.kunrei_variant {
            assert!(!self.variants.is_empty() && self.kunrei.is_none());
        }
    }
}

const fn k(romaji: &'static str, hiragana: &'static str, katakana: &'static str) -> Kana {
    Kana {
        romaji,
        hiragana,
        katakana,
        variants: &[],
        hepburn: None,
        kunrei: None,
        kunrei_variant: false,
    }
}

const fn hk(
    romaji: &'static str,
    hiragana: &'static str,
    katakana: &'static str,
    hepburn: &'static str,
    kunrei: &'static str,
) -> Kana {
    Kana {
        romaji,
        hiragana,
        katakana,
        variants: &[],
        hepburn: Some(hepburn),
        kunrei: Some(kunrei),
        kunrei_variant: false,
    }
}

const fn v(
    romaji: &'static str,
    hiragana: &'static str,
    katakana: &'static str,
    variants: &'static [&'static str],
) -> Kana {
    Kana {
        romaji,
        hiragana,
        katakana,
        variants,
        hepburn: None,
        kunrei: None,
        kunrei_variant: false,
    }
}

const fn kv(
    romaji: &'static str,
    hiragana: &'static str,
    katakana: &'static str,
    variants: &'static [&'static str],
) -> Kana {
    Kana {
        romaji,
        hiragana,
        katakana,
        variants,
        hepburn: None,
        kunrei: None,
        kunrei_variant: true,
    }
}

/// monographs and digraphs with no dakuten or han-dakuten versions
static PLAIN_KANA: &[Kana] = &[
    // --- あ 行 ---
    k("a", "あ", "ア"),
    k("na", "な", "ナ"),
    k("ma", "ま", "マ"),
    k("ya", "や", "ヤ"),
    k("ra", "ら", "ラ"),
    k("wa", "わ", "ワ"),
    // Digraphs
    k("qwa", "くゎ", "クヮ"),
    k("swa", "すぁ", "スァ"),
    k("tsa", "つぁ", "ツァ"),
    k("nya", "にゃ", "ニャ"),
    v("fa", "ふぁ", "ファ", &["fwa", "hwa"]),
    k("fya", "ふゃ", "フャ"),
    k("mya", "みゃ", "ミャ"),
    k("rya", "りゃ", "リャ"),
    // --- い 行 ---
    k("i", "い", "イ"),
    k("ni", "に", "ニ"),
    k("mi", "み", "ミ"),
    k("ri", "り", "リ"),
    hk("wyi", "ゐ", "ヰ", "i", "i"),
    // Digraphs
    k("swi", "すぃ", "スィ"),
    k("tsi", "つぃ", "ツィ"),
    k("nyi", "にぃ", "ニィ"),
    v("fi", "ふぃ", "フィ", &["fyi", "fwi", "hwi"]),
    k("myi", "みぃ", "ミィ"),
    k("ryi", "りぃ", "リィ"),
    // --- う 行 ---
    k("nu", "ぬ", "ヌ"),
    k("mu", "む", "ム"),
    k("yu", "ゆ", "ユ"),
    k("ru", "る", "ル"),
    // Digraphs
    k("swu", "すぅ", "スゥ"),
    k("nyu", "にゅ", "ニュ"),
    k("fwu", "ふぅ", "フゥ"),
    k("fyu", "ふゅ", "フュ"),
    k("myu", "みゅ", "ミュ"),
    k("ryu", "りゅ", "リュ"),
    // --- え 行 ---
    k("e", "え", "エ"),
    k("ne", "ね", "ネ"),
    k("me", "め", "メ"),
    k("re", "れ", "レ"),
    hk("wye", "ゑ", "ヱ", "e", "e"),
    // Digraphs
    k("ye", "いぇ", "イェ"),
    k("swe", "すぇ", "スェ"),
    k("tse", "つぇ", "ツェ"),
    k("nye", "にぇ", "ニェ"),
    v("fe", "ふぇ", "フェ", &["fye", "fwe", "hwe"]),
    k("mye", "みぇ", "ミェ"),
    k("rye", "りぇ", "リェ"),
    // --- お 行 ---
    k("o", "お", "オ"),
    k("no", "の", "ノ"),
    k("mo", "も", "モ"),
    k("yo", "よ", "ヨ"),
    k("ro", "ろ", "ロ"),
    hk("wo", "を", "ヲ", "o", "o"),
    // Digraphs
    k("swo", "すぉ", "スォ"),
    k("tso", "つぉ", "ツォ"),
    k("nyo", "にょ", "ニョ"),
    v("fo", "ふぉ", "フォ", &["fwo", "hwo"]),
    k("fyo", "ふょ", "フョ"),
    k("myo", "みょ", "ミョ"),
    k("ryo", "りょ", "リョ"),
    // Digraphs that only have a dakuten version
    k("va", "ゔぁ", "ヴァ"),
    k("vo", "ゔぉ", "ヴォ"),
    k("vya", "ゔゃ", "ヴャ"),
    k("vyu", "ゔゅ", "ヴュ"),
    k("vyo", "ゔょ", "ヴョ"),
    // 12 small letters (5 vowels, 2 k's, 3 y's, small 'wa' and small 'tsu'),
    // prefer the 'l' versions for Rōmaji output
    v("la", "ぁ", "ァ", &["xa"]),
    v("li", "ぃ", "ィ", &["xi"]),
    v("lu", "ぅ", "ゥ", &["xu"]),
    v("le", "ぇ", "ェ", &["xe", "lye", "xye"]),
    v("lo", "ぉ", "ォ", &["xo"]),
    v("lka", "ゕ", "ヵ", &["xka"]),
    v("lke", "ゖ", "ヶ", &["xke"]),
    v("lya", "ゃ", "ャ", &["xya"]),
    v("lyu", "ゅ", "ュ", &["xyu"]),
    v("lyo", "ょ", "ョ", &["xyo"]),
    v("lwa", "ゎ", "ヮ", &["xwa"]),
    v("ltu", "っ", "ッ", &["xtu"]),
    // ん
    k("n", "ん", "ン"),
];

/// kana with a dakuten version (but no han-dakuten, so not the 'h' row)
static DAKUTEN_KANA: &[(Kana, Kana)] = &[
    // --- あ 行 ---
    (k("ka", "か", "カ"), k("ga", "が", "ガ")),
    (k("sa", "さ", "サ"), k("za", "ざ", "ザ")),
    (k("ta", "た", "タ"), k("da", "だ", "ダ")),
    (k("kya", "きゃ", "キャ"), k("gya", "ぎゃ", "ギャ")),
    // Digraphs
    (v("qa", "くぁ", "クァ", &["kwa"]), k("gwa", "ぐぁ", "グァ")),
    (kv("sha", "しゃ", "シャ", &["sya"]), kv("ja", "じゃ", "ジャ", &["zya", "jya"])),
    (kv("cha", "ちゃ", "チャ", &["tya"]), hk("dya", "ぢゃ", "ヂャ", "ja", "zya")),
    (k("tha", "てゃ", "テャ"), k("dha", "でゃ", "デャ")),
    (k("twa", "とぁ", "トァ"), k("dwa", "どぁ", "ドァ")),
    // --- い 行 ---
    (k("ki", "き", "キ"), k("gi", "ぎ", "ギ")),
    (kv("shi", "し", "シ", &["si"]), kv("ji", "じ", "ジ", &["zi"])),
    (kv("chi", "ち", "チ", &["ti"]), hk("di", "ぢ", "ヂ", "ji", "zi")),
    // Digraphs
    (k("wi", "うぃ", "ウィ"), k("vi", "ゔぃ", "ヴィ")),
    (v("qi", "くぃ", "クィ", &["kwi", "qwi"]), k("gwi", "ぐぃ", "グィ")),
    (k("kyi", "きぃ", "キィ"), k("gyi", "ぎぃ", "ギィ")),
    (k("syi", "しぃ", "シィ"), v("jyi", "じぃ", "ジィ", &["zyi"])),
    (k("tyi", "ちぃ", "チィ"), k("dyi", "ぢぃ", "ヂィ")),
    (k("twi", "とぃ", "トィ"), k("dwi", "どぃ", "ドィ")),
    (k("thi", "てぃ", "ティ"), k("dhi", "でぃ", "ディ")),
    // --- う 行 ---
    (v("u", "う", "ウ", &["wu"]), k("vu", "ゔ", "ヴ")),
    (k("ku", "く", "ク"), k("gu", "ぐ", "グ")),
    (k("su", "す", "ス"), k("zu", "ず", "ズ")),
    (kv("tsu", "つ", "ツ", &["tu"]), hk("du", "づ", "ヅ", "zu", "zu")),
    // Digraphs
    (k("kyu", "きゅ", "キュ"), k("gyu", "ぎゅ", "ギュ")),
    (v("qu", "くぅ", "クゥ", &["kwu", "qwu"]), k("gwu", "ぐぅ", "グゥ")),
    (kv("shu", "しゅ", "シュ", &["syu"]), kv("ju", "じゅ", "ジュ", &["zyu", "jyu"])),
    (kv("chu", "ちゅ", "チュ", &["tyu"]), hk("dyu", "ぢゅ", "ヂュ", "ju", "zyu")),
    (k("thu", "てゅ", "テュ"), k("dhu", "でゅ", "デュ")),
    (k("twu", "とぅ", "トゥ"), k("dwu", "どぅ", "ドゥ")),
    // --- え 行 ---
    (k("ke", "け", "ケ"), k("ge", "げ", "ゲ")),
    (k("kye", "きぇ", "キェ"), k("gye", "ぎぇ", "ギェ")),
    (k("se", "せ", "セ"), k("ze", "ぜ", "ゼ")),
    (k("te", "て", "テ"), k("de", "で", "デ")),
    // Digraphs
    (k("we", "うぇ", "ウェ"), k("ve", "ゔぇ", "ヴェ")),
    (v("qe", "くぇ", "クェ", &["kwe", "qwe"]), k("gwe", "ぐぇ", "グェ")),
    (k("she", "しぇ", "シェ"), v("je", "じぇ", "ジェ", &["zye", "jye"])),
    (v("che", "ちぇ", "チェ", &["tye"]), k("dye", "ぢぇ", "ヂェ")),
    (k("the", "てぇ", "テェ"), k("dhe", "でぇ", "デェ")),
    (k("twe", "とぇ", "トェ"), k("dwe", "どぇ", "ドェ")),
    // --- お 行 ---
    (k("ko", "こ", "コ"), k("go", "ご", "ゴ")),
    (k("so", "そ", "ソ"), k("zo", "ぞ", "ゾ")),
    (k("to", "と", "ト"), k("do", "ど", "ド")),
    // Digraphs
    (k("kyo", "きょ", "キョ"), k("gyo", "ぎょ", "ギョ")),
    (v("qo", "くぉ", "クォ", &["kwo", "qwo"]), k("gwo", "ぐぉ", "グォ")),
    (kv("sho", "しょ", "ショ", &["syo"]), kv("jo", "じょ", "ジョ", &["zyo", "jyo"])),
    (kv("cho", "ちょ", "チョ", &["tyo"]), hk("dyo", "ぢょ", "ヂョ", "jo", "zyo")),
    (k("tho", "てょ", "テョ"), k("dho", "でょ", "デョ")),
    (k("two", "とぉ", "トォ"), k("dwo", "どぉ", "ドォ")),
];

/// the 'h' row kana, which have both a dakuten and a han-dakuten version
static HAN_DAKUTEN_KANA: &[(Kana, Kana, Kana)] = &[
    (k("ha", "は", "ハ"), k("ba", "ば", "バ"), k("pa", "ぱ", "パ")),
    (k("hi", "ひ", "ヒ"), k("bi", "び", "ビ"), k("pi", "ぴ", "ピ")),
    (kv("fu", "ふ", "フ", &["hu"]), k("bu", "ぶ", "ブ"), k("pu", "ぷ", "プ")),
    (k("he", "へ", "ヘ"), k("be", "べ", "ベ"), k("pe", "ぺ", "ペ")),
    (k("ho", "ほ", "ホ"), k("bo", "ぼ", "ボ"), k("po", "ぽ", "ポ")),
    (k("hya", "ひゃ", "ヒャ"), k("bya", "びゃ", "ビャ"), k("pya", "ぴゃ", "ピャ")),
    (k("hyi", "ひぃ", "ヒィ"), k("byi", "びぃ", "ビィ"), k("pyi", "ぴぃ", "ピィ")),
    (k("hyu", "ひゅ", "ヒュ"), k("byu", "びゅ", "ビュ"), k("pyu", "ぴゅ", "ピュ")),
    (k("hye", "ひぇ", "ヒェ"), k("bye", "びぇ", "ビェ"), k("pye", "ぴぇ", "ピェ")),
    (k("hyo", "ひょ", "ヒョ"), k("byo", "びょ", "ビョ"), k("pyo", "ぴょ", "ピョ")),
];

/// a table entry: the [`Kana`] itself plus arena indices linking plain and
/// accented versions
#[derive(Debug)]
pub struct KanaEntry {
    kana: &'static Kana,
    plain: Option<usize>,
    dakuten: Option<usize>,
    han_dakuten: Option<usize>,
}

impl KanaEntry {
    pub fn kana(&self) -> &'static Kana {
        self.kana
    }

    /// the unaccented version, `None` if this entry is already unaccented or
    /// has no standard unaccented combination (like ヴォ)
    pub fn plain(&self) -> Option<&'static KanaEntry> {
        self.plain.map(|i| &KanaTable::get().entries[i])
    }

    pub fn dakuten(&self) -> Option<&'static KanaEntry> {
        self.dakuten.map(|i| &KanaTable::get().entries[i])
    }

    pub fn han_dakuten(&self) -> Option<&'static KanaEntry> {
        self.han_dakuten.map(|i| &KanaTable::get().entries[i])
    }
}

impl Deref for KanaEntry {
    type Target = Kana;

    fn deref(&self) -> &Kana {
        self.kana
    }
}

impl PartialEq for KanaEntry {
    fn eq(&self, other: &Self) -> bool {
        // romaji is unique across the table so comparing it is enough
        self.kana.romaji == other.kana.romaji
    }
}

impl Eq for KanaEntry {}

/// the static Kana table with Rōmaji, Hiragana and Katakana lookup maps,
/// built once on first use and immutable afterwards
pub struct KanaTable {
    entries: Vec<KanaEntry>,
    romaji_map: HashMap<&'static str, usize>,
    hiragana_map: HashMap<&'static str, usize>,
    katakana_map: HashMap<&'static str, usize>,
    small_tsu: usize,
    n: usize,
}

static TABLE: Lazy<KanaTable> = Lazy::new(KanaTable::build);

impl KanaTable {
    pub fn get() -> &'static KanaTable {
        &TABLE
    }

    /// look up an entry by its value in the given script (the Rōmaji map
    /// accepts all variants, the Kana maps only the canonical field)
    pub fn find(&self, t: CharType, s: &str) -> Option<&'static KanaEntry> {
        let map = match t {
            CharType::Romaji => &self.romaji_map,
            CharType::Hiragana => &self.hiragana_map,
            CharType::Katakana => &self.katakana_map,
        };
        map.get(s).map(|&i| &KanaTable::get().entries[i])
    }

    pub fn entries(&self) -> &[KanaEntry] {
        &self.entries
    }

    /// number of keys in the map for the given script
    pub fn map_size(&self, t: CharType) -> usize {
        match t {
            CharType::Romaji => self.romaji_map.len(),
            CharType::Hiragana => self.hiragana_map.len(),
            CharType::Katakana => self.katakana_map.len(),
        }
    }

    /// the small っ/ッ entry
    pub fn small_tsu(&self) -> &'static KanaEntry {
        &KanaTable::get().entries[self.small_tsu]
    }

    /// the ん/ン entry
    pub fn n(&self) -> &'static KanaEntry {
        &KanaTable::get().entries[self.n]
    }

    /// the dakuten form of `s` in the same script ("か" → "が", "キ" → "ギ")
    pub fn dakuten_of(&self, s: &str) -> Option<&'static str> {
        self.accented_of(s, KanaEntry::dakuten)
    }

    /// the han-dakuten form of `s` in the same script ("ホ" → "ポ")
    pub fn han_dakuten_of(&self, s: &str) -> Option<&'static str> {
        self.accented_of(s, KanaEntry::han_dakuten)
    }

    fn accented_of(
        &self,
        s: &str,
        accent: fn(&KanaEntry) -> Option<&'static KanaEntry>,
    ) -> Option<&'static str> {
        if let Some(e) = self.find(CharType::Hiragana, s) {
            return accent(e).map(|a| a.hiragana());
        }
        self.find(CharType::Katakana, s).and_then(|e| accent(e).map(|a| a.katakana()))
    }

    fn build() -> KanaTable {
        let mut entries = Vec::new();
        let mut push = |kana: &'static Kana, plain: Option<usize>| {
            kana.validate();
            entries.push(KanaEntry {
                kana,
                plain,
                dakuten: None,
                han_dakuten: None,
            });
            entries.len() - 1
        };
        for kana in PLAIN_KANA {
            push(kana, None);
        }
        let mut plain_dakuten = Vec::new();
        for (plain, dakuten) in DAKUTEN_KANA {
            let p = push(plain, None);
            let d = push(dakuten, Some(p));
            plain_dakuten.push((p, d, None));
        }
        for (plain, dakuten, han_dakuten) in HAN_DAKUTEN_KANA {
            let p = push(plain, None);
            let d = push(dakuten, Some(p));
            let h = push(han_dakuten, Some(p));
            plain_dakuten.push((p, d, Some(h)));
        }
        for (p, d, h) in plain_dakuten {
            entries[p].dakuten = Some(d);
            entries[p].han_dakuten = h;
        }
        let mut romaji_map = HashMap::new();
        let mut hiragana_map = HashMap::new();
        let mut katakana_map = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let mut insert = |map: &mut HashMap<&'static str, usize>, key: &'static str| {
                assert!(
                    map.insert(key, i).is_none(),
                    "key '{key}' already in kana map"
                );
            };
            insert(&mut romaji_map, entry.kana.romaji);
            for variant in entry.kana.variants {
                insert(&mut romaji_map, variant);
            }
            insert(&mut hiragana_map, entry.kana.hiragana);
            insert(&mut katakana_map, entry.kana.katakana);
        }
        let small_tsu = romaji_map["ltu"];
        let n = romaji_map["n"];
        KanaTable {
            entries,
            romaji_map,
            hiragana_map,
            katakana_map,
            small_tsu,
            n,
        }
    }
}

/// the repeating kana marks ゝ/ヽ (plain) and ゞ/ヾ (dakuten), resolved
/// against the previous Kana during conversion
#[derive(Debug)]
pub struct RepeatMark {
    hiragana: &'static str,
    katakana: &'static str,
    dakuten: bool,
}

pub static REPEAT_PLAIN: RepeatMark = RepeatMark {
    hiragana: "ゝ",
    katakana: "ヽ",
    dakuten: false,
};

pub static REPEAT_ACCENTED: RepeatMark = RepeatMark {
    hiragana: "ゞ",
    katakana: "ヾ",
    dakuten: true,
};

impl RepeatMark {
    pub fn matches(&self, t: CharType, s: &str) -> bool {
        t == CharType::Hiragana && self.hiragana == s
            || t == CharType::Katakana && self.katakana == s
    }

    pub fn hiragana(&self) -> &'static str {
        self.hiragana
    }

    pub fn katakana(&self) -> &'static str {
        self.katakana
    }

    /// the mark's value in the target script; for Rōmaji the previous Kana
    /// is repeated with its accent shifted to match the mark
    pub fn get(
        &self,
        target: CharType,
        flags: ConvertFlags,
        prev_kana: Option<&'static KanaEntry>,
    ) -> String {
        match target {
            CharType::Hiragana => self.hiragana.into(),
            CharType::Katakana => self.katakana.into(),
            CharType::Romaji => {
                let Some(prev) = prev_kana else {
                    return String::new();
                };
                let kana = if self.dakuten {
                    prev.dakuten().unwrap_or(prev)
                } else {
                    prev.plain().unwrap_or(prev)
                };
                kana.get_romaji(flags).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // 204 entries and 55 romaji variants in the full table
    const KANA_SIZE: usize = 204;
    const VARIANTS: usize = 55;

    #[test]
    fn map_sizes() {
        let t = KanaTable::get();
        assert_eq!(t.entries().len(), KANA_SIZE);
        assert_eq!(t.map_size(CharType::Hiragana), KANA_SIZE);
        assert_eq!(t.map_size(CharType::Katakana), KANA_SIZE);
        assert_eq!(t.map_size(CharType::Romaji), KANA_SIZE + VARIANTS);
    }

    #[test]
    fn romaji_lengths_and_final_letters() {
        for e in KanaTable::get().entries() {
            let r = e.romaji();
            assert!(!r.is_empty() && r.len() < 4, "{r}");
            assert!(
                r == "n" || "aiueo".contains(r.chars().last().unwrap()),
                "romaji '{r}' doesn't end with a vowel"
            );
        }
    }

    #[test]
    fn digraph_second_char_is_small() {
        let t = KanaTable::get();
        let small = ["ぁ", "ぃ", "ぅ", "ぇ", "ぉ", "ゃ", "ゅ", "ょ", "ゎ"];
        for e in t.entries() {
            let h = e.hiragana();
            if h.len() == 6 {
                assert!(
                    small.contains(&&h[3..]),
                    "digraph '{h}' ({}) doesn't end with a small kana",
                    e.romaji()
                );
            }
        }
    }

    #[test_case("shi", "し", "シ"; "monograph")]
    #[test_case("kya", "きゃ", "キャ"; "digraph")]
    #[test_case("ltu", "っ", "ッ"; "small tsu")]
    fn find_by_each_script(romaji: &str, hiragana: &str, katakana: &str) {
        let t = KanaTable::get();
        let e = t.find(CharType::Romaji, romaji).unwrap();
        assert_eq!(e.hiragana(), hiragana);
        assert_eq!(e.katakana(), katakana);
        assert_eq!(t.find(CharType::Hiragana, hiragana).unwrap(), e);
        assert_eq!(t.find(CharType::Katakana, katakana).unwrap(), e);
    }

    #[test]
    fn variants_resolve_to_the_same_entry() {
        let t = KanaTable::get();
        let fu = t.find(CharType::Romaji, "fu").unwrap();
        assert_eq!(t.find(CharType::Romaji, "hu").unwrap(), fu);
        let qa = t.find(CharType::Romaji, "qa").unwrap();
        assert_eq!(t.find(CharType::Romaji, "kwa").unwrap(), qa);
        // kana lookups only use the canonical field
        assert!(t.find(CharType::Hiragana, "hu").is_none());
    }

    #[test]
    fn accent_links() {
        let t = KanaTable::get();
        let ka = t.find(CharType::Romaji, "ka").unwrap();
        let ga = ka.dakuten().unwrap();
        assert_eq!(ga.romaji(), "ga");
        assert_eq!(ga.plain().unwrap(), ka);
        assert!(ka.plain().is_none());
        assert!(ga.dakuten().is_none());
        let ha = t.find(CharType::Romaji, "ha").unwrap();
        assert_eq!(ha.dakuten().unwrap().romaji(), "ba");
        assert_eq!(ha.han_dakuten().unwrap().romaji(), "pa");
        assert_eq!(ha.han_dakuten().unwrap().plain().unwrap(), ha);
        // han-dakuten only exists for the 'h' row
        assert!(ka.han_dakuten().is_none());
    }

    #[test]
    fn accented_forms_by_string() {
        let t = KanaTable::get();
        assert_eq!(t.dakuten_of("か"), Some("が"));
        assert_eq!(t.dakuten_of("キ"), Some("ギ"));
        assert_eq!(t.han_dakuten_of("ホ"), Some("ポ"));
        assert_eq!(t.dakuten_of("あ"), None);
        assert_eq!(t.han_dakuten_of("か"), None);
    }

    #[test_case(ConvertFlags::empty(), "shi"; "default")]
    #[test_case(ConvertFlags::HEPBURN, "shi"; "hepburn")]
    #[test_case(ConvertFlags::KUNREI, "si"; "kunrei")]
    fn romaji_output_for_shi(flags: ConvertFlags, expected: &str) {
        let shi = KanaTable::get().find(CharType::Hiragana, "し").unwrap();
        assert_eq!(shi.get_romaji(flags), expected);
    }

    #[test]
    fn hepburn_and_kunrei_overrides() {
        let t = KanaTable::get();
        let du = t.find(CharType::Romaji, "du").unwrap();
        assert_eq!(du.get_romaji(ConvertFlags::empty()), "du");
        assert_eq!(du.get_romaji(ConvertFlags::HEPBURN), "zu");
        assert_eq!(du.get_romaji(ConvertFlags::KUNREI), "zu");
        // Hepburn wins when both flags are set
        let dya = t.find(CharType::Romaji, "dya").unwrap();
        assert_eq!(
            dya.get_romaji(ConvertFlags::HEPBURN | ConvertFlags::KUNREI),
            "ja"
        );
        assert_eq!(dya.get_romaji(ConvertFlags::KUNREI), "zya");
    }

    #[test]
    fn sokuon_romaji() {
        let t = KanaTable::get();
        let chi = t.find(CharType::Romaji, "chi").unwrap();
        assert_eq!(chi.sokuon_romaji(ConvertFlags::empty()), "tchi");
        assert_eq!(chi.sokuon_romaji(ConvertFlags::KUNREI), "tti");
        let pu = t.find(CharType::Romaji, "pu").unwrap();
        assert_eq!(pu.sokuon_romaji(ConvertFlags::empty()), "ppu");
    }

    #[test]
    fn repeat_marks() {
        let t = KanaTable::get();
        assert!(REPEAT_PLAIN.matches(CharType::Hiragana, "ゝ"));
        assert!(REPEAT_ACCENTED.matches(CharType::Katakana, "ヾ"));
        assert!(!REPEAT_PLAIN.matches(CharType::Katakana, "ゝ"));
        let ka = t.find(CharType::Romaji, "ka").unwrap();
        let flags = ConvertFlags::empty();
        assert_eq!(REPEAT_PLAIN.get(CharType::Romaji, flags, Some(ka)), "ka");
        assert_eq!(REPEAT_ACCENTED.get(CharType::Romaji, flags, Some(ka)), "ga");
        let ga = ka.dakuten().unwrap();
        assert_eq!(REPEAT_PLAIN.get(CharType::Romaji, flags, Some(ga)), "ka");
        assert_eq!(REPEAT_PLAIN.get(CharType::Hiragana, flags, Some(ka)), "ゝ");
        assert_eq!(REPEAT_ACCENTED.get(CharType::Katakana, flags, None), "ヾ");
        assert_eq!(REPEAT_PLAIN.get(CharType::Romaji, flags, None), "");
    }

    #[test]
    fn small_tsu_and_n() {
        let t = KanaTable::get();
        assert_eq!(t.small_tsu().hiragana(), "っ");
        assert_eq!(t.n().katakana(), "ン");
    }
}
