//! Data loaded from 'ucd.txt', an extract of selected XML properties from
//! the Unicode UCD file 'ucd.all.flat.xml'.

use crate::morohashi::MorohashiId;
use crate::radical::MAX_RADICAL;
use crate::strokes::Strokes;
use crate::types::UcdLinkType;
use itertools::Itertools;
use kana::{CharType, ConvertFlags, Converter, Utf8Char};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use utils::block::is_kanji;
use utils::column_file::{Column, ColumnFile};
use utils::error::Result;
use utils::text::{to_unicode, BracketType};
use utils::utf8::{get_code, Code};

/// one source letter per region covered by the Unicode IRG: G (China),
/// H (Hong Kong), J (Japan), K (Korea), T (Taiwan) and V (Vietnam)
const SOURCE_LETTERS: [char; 6] = ['G', 'H', 'J', 'K', 'T', 'V'];

/// compact bitset for the 'kIRG' source letters plus the Joyo and Jinmei
/// flags from the parse script
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UcdSources {
    bits: u8,
    joyo: bool,
    jinmei: bool,
}

impl UcdSources {
    fn new(sources: &str, joyo: bool, jinmei: bool) -> Option<Self> {
        let mut bits = 0_u8;
        for c in sources.chars() {
            let i = SOURCE_LETTERS.iter().position(|&l| l == c)?;
            bits |= 1 << i;
        }
        Some(UcdSources { bits, joyo, jinmei })
    }

    pub fn joyo(&self) -> bool {
        self.joyo
    }

    pub fn jinmei(&self) -> bool {
        self.jinmei
    }

    pub fn has(&self, letter: char) -> bool {
        SOURCE_LETTERS
            .iter()
            .position(|&l| l == letter)
            .is_some_and(|i| self.bits & (1 << i) != 0)
    }

    /// the source letters in standard order
    pub fn to_source_string(self) -> String {
        SOURCE_LETTERS
            .iter()
            .enumerate()
            .filter(|(i, _)| self.bits & (1 << i) != 0)
            .map(|(_, &c)| c)
            .collect()
    }
}

/// a (code, name) pair referring to another UCD entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UcdEntry {
    code: Code,
    name: String,
}

impl UcdEntry {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unicode in brackets plus the name, e.g. "[FA30] 侮"
    pub fn code_and_name(&self) -> String {
        format!("{} {}", to_unicode(self.code, BracketType::Square), self.name)
    }
}

/// per-Kanji record from 'ucd.txt'
#[derive(Debug)]
pub struct Ucd {
    code: Code,
    name: String,
    block: String,
    version: String,
    radical: u8,
    strokes: Strokes,
    pinyin: String,
    morohashi_id: Option<MorohashiId>,
    nelson_ids: Vec<u16>,
    sources: UcdSources,
    j_source: String,
    links: Vec<UcdEntry>,
    link_type: UcdLinkType,
    meaning: String,
    on_reading: String,
    kun_reading: String,
}

impl Ucd {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn radical(&self) -> u8 {
        self.radical
    }

    pub fn strokes(&self) -> Strokes {
        self.strokes
    }

    pub fn pinyin(&self) -> &str {
        &self.pinyin
    }

    pub fn morohashi_id(&self) -> Option<MorohashiId> {
        self.morohashi_id
    }

    pub fn nelson_ids(&self) -> &[u16] {
        &self.nelson_ids
    }

    pub fn sources(&self) -> UcdSources {
        self.sources
    }

    pub fn joyo(&self) -> bool {
        self.sources.joyo()
    }

    pub fn jinmei(&self) -> bool {
        self.sources.jinmei()
    }

    pub fn j_source(&self) -> &str {
        &self.j_source
    }

    pub fn links(&self) -> &[UcdEntry] {
        &self.links
    }

    pub fn link_type(&self) -> UcdLinkType {
        self.link_type
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn has_traditional_links(&self) -> bool {
        self.link_type.is_traditional() && self.has_links()
    }

    pub fn has_non_traditional_links(&self) -> bool {
        self.has_links() && !self.link_type.is_traditional()
    }

    /// true if readings are pulled in via the link
    pub fn linked_readings(&self) -> bool {
        self.link_type.linked_readings()
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn on_reading(&self) -> &str {
        &self.on_reading
    }

    pub fn kun_reading(&self) -> &str {
        &self.kun_reading
    }

    pub fn code_and_name(&self) -> String {
        format!("{} {}", to_unicode(self.code, BracketType::Square), self.name)
    }

    pub fn link_code_and_names(&self) -> String {
        self.links.iter().map(UcdEntry::code_and_name).join(", ")
    }
}

/// catalog of all UCD entries with name lookup and reverse link maps
#[derive(Default, Debug)]
pub struct UcdData {
    /// primary name map (sorted so iteration order is stable)
    map: BTreeMap<String, Ucd>,
    /// jinmei link target name to the (single) name that links to it
    linked_jinmei: HashMap<String, String>,
    /// non-jinmei link target name to the names that link to it
    linked_other: HashMap<String, Vec<String>>,
}

impl UcdData {
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let code_col = Column::new("Code");
        let name_col = Column::new("Name");
        let block_col = Column::new("Block");
        let version_col = Column::new("Version");
        let radical_col = Column::new("Radical");
        let strokes_col = Column::new("Strokes");
        let v_strokes_col = Column::new("VStrokes");
        let pinyin_col = Column::new("Pinyin");
        let morohashi_col = Column::new("Morohashi");
        let nelson_ids_col = Column::new("NelsonIds");
        let sources_col = Column::new("Sources");
        let j_source_col = Column::new("JSource");
        let joyo_col = Column::new("Joyo");
        let jinmei_col = Column::new("Jinmei");
        let link_codes_col = Column::new("LinkCodes");
        let link_names_col = Column::new("LinkNames");
        let link_type_col = Column::new("LinkType");
        let meaning_col = Column::new("Meaning");
        let on_col = Column::new("On");
        let kun_col = Column::new("Kun");
        let mut f = ColumnFile::new(
            path,
            &[
                code_col.clone(),
                name_col.clone(),
                block_col.clone(),
                version_col.clone(),
                radical_col.clone(),
                strokes_col.clone(),
                v_strokes_col.clone(),
                pinyin_col.clone(),
                morohashi_col.clone(),
                nelson_ids_col.clone(),
                sources_col.clone(),
                j_source_col.clone(),
                joyo_col.clone(),
                jinmei_col.clone(),
                link_codes_col.clone(),
                link_names_col.clone(),
                link_type_col.clone(),
                meaning_col.clone(),
                on_col.clone(),
                kun_col.clone(),
            ],
        )?;
        while f.next_row()? {
            if f.is_empty(&on_col)?
                && f.is_empty(&kun_col)?
                && f.is_empty(&morohashi_col)?
                && f.is_empty(&j_source_col)?
            {
                return Err(
                    f.error("one of 'On', 'Kun', 'Morohashi' or 'JSource' must be populated")
                );
            }
            let name = f.get(&name_col)?.to_string();
            if name.len() > 4 {
                return Err(f.error("name more than 4 bytes"));
            }
            if !is_kanji(&name, true) {
                return Err(f.error(&format!("name '{name}' is not a recognized Kanji")));
            }
            let code = f.get_char32(&code_col)?;
            if code != get_code(&name) {
                return Err(f.error(&format!(
                    "code {} doesn't match name '{name}'",
                    to_unicode(code, BracketType::Square)
                )));
            }
            let radical = f.get_u64(&radical_col, MAX_RADICAL.into())? as u8;
            if radical == 0 {
                return Err(f.error("radical '0' out of range"));
            }
            if f.get(&v_strokes_col)? == "0" {
                return Err(f.error("variant strokes shouldn't be 0"));
            }
            let strokes = match f.get_opt_u64(&v_strokes_col, u8::MAX.into())? {
                Some(v) => Strokes::with_variant(f.get_u8(&strokes_col)?, v as u8),
                None => Strokes::new(f.get_u8(&strokes_col)?),
            }
            .map_err(|e| f.error(&e.to_string()))?;
            let joyo = f.get_bool(&joyo_col)?;
            let jinmei = f.get_bool(&jinmei_col)?;
            if joyo {
                if jinmei {
                    return Err(f.error("can't be both joyo and jinmei"));
                }
                // meaning is empty for some entries like 乁 and 乣, but it
                // shouldn't be empty for a Jōyō Kanji
                if f.is_empty(&meaning_col)? {
                    return Err(f.error("meaning is empty for Jōyō Kanji"));
                }
            }
            let mut links = Vec::new();
            if !f.is_empty(&link_names_col)? {
                let names = f.get(&link_names_col)?.to_string();
                let codes = f.get(&link_codes_col)?.to_string();
                let mut code_iter = codes.split(',');
                for link_name in names.split(',') {
                    let Some(link_code) = code_iter.next() else {
                        return Err(f.error("LinkNames has more values than LinkCodes"));
                    };
                    links.push(UcdEntry {
                        code: f.get_char32_value(&link_codes_col, link_code)?,
                        name: link_name.to_string(),
                    });
                }
                // Jōyō are standard Kanji so they shouldn't link back to a
                // standard form (some Jinmei do since they are officially
                // allowed variants or old forms)
                if joyo {
                    return Err(f.error("joyo shouldn't have links"));
                }
                if f.is_empty(&link_type_col)? {
                    return Err(f.error("LinkNames has a value, but LinkType is empty"));
                }
            } else if !f.is_empty(&link_type_col)? {
                return Err(f.error("LinkType has a value, but LinkNames is empty"));
            } else if !f.is_empty(&link_codes_col)? {
                return Err(f.error("LinkCodes has a value, but LinkNames is empty"));
            }
            let link_type = match f.get(&link_type_col)? {
                "" => UcdLinkType::None,
                s => UcdLinkType::from_str(s)
                    .map_err(|_| f.error(&format!("unrecognized LinkType '{s}'")))?,
            };
            let sources = f.get(&sources_col)?;
            let sources = UcdSources::new(sources, joyo, jinmei)
                .ok_or_else(|| f.error(&format!("unrecognized source letter in '{sources}'")))?;
            let morohashi_id = match f.get(&morohashi_col)? {
                "" => None,
                s => Some(
                    MorohashiId::from_str(s).map_err(|e| f.error(&e.to_string()))?,
                ),
            };
            let mut nelson_ids = Vec::new();
            for id in f.get(&nelson_ids_col)?.split(',').filter(|s| !s.is_empty()) {
                nelson_ids.push(
                    id.parse::<u16>()
                        .map_err(|_| f.error_for("failed to convert to Nelson ID", &nelson_ids_col, id))?,
                );
            }
            let ucd = Ucd {
                code,
                name: name.clone(),
                block: f.get(&block_col)?.to_string(),
                version: f.get(&version_col)?.to_string(),
                radical,
                strokes,
                pinyin: f.get(&pinyin_col)?.to_string(),
                morohashi_id,
                nelson_ids,
                sources,
                j_source: f.get(&j_source_col)?.to_string(),
                links,
                link_type,
                meaning: f.get(&meaning_col)?.to_string(),
                on_reading: f.get(&on_col)?.to_string(),
                kun_reading: f.get(&kun_col)?.to_string(),
            };
            let links = ucd.links.clone();
            if self.map.insert(name.clone(), ucd).is_some() {
                return Err(f.error(&format!("duplicate entry '{name}'")));
            }
            for link in links {
                if !jinmei {
                    self.linked_other
                        .entry(link.name)
                        .or_default()
                        .push(name.clone());
                } else if let Some(existing) = self
                    .linked_jinmei
                    .insert(link.name.clone(), name.clone())
                {
                    return Err(f.error(&format!(
                        "jinmei entry '{name}' with link '{}' failed - link already points to '{existing}'",
                        link.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Ucd> {
        self.map.values()
    }

    /// find an entry by name. A name carrying a variation selector is
    /// resolved through the jinmei link map (the variant forms of jinmei
    /// Kanji are the only variation-selector names that exist in practice).
    pub fn find(&self, name: &str) -> Option<&Ucd> {
        let resolved = if Utf8Char::is_char_with_variation_selector(name) {
            self.linked_jinmei
                .get(Utf8Char::no_variation_selector(name))?
        } else {
            name
        };
        self.map.get(resolved)
    }

    pub fn linked_jinmei(&self) -> &HashMap<String, String> {
        &self.linked_jinmei
    }

    pub fn linked_other(&self) -> &HashMap<String, Vec<String>> {
        &self.linked_other
    }

    /// meaning of `u`, empty when there is no entry
    pub fn meaning(u: Option<&Ucd>) -> &str {
        u.map(Ucd::meaning).unwrap_or_default()
    }

    /// synthesize a Kana reading: On readings are converted to Katakana and
    /// Kun readings to Hiragana, comma separated
    pub fn readings_as_kana(u: Option<&Ucd>) -> String {
        let Some(u) = u else {
            return String::new();
        };
        let mut result = Converter::new(CharType::Katakana, ConvertFlags::empty())
            .convert_from(CharType::Romaji, &u.on_reading.replace(' ', ","));
        let kun = u.kun_reading.replace(' ', ",");
        if !kun.is_empty() {
            let kun = if result.is_empty() { kun } else { format!(",{kun}") };
            result += &Converter::new(CharType::Hiragana, ConvertFlags::empty())
                .convert_from(CharType::Romaji, &kun);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    pub const UCD_HEADER: &str = "Code\tName\tBlock\tVersion\tRadical\tStrokes\tVStrokes\tPinyin\tMorohashi\tNelsonIds\tSources\tJSource\tJoyo\tJinmei\tLinkCodes\tLinkNames\tLinkType\tMeaning\tOn\tKun\n";

    fn load(rows: &str) -> Result<UcdData> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ucd.txt");
        File::create(&path)
            .unwrap()
            .write_all((UCD_HEADER.to_string() + rows).as_bytes())
            .unwrap();
        let mut data = UcdData::default();
        data.load(&path).map(|_| data)
    }

    fn row(code: &str, name: &str, fields: &[(&str, &str)]) -> String {
        // columns after Name with their defaults
        let mut values = vec![
            ("Block", "CJK"),
            ("Version", "1.1"),
            ("Radical", "1"),
            ("Strokes", "1"),
            ("VStrokes", ""),
            ("Pinyin", ""),
            ("Morohashi", ""),
            ("NelsonIds", ""),
            ("Sources", "GJ"),
            ("JSource", "J0-306C"),
            ("Joyo", ""),
            ("Jinmei", ""),
            ("LinkCodes", ""),
            ("LinkNames", ""),
            ("LinkType", ""),
            ("Meaning", "meaning"),
            ("On", "ON"),
            ("Kun", ""),
        ];
        for (key, value) in fields {
            let slot = values.iter_mut().find(|(k, _)| k == key).unwrap();
            slot.1 = value;
        }
        let mut result = format!("{code}\t{name}");
        for (_, value) in values {
            result += &format!("\t{value}");
        }
        result + "\n"
    }

    #[test]
    fn load_basic_entry() {
        let data = load(&row(
            "4E00",
            "一",
            &[
                ("Radical", "1"),
                ("Strokes", "1"),
                ("Joyo", "Y"),
                ("Morohashi", "1"),
                ("NelsonIds", "1,34"),
                ("Meaning", "one"),
                ("On", "ICHI ITSU"),
                ("Kun", "HITOTSU"),
            ],
        ))
        .unwrap();
        assert_eq!(data.len(), 1);
        let one = data.find("一").unwrap();
        assert_eq!(one.code(), 0x4e00);
        assert!(one.joyo());
        assert!(!one.jinmei());
        assert_eq!(one.nelson_ids(), &[1, 34]);
        assert_eq!(one.morohashi_id().unwrap().to_string(), "1");
        assert_eq!(one.sources().to_source_string(), "GJ");
        assert!(one.sources().has('J'));
        assert!(!one.sources().has('V'));
        assert_eq!(one.code_and_name(), "[4E00] 一");
    }

    #[test]
    fn readings_as_kana() {
        let data = load(&row(
            "4E00",
            "一",
            &[("Joyo", "Y"), ("On", "ICHI ITSU"), ("Kun", "HITOTSU")],
        ))
        .unwrap();
        let one = data.find("一");
        assert_eq!(UcdData::readings_as_kana(one), "イチ、イツ、ひとつ");
        assert_eq!(UcdData::readings_as_kana(None), "");
    }

    #[test]
    fn links_and_reverse_maps() {
        let rows = row("4E00", "一", &[("Joyo", "Y")])
            + &row(
                "4E8C",
                "二",
                &[
                    ("Jinmei", "Y"),
                    ("LinkCodes", "4E00"),
                    ("LinkNames", "一"),
                    ("LinkType", "Jinmei*"),
                ],
            )
            + &row(
                "4E09",
                "三",
                &[
                    ("LinkCodes", "4E00"),
                    ("LinkNames", "一"),
                    ("LinkType", "Traditional"),
                ],
            );
        let data = load(&rows).unwrap();
        let two = data.find("二").unwrap();
        assert_eq!(two.link_type(), UcdLinkType::JinmeiR);
        assert!(two.linked_readings());
        assert_eq!(two.links()[0].name(), "一");
        assert_eq!(two.link_code_and_names(), "[4E00] 一");
        let three = data.find("三").unwrap();
        assert!(three.has_traditional_links());
        assert!(!three.linked_readings());
        assert_eq!(data.linked_jinmei().get("一").unwrap(), "二");
        assert_eq!(data.linked_other().get("一").unwrap(), &["三".to_string()]);
    }

    #[test]
    fn find_resolves_variation_selectors() {
        // U+FA67 is the compatibility form of 逸 (U+9038) and links back to it
        let rows = row("9038", "逸", &[("Joyo", "Y")])
            + &row(
                "FA67",
                "\u{fa67}",
                &[
                    ("Jinmei", "Y"),
                    ("LinkCodes", "9038"),
                    ("LinkNames", "逸"),
                    ("LinkType", "Jinmei*"),
                ],
            );
        let data = load(&rows).unwrap();
        // a variation-selector name resolves via the linked-jinmei map
        assert_eq!(data.find("逸\u{fe01}").unwrap().code(), 0xfa67);
        assert_eq!(data.find("逸").unwrap().code(), 0x9038);
        // a variant with no linked-jinmei entry is not found
        assert!(data.find("一\u{fe00}").is_none());
    }

    #[test]
    fn row_validations() {
        // missing all of on/kun/morohashi/jsource
        let e = load(&row("4E00", "一", &[("On", ""), ("JSource", "")])).unwrap_err();
        assert!(e.to_string().contains("must be populated"), "{e}");
        // joyo can't also be jinmei
        let e = load(&row("4E00", "一", &[("Joyo", "Y"), ("Jinmei", "Y")])).unwrap_err();
        assert!(e.to_string().contains("both joyo and jinmei"), "{e}");
        // joyo needs a meaning
        let e = load(&row("4E00", "一", &[("Joyo", "Y"), ("Meaning", "")])).unwrap_err();
        assert!(e.to_string().contains("meaning is empty"), "{e}");
        // radical range
        let e = load(&row("4E00", "一", &[("Radical", "215")])).unwrap_err();
        assert!(e.to_string().contains("exceeded max"), "{e}");
        // strokes range
        let e = load(&row("4E00", "一", &[("Strokes", "54")])).unwrap_err();
        assert!(e.to_string().contains("out of range"), "{e}");
        // variant strokes can't be 0
        let e = load(&row("4E00", "一", &[("VStrokes", "0")])).unwrap_err();
        assert!(e.to_string().contains("shouldn't be 0"), "{e}");
        // joyo can't have links
        let e = load(&row(
            "4E00",
            "一",
            &[("Joyo", "Y"), ("LinkCodes", "4E8C"), ("LinkNames", "二"), ("LinkType", "Jinmei")],
        ))
        .unwrap_err();
        assert!(e.to_string().contains("joyo shouldn't have links"), "{e}");
        // link type without names
        let e = load(&row("4E00", "一", &[("LinkType", "Jinmei")])).unwrap_err();
        assert!(e.to_string().contains("LinkNames is empty"), "{e}");
        // code must match name
        let e = load(&row("4E01", "一", &[])).unwrap_err();
        assert!(e.to_string().contains("doesn't match name"), "{e}");
        // duplicates
        let e = load(&(row("4E00", "一", &[]) + &row("4E00", "一", &[]))).unwrap_err();
        assert!(e.to_string().contains("duplicate entry"), "{e}");
    }
}
