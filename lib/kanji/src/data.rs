//! The Kanji registry: loads every data file in a fixed order, enforces the
//! catalog invariants and exposes the query API used by the drivers.
//!
//! Load order matters: UCD and radicals come first since almost everything
//! consults them, official lists (Jōyō, linked, Jinmei, Extra) come next,
//! then JLPT, frequency and Kentei lists create any remaining Kanji they
//! mention, and finally every leftover UCD entry becomes a `Ucd` Kanji.
//!
//! Per-Kanji sanity-check failures don't abort the load: they are kept on
//! the registry (and logged) so one run can diagnose the whole catalog.

use crate::kanji::{Frequency, Kanji, KanjiKind, KanjiRef, NelsonId, UcdLinks};
use crate::list_file::{ListFile, ListKind};
use crate::morohashi::MorohashiId;
use crate::radical::{RadicalData, RadicalRef};
use crate::strokes::Strokes;
use crate::types::{JinmeiReason, JlptLevel, KanjiGrade, KanjiType, KenteiKyu};
use crate::ucd::{Ucd, UcdData};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use utils::column_file::{data_file, Column, ColumnFile};
use utils::error::{Error, Result};

pub const DATA_ARG: &str = "-data";
pub const DEBUG_ARG: &str = "-debug";
pub const INFO_ARG: &str = "-info";

/// the top 2501 ranked Kanji are grouped into 10 buckets of 250 (the last
/// one holds 251)
pub const FREQUENCY_BUCKETS: usize = 10;
pub const FREQUENCY_BUCKET_ENTRIES: usize = 250;

/// files that have to exist for a directory to be the data directory
const REQUIRED_FILES: [&str; 8] = [
    "jouyou", "jinmei", "linked-jinmei", "extra", "frequency", "frequency-readings",
    "radicals", "ucd",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DebugMode {
    /// log full debug output after loading
    Full,
    /// log summary info after loading
    Info,
    #[default]
    None,
}

/// which list file drove a [`KanjiData::process_list`] call
#[derive(Clone, Copy)]
enum ListTag {
    Level(JlptLevel),
    Frequency,
    Kyu(KenteiKyu),
}

/// shared Kanji fields pulled from the UCD entry for a name
struct UcdFields {
    compatibility_name: Option<String>,
    radical: Option<RadicalRef>,
    strokes: Option<Strokes>,
    pinyin: Option<String>,
    morohashi_id: Option<MorohashiId>,
    nelson_ids: Vec<NelsonId>,
    links: UcdLinks,
    meaning: String,
    reading: String,
}

#[derive(Debug)]
pub struct KanjiData {
    data_dir: PathBuf,
    debug_mode: DebugMode,
    radicals: RadicalData,
    ucd: UcdData,
    frequency_readings: HashMap<String, String>,
    levels: Vec<(JlptLevel, ListFile)>,
    kyus: Vec<(KenteiKyu, ListFile)>,
    frequency_file: Option<ListFile>,
    name_map: HashMap<String, KanjiRef>,
    /// UCD compatibility name to the variation-selector name that was loaded
    compatibility_map: HashMap<String, String>,
    type_map: HashMap<KanjiType, Vec<KanjiRef>>,
    grade_map: HashMap<KanjiGrade, Vec<KanjiRef>>,
    level_map: HashMap<JlptLevel, Vec<KanjiRef>>,
    kyu_map: HashMap<KenteiKyu, Vec<KanjiRef>>,
    frequencies: Vec<Vec<KanjiRef>>,
    morohashi_map: HashMap<MorohashiId, Vec<KanjiRef>>,
    nelson_map: HashMap<NelsonId, Vec<KanjiRef>>,
    /// one larger than the highest frequency seen (2502 with shipped data)
    max_frequency: Frequency,
    load_errors: Vec<String>,
}

impl KanjiData {
    /// create a registry from command-line args (`-data <dir>` or an
    /// upward search for a valid 'data' directory, plus `-debug`/`-info`)
    pub fn new(args: &[String]) -> Result<Self> {
        Self::with_dir(Self::find_data_dir(args)?, Self::debug_mode_from(args))
    }

    pub fn with_dir(data_dir: PathBuf, debug_mode: DebugMode) -> Result<Self> {
        let mut data = KanjiData {
            data_dir,
            debug_mode,
            radicals: RadicalData::default(),
            ucd: UcdData::default(),
            frequency_readings: HashMap::new(),
            levels: Vec::new(),
            kyus: Vec::new(),
            frequency_file: None,
            name_map: HashMap::new(),
            compatibility_map: HashMap::new(),
            type_map: HashMap::new(),
            grade_map: HashMap::new(),
            level_map: HashMap::new(),
            kyu_map: HashMap::new(),
            frequencies: vec![Vec::new(); FREQUENCY_BUCKETS],
            morohashi_map: HashMap::new(),
            nelson_map: HashMap::new(),
            max_frequency: 0,
            load_errors: Vec::new(),
        };
        data.load()?;
        Ok(data)
    }

    fn load(&mut self) -> Result<()> {
        let dir = self.data_dir.clone();
        self.ucd.load(&data_file(&dir, "ucd")?)?;
        self.radicals.load(&data_file(&dir, "radicals")?)?;
        self.load_frequency_readings(&data_file(&dir, "frequency-readings")?)?;
        let jlpt_dir = dir.join("jlpt");
        let mut unique = HashSet::new();
        for level in JlptLevel::iter().filter(|l| *l != JlptLevel::None) {
            let path = data_file(&jlpt_dir, &level.to_string().to_lowercase())?;
            self.levels
                .push((level, ListFile::load_unique(&path, ListKind::OnePerLine, &mut unique)?));
        }
        let kentei_dir = dir.join("kentei");
        let mut unique = HashSet::new();
        for kyu in KenteiKyu::iter().filter(|k| *k != KenteiKyu::None) {
            let path = data_file(&kentei_dir, &kyu.to_string().to_lowercase())?;
            self.kyus
                .push((kyu, ListFile::load_unique(&path, ListKind::OnePerLine, &mut unique)?));
        }
        self.frequency_file =
            Some(ListFile::load(&data_file(&dir, "frequency")?, ListKind::OnePerLine)?);
        self.load_jouyou(&data_file(&dir, "jouyou")?)?;
        self.load_linked_jinmei(&data_file(&dir, "linked-jinmei")?)?;
        self.load_jinmei(&data_file(&dir, "jinmei")?)?;
        self.load_extra(&data_file(&dir, "extra")?)?;
        let level_lists: Vec<(JlptLevel, Vec<String>)> = self
            .levels
            .iter()
            .map(|(l, f)| (*l, f.list().to_vec()))
            .collect();
        for (level, names) in level_lists {
            self.process_list(&names, ListTag::Level(level))?;
        }
        // process the frequency list before the kyu lists so the Frequency
        // type ends up meaning 'in the top 2501 but not in a more official
        // type' (Kentei has many rare Kanji so it stays the last file type)
        let frequency_names = self
            .frequency_file
            .as_ref()
            .map(|f| f.list().to_vec())
            .unwrap_or_default();
        self.process_list(&frequency_names, ListTag::Frequency)?;
        let kyu_lists: Vec<(KenteiKyu, Vec<String>)> = self
            .kyus
            .iter()
            .map(|(k, f)| (*k, f.list().to_vec()))
            .collect();
        for (kyu, names) in kyu_lists {
            self.process_list(&names, ListTag::Kyu(kyu))?;
        }
        self.process_ucd()?;
        self.check_strokes();
        if self.debug() {
            self.log_stats();
        }
        Ok(())
    }

    // queries

    pub fn ucd(&self) -> &UcdData {
        &self.ucd
    }

    pub fn radicals(&self) -> &RadicalData {
        &self.radicals
    }

    pub fn find_ucd(&self, name: &str) -> Option<&Ucd> {
        self.ucd.find(name)
    }

    /// find by name, with the same result for a variation-selector name and
    /// its UCD compatibility form
    pub fn find_by_name(&self, name: &str) -> Option<KanjiRef> {
        self.name_map
            .get(name)
            .or_else(|| {
                self.compatibility_map
                    .get(name)
                    .and_then(|variant| self.name_map.get(variant))
            })
            .cloned()
    }

    /// find the Kanji with frequency `freq` (1 to 2501)
    pub fn find_by_frequency(&self, freq: Frequency) -> Option<KanjiRef> {
        if freq == 0 || freq >= self.max_frequency {
            return None;
        }
        let index = freq as usize - 1;
        let bucket = (index / FREQUENCY_BUCKET_ENTRIES).min(FREQUENCY_BUCKETS - 1);
        self.frequencies[bucket]
            .get(index - bucket * FREQUENCY_BUCKET_ENTRIES)
            .cloned()
    }

    /// ids are usually numeric but can have a 'P' suffix, e.g. '4138' maps
    /// to 嗩 and '4138P' maps to 嘆
    pub fn find_by_morohashi_id(&self, id: &str) -> &[KanjiRef] {
        MorohashiId::from_str(id)
            .ok()
            .and_then(|id| self.morohashi_map.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// a few ids map to multiple Kanji (e.g. '1491' maps to 㡡, 幮 and 𢅥)
    pub fn find_by_nelson_id(&self, id: NelsonId) -> &[KanjiRef] {
        self.nelson_map.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get_type(&self, name: &str) -> KanjiType {
        self.find_by_name(name)
            .map(|k| k.kanji_type())
            .unwrap_or(KanjiType::None)
    }

    /// the UCD compatibility form for `name` (the name itself when it has
    /// no variation selector)
    pub fn get_compatibility_name(&self, name: &str) -> Option<String> {
        self.find_by_name(name)
            .map(|k| k.compatibility_name().to_string())
    }

    pub fn types(&self, t: KanjiType) -> &[KanjiRef] {
        self.type_map.get(&t).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn grades(&self, g: KanjiGrade) -> &[KanjiRef] {
        self.grade_map.get(&g).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn levels(&self, l: JlptLevel) -> &[KanjiRef] {
        self.level_map.get(&l).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn kyus(&self, k: KenteiKyu) -> &[KanjiRef] {
        self.kyu_map.get(&k).map(Vec::as_slice).unwrap_or_default()
    }

    /// one of the 10 frequency buckets (250 Kanji each, the last has 251)
    pub fn frequency_list(&self, bucket: usize) -> &[KanjiRef] {
        self.frequencies
            .get(bucket)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn name_map(&self) -> &HashMap<String, KanjiRef> {
        &self.name_map
    }

    /// frequency rank of `name` from the frequency file (1 is most common)
    pub fn frequency(&self, name: &str) -> Option<Frequency> {
        self.frequency_file.as_ref().and_then(|f| f.index(name))
    }

    pub fn level(&self, name: &str) -> JlptLevel {
        self.levels
            .iter()
            .find(|(_, f)| f.exists(name))
            .map(|(l, _)| *l)
            .unwrap_or(JlptLevel::None)
    }

    pub fn kyu(&self, name: &str) -> KenteiKyu {
        self.kyus
            .iter()
            .find(|(_, f)| f.exists(name))
            .map(|(k, _)| *k)
            .unwrap_or(KenteiKyu::None)
    }

    /// radical for `name` based on its UCD entry
    pub fn ucd_radical(&self, name: &str, ucd: Option<&Ucd>) -> Result<RadicalRef> {
        match ucd {
            Some(u) => self.radicals.find(u.radical()).cloned(),
            None => Err(Error::domain(format!("UCD entry not found: {name}"))),
        }
    }

    /// strokes for `name` based on its UCD entry
    pub fn ucd_strokes(&self, name: &str, ucd: Option<&Ucd>) -> Result<Strokes> {
        match ucd {
            Some(u) => Ok(u.strokes()),
            None => Err(Error::domain(format!("UCD entry not found: {name}"))),
        }
    }

    pub fn max_frequency(&self) -> Frequency {
        self.max_frequency
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn debug(&self) -> bool {
        self.debug_mode != DebugMode::None
    }

    pub fn full_debug(&self) -> bool {
        self.debug_mode == DebugMode::Full
    }

    /// sanity-check failures collected during the load
    pub fn load_errors(&self) -> &[String] {
        &self.load_errors
    }

    // command-line handling

    /// index of the next arg not consumed by this class, allowing callers
    /// with their own options to skip over `-data <dir>`, `-debug`, `-info`
    pub fn next_arg(args: &[String], current: usize) -> usize {
        let mut i = current + 1;
        while i < args.len() {
            match args[i].as_str() {
                DATA_ARG => i += 2,
                DEBUG_ARG | INFO_ARG => i += 1,
                _ => return i,
            }
        }
        args.len()
    }

    pub fn debug_mode_from(args: &[String]) -> DebugMode {
        if args.iter().any(|a| a == DEBUG_ARG) {
            DebugMode::Full
        } else if args.iter().any(|a| a == INFO_ARG) {
            DebugMode::Info
        } else {
            DebugMode::None
        }
    }

    /// find the data directory: an explicit `-data` value, otherwise search
    /// upward from the current directory (and from `args[0]`'s parent) for
    /// a 'data' directory containing the expected '.txt' files
    pub fn find_data_dir(args: &[String]) -> Result<PathBuf> {
        if let Some(i) = args.iter().position(|a| a == DATA_ARG) {
            let dir = args
                .get(i + 1)
                .ok_or_else(|| Error::domain(format!("'{DATA_ARG}' must be followed by a directory name")))?;
            let dir = PathBuf::from(dir);
            if !Self::is_valid_data_dir(&dir) {
                return Err(Error::domain(format!(
                    "'{}' doesn't contain the expected data files",
                    dir.display()
                )));
            }
            return Ok(dir);
        }
        if let Ok(cwd) = std::env::current_dir() {
            if let Some(found) = Self::search_up_for_data_dir(&cwd) {
                return Ok(found);
            }
        }
        if let Some(arg0) = args.first() {
            if let Some(parent) = Path::new(arg0).parent() {
                if let Some(found) = Self::search_up_for_data_dir(parent) {
                    return Ok(found);
                }
            }
        }
        Err(Error::domain(
            "couldn't find a valid 'data' directory, use '-data' to specify one",
        ))
    }

    fn search_up_for_data_dir(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(d) = dir {
            let candidate = d.join("data");
            if Self::is_valid_data_dir(&candidate) {
                return Some(candidate);
            }
            dir = d.parent();
        }
        None
    }

    fn is_valid_data_dir(dir: &Path) -> bool {
        dir.is_dir()
            && REQUIRED_FILES
                .iter()
                .all(|f| dir.join(format!("{f}.txt")).is_file())
            && dir.join("jlpt").is_dir()
            && dir.join("kentei").is_dir()
    }

    // loading

    fn load_frequency_readings(&mut self, path: &Path) -> Result<()> {
        let name_col = Column::new("Name");
        let reading_col = Column::new("Reading");
        let mut f = ColumnFile::new(path, &[name_col.clone(), reading_col.clone()])?;
        while f.next_row()? {
            let name = f.get(&name_col)?.to_string();
            let reading = f.get(&reading_col)?.to_string();
            if self.frequency_readings.insert(name, reading).is_some() {
                return Err(f.error("duplicate name"));
            }
        }
        Ok(())
    }

    /// shared fields from the UCD entry for `name` (radical and strokes can
    /// be overridden by file columns for the custom file types)
    fn ucd_fields(&self, name: &str) -> UcdFields {
        let ucd = self.ucd.find(name);
        UcdFields {
            compatibility_name: (kana::Utf8Char::is_char_with_variation_selector(name))
                .then(|| ucd.map(|u| u.name().to_string()))
                .flatten(),
            radical: ucd.and_then(|u| self.radicals.find(u.radical()).ok().cloned()),
            strokes: ucd.map(Ucd::strokes),
            pinyin: ucd.map(Ucd::pinyin).filter(|p| !p.is_empty()).map(String::from),
            morohashi_id: ucd.and_then(Ucd::morohashi_id),
            nelson_ids: ucd.map(|u| u.nelson_ids().to_vec()).unwrap_or_default(),
            links: ucd
                .map(|u| {
                    UcdLinks::new(
                        u.links().iter().map(|l| l.name().to_string()).collect(),
                        u.has_traditional_links(),
                        u.linked_readings(),
                    )
                })
                .unwrap_or_default(),
            meaning: UcdData::meaning(ucd).to_string(),
            reading: UcdData::readings_as_kana(ucd),
        }
    }

    fn build_kanji(
        &self,
        name: &str,
        fields: UcdFields,
        radical: Option<RadicalRef>,
        strokes: Option<Strokes>,
        kind: KanjiKind,
    ) -> Result<Kanji> {
        let radical = radical.or(fields.radical).ok_or_else(|| {
            Error::domain(format!("UCD entry not found: {name}"))
        })?;
        let strokes = strokes.or(fields.strokes).ok_or_else(|| {
            Error::domain(format!("UCD entry not found: {name}"))
        })?;
        Ok(Kanji {
            name: name.into(),
            compatibility_name: fields.compatibility_name,
            radical,
            strokes,
            pinyin: fields.pinyin,
            morohashi_id: fields.morohashi_id,
            nelson_ids: fields.nelson_ids,
            kind,
        })
    }

    /// insert into the name map and all secondary indexes, recording (but
    /// not failing on) sanity-check problems
    fn check_insert(&mut self, kanji: Kanji) -> KanjiRef {
        self.insert_sanity_checks(&kanji);
        let k = Arc::new(kanji);
        if self.name_map.contains_key(k.name()) {
            self.report(format!("duplicate Kanji '{}'", k.name()));
            return k;
        }
        self.name_map.insert(k.name().to_string(), k.clone());
        if let Some(f) = k.frequency() {
            self.max_frequency = self.max_frequency.max(f + 1);
        }
        if let Some(id) = k.morohashi_id() {
            self.morohashi_map.entry(id).or_default().push(k.clone());
        }
        for &id in k.nelson_ids() {
            self.nelson_map.entry(id).or_default().push(k.clone());
        }
        if k.is_variant() {
            let compatibility = k.compatibility_name().to_string();
            if let Some(existing) = self
                .compatibility_map
                .insert(compatibility.clone(), k.name().to_string())
            {
                self.report(format!(
                    "compatibility name '{compatibility}' already used by '{existing}'"
                ));
            }
        }
        if k.has_grade() {
            self.grade_map.entry(k.grade()).or_default().push(k.clone());
        }
        self.type_map
            .entry(k.kanji_type())
            .or_default()
            .push(k.clone());
        k
    }

    fn insert_sanity_checks(&mut self, kanji: &Kanji) {
        let mut problems = Vec::new();
        match self.ucd.find(kanji.name()) {
            None => problems.push(format!("'{}' has no UCD entry", kanji.name())),
            Some(u) => match kanji.kanji_type() {
                KanjiType::Jouyou if !u.joyo() => problems.push(format!(
                    "'{}' is a Jouyou Kanji but not marked joyo in UCD",
                    kanji.name()
                )),
                KanjiType::Jinmei if !u.jinmei() => problems.push(format!(
                    "'{}' is a Jinmei Kanji but not marked jinmei in UCD",
                    kanji.name()
                )),
                KanjiType::LinkedJinmei => {
                    if !u.jinmei() {
                        problems.push(format!(
                            "'{}' is a Linked Jinmei Kanji but not marked jinmei in UCD",
                            kanji.name()
                        ));
                    } else if !u.links().iter().any(|l| {
                        self.ucd
                            .find(l.name())
                            .is_some_and(|t| t.joyo() || t.jinmei())
                    }) {
                        problems.push(format!(
                            "'{}' has no UCD link to a joyo or jinmei Kanji",
                            kanji.name()
                        ));
                    }
                }
                _ => {}
            },
        }
        for p in problems {
            self.report(p);
        }
    }

    fn report(&mut self, msg: String) {
        log::warn!("{msg}");
        self.load_errors.push(msg);
    }

    fn load_jouyou(&mut self, path: &Path) -> Result<()> {
        let number_col = Column::new("Number");
        let name_col = Column::new("Name");
        let radical_col = Column::new("Radical");
        let old_names_col = Column::new("OldNames");
        let year_col = Column::new("Year");
        let strokes_col = Column::new("Strokes");
        let grade_col = Column::new("Grade");
        let meaning_col = Column::new("Meaning");
        let reading_col = Column::new("Reading");
        let mut f = ColumnFile::new(
            path,
            &[
                number_col.clone(),
                name_col.clone(),
                radical_col.clone(),
                old_names_col.clone(),
                year_col.clone(),
                strokes_col.clone(),
                grade_col.clone(),
                meaning_col.clone(),
                reading_col.clone(),
            ],
        )?;
        let mut numbers = HashSet::new();
        while f.next_row()? {
            let name = f.get(&name_col)?.to_string();
            let number = f.get_u16(&number_col)?;
            if !numbers.insert(number) {
                return Err(f.error(&format!("duplicate Jouyou number {number}")));
            }
            let grade = KanjiGrade::from_str(f.get(&grade_col)?)
                .map_err(|_| f.error(&format!("unrecognized grade '{}'", f.get(&grade_col).unwrap_or_default())))?;
            if grade == KanjiGrade::None {
                return Err(f.error("all Jouyou Kanji must have a grade"));
            }
            let radical = self
                .radicals
                .find_by_name(f.get(&radical_col)?)
                .map_err(|e| f.error(&e.to_string()))?
                .clone();
            let strokes =
                Strokes::new(f.get_u8(&strokes_col)?).map_err(|e| f.error(&e.to_string()))?;
            let kind = KanjiKind::Jouyou {
                number,
                year: f.get_opt_u16(&year_col)?,
                grade,
                level: self.level(&name),
                kyu: self.kyu(&name),
                frequency: self.frequency(&name),
                old_names: split_names(f.get(&old_names_col)?),
                meaning: f.get(&meaning_col)?.to_string(),
                reading: f.get(&reading_col)?.to_string(),
            };
            let fields = self.ucd_fields(&name);
            let kanji = self.build_kanji(&name, fields, Some(radical), Some(strokes), kind)?;
            self.check_insert(kanji);
        }
        Ok(())
    }

    /// each line is a Jōyō Kanji followed by its officially recognized
    /// Jinmei variant; afterwards 'LinkedOld' Kanji are created for any
    /// remaining old names
    fn load_linked_jinmei(&mut self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reader = BufReader::new(File::open(path)?);
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let Some((jouyou, linked)) = line.split_once('\t') else {
                return Err(Error::domain(format!(
                    "bad line '{line}' - file: {file_name}, row: {}",
                    i + 1
                )));
            };
            if jouyou.is_empty() || linked.is_empty() || linked.contains('\t') {
                return Err(Error::domain(format!(
                    "bad line '{line}' - file: {file_name}, row: {}",
                    i + 1
                )));
            }
            let Some(target) = self.find_by_name(jouyou) else {
                return Err(Error::domain(format!(
                    "'{jouyou}' not found - file: {file_name}, row: {}",
                    i + 1
                )));
            };
            if self.name_map.contains_key(linked) {
                return Err(Error::domain(format!(
                    "'{linked}' already loaded - file: {file_name}, row: {}",
                    i + 1
                )));
            }
            let kind = KanjiKind::LinkedJinmei {
                link: target,
                frequency: self.frequency(linked),
                kyu: self.kyu(linked),
            };
            let fields = self.ucd_fields(linked);
            let kanji = self.build_kanji(linked, fields, None, None, kind)?;
            self.check_insert(kanji);
        }
        // old forms of Jouyou Kanji not covered above become 'LinkedOld'
        let jouyou: Vec<KanjiRef> = self.types(KanjiType::Jouyou).to_vec();
        for kanji in jouyou {
            for old in kanji.old_names().to_vec() {
                if self.find_by_name(&old).is_some() {
                    continue;
                }
                let kind = KanjiKind::LinkedOld {
                    link: kanji.clone(),
                    frequency: self.frequency(&old),
                    kyu: self.kyu(&old),
                };
                let fields = self.ucd_fields(&old);
                let kanji = self.build_kanji(&old, fields, None, None, kind)?;
                self.check_insert(kanji);
            }
        }
        Ok(())
    }

    fn load_jinmei(&mut self, path: &Path) -> Result<()> {
        let number_col = Column::new("Number");
        let name_col = Column::new("Name");
        let radical_col = Column::new("Radical");
        let old_names_col = Column::new("OldNames");
        let year_col = Column::new("Year");
        let reason_col = Column::new("Reason");
        let reading_col = Column::new("Reading");
        let mut f = ColumnFile::new(
            path,
            &[
                number_col.clone(),
                name_col.clone(),
                radical_col.clone(),
                old_names_col.clone(),
                year_col.clone(),
                reason_col.clone(),
                reading_col.clone(),
            ],
        )?;
        let mut numbers = HashSet::new();
        while f.next_row()? {
            let name = f.get(&name_col)?.to_string();
            let number = f.get_u16(&number_col)?;
            if !numbers.insert(number) {
                return Err(f.error(&format!("duplicate Jinmei number {number}")));
            }
            let reason = JinmeiReason::from_str(f.get(&reason_col)?)
                .map_err(|_| f.error(&format!("unrecognized reason '{}'", f.get(&reason_col).unwrap_or_default())))?;
            let radical = self
                .radicals
                .find_by_name(f.get(&radical_col)?)
                .map_err(|e| f.error(&e.to_string()))?
                .clone();
            let old_names = split_names(f.get(&old_names_col)?);
            let fields = self.ucd_fields(&name);
            let kind = KanjiKind::Jinmei {
                number,
                year: f.get_opt_u16(&year_col)?,
                reason,
                level: self.level(&name),
                kyu: self.kyu(&name),
                frequency: self.frequency(&name),
                old_names: old_names.clone(),
                meaning: fields.meaning.clone(),
                reading: f.get(&reading_col)?.to_string(),
            };
            let kanji = self.build_kanji(&name, fields, Some(radical), None, kind)?;
            let inserted = self.check_insert(kanji);
            // old forms of Jinmei Kanji are also official Jinmei variants
            for old in old_names {
                if self.find_by_name(&old).is_some() {
                    self.report(format!(
                        "Jinmei old name '{old}' of '{}' already loaded",
                        inserted.name()
                    ));
                    continue;
                }
                let kind = KanjiKind::LinkedJinmei {
                    link: inserted.clone(),
                    frequency: self.frequency(&old),
                    kyu: self.kyu(&old),
                };
                let fields = self.ucd_fields(&old);
                let kanji = self.build_kanji(&old, fields, None, None, kind)?;
                self.check_insert(kanji);
            }
        }
        Ok(())
    }

    fn load_extra(&mut self, path: &Path) -> Result<()> {
        let number_col = Column::new("Number");
        let name_col = Column::new("Name");
        let radical_col = Column::new("Radical");
        let strokes_col = Column::new("Strokes");
        let meaning_col = Column::new("Meaning");
        let reading_col = Column::new("Reading");
        let mut f = ColumnFile::new(
            path,
            &[
                number_col.clone(),
                name_col.clone(),
                radical_col.clone(),
                strokes_col.clone(),
                meaning_col.clone(),
                reading_col.clone(),
            ],
        )?;
        let mut numbers = HashSet::new();
        while f.next_row()? {
            let name = f.get(&name_col)?.to_string();
            let number = f.get_u16(&number_col)?;
            if !numbers.insert(number) {
                return Err(f.error(&format!("duplicate Extra number {number}")));
            }
            let radical = self
                .radicals
                .find_by_name(f.get(&radical_col)?)
                .map_err(|e| f.error(&e.to_string()))?
                .clone();
            let strokes =
                Strokes::new(f.get_u8(&strokes_col)?).map_err(|e| f.error(&e.to_string()))?;
            let fields = self.ucd_fields(&name);
            let kind = KanjiKind::Extra {
                number,
                kyu: self.kyu(&name),
                meaning: f.get(&meaning_col)?.to_string(),
                reading: f.get(&reading_col)?.to_string(),
                new_name: fields.links.names().first().cloned(),
            };
            let kanji = self.build_kanji(&name, fields, Some(radical), Some(strokes), kind)?;
            self.check_insert(kanji);
        }
        Ok(())
    }

    /// process a JLPT, frequency or Kentei list: existing Kanji are added
    /// to the matching index and unknown names create new Kanji
    fn process_list(&mut self, names: &[String], tag: ListTag) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            let kanji = match self.find_by_name(name) {
                Some(k) => k,
                None => {
                    let fields = self.ucd_fields(name);
                    let kind = match tag {
                        ListTag::Kyu(kyu) => KanjiKind::Kentei {
                            kyu,
                            reading: fields.reading.clone(),
                            meaning: fields.meaning.clone(),
                            links: fields.links.clone(),
                        },
                        _ => KanjiKind::Frequency {
                            frequency: i as Frequency + 1,
                            kyu: self.kyu(name),
                            // the readings file covers the Kanji that only
                            // exist in the frequency list
                            reading: self
                                .frequency_readings
                                .get(name)
                                .cloned()
                                .unwrap_or_default(),
                            meaning: fields.meaning.clone(),
                            links: fields.links.clone(),
                        },
                    };
                    let kanji = self.build_kanji(name, fields, None, None, kind)?;
                    self.check_insert(kanji)
                }
            };
            match tag {
                ListTag::Level(level) => {
                    self.level_map.entry(level).or_default().push(kanji)
                }
                ListTag::Kyu(kyu) => self.kyu_map.entry(kyu).or_default().push(kanji),
                ListTag::Frequency => {
                    if let Some(f) = kanji.frequency() {
                        let bucket = ((f as usize - 1) / FREQUENCY_BUCKET_ENTRIES)
                            .min(FREQUENCY_BUCKETS - 1);
                        self.frequencies[bucket].push(kanji);
                    }
                }
            }
        }
        Ok(())
    }

    /// create a Ucd Kanji for every UCD entry without one (called after all
    /// the other types)
    fn process_ucd(&mut self) -> Result<()> {
        let missing: Vec<String> = self
            .ucd
            .entries()
            .map(|u| u.name().to_string())
            .filter(|name| !self.name_map.contains_key(name))
            .collect();
        for name in missing {
            let fields = self.ucd_fields(&name);
            let kind = KanjiKind::Ucd {
                reading: fields.reading.clone(),
                meaning: fields.meaning.clone(),
                links: fields.links.clone(),
            };
            let kanji = self.build_kanji(&name, fields, None, None, kind)?;
            self.check_insert(kanji);
        }
        Ok(())
    }

    /// compare stroke counts loaded from custom files against UCD values
    fn check_strokes(&self) {
        let mut mismatches = 0_usize;
        for k in self.name_map.values() {
            if let Some(u) = self.ucd.find(k.name()) {
                if u.strokes().value() != k.strokes().value() {
                    mismatches += 1;
                }
            }
        }
        if mismatches > 0 {
            log::debug!("{mismatches} Kanji have different strokes in UCD data");
        }
    }

    fn log_stats(&self) {
        log::info!("Loaded {} Kanji", self.name_map.len());
        for t in KanjiType::iter().filter(|t| *t != KanjiType::None) {
            let list = self.types(t);
            if !list.is_empty() {
                log::info!("  {t}: {}", list.len());
            }
        }
        if self.full_debug() {
            for g in KanjiGrade::iter().filter(|g| *g != KanjiGrade::None) {
                log::info!("  grade {g}: {}", self.grades(g).len());
            }
            if !self.load_errors.is_empty() {
                log::info!("  load errors: {}", self.load_errors.len());
            }
        }
    }
}

fn split_names(s: &str) -> Vec<String> {
    s.split(',').filter(|p| !p.is_empty()).map(String::from).collect()
}
