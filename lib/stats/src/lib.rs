//! Multi-byte character counting over strings, files and directory trees,
//! with optional regex preprocessing (typically stripping furigana before
//! counting Kanji).

use kana::Utf8Char;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use utils::error::{Error, Result};

/// regex to remove furigana from text files: a Kanji (or wide letter)
/// followed by bracketed Kana. Almost all furigana is Hiragana but Katakana
/// shows up too, like 護謨製（ゴムせい）.
pub static REMOVE_FURIGANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Han}|[ａ-ｚＡ-Ｚ])（[ぁ-ヶー]+）").expect("bad furigana regex"));

/// replacement used with [`REMOVE_FURIGANA`] to keep just the base character
pub const DEFAULT_REPLACE: &str = "$1";

type CountMap = HashMap<String, usize>;

/// counts multi-byte characters passed to [`add`] (or read via
/// [`add_file`]), optionally filtered by a predicate and preprocessed by a
/// regex replacement
///
/// [`add`]: Utf8Count::add
/// [`add_file`]: Utf8Count::add_file
#[derive(Default)]
pub struct Utf8Count {
    map: CountMap,
    tags: HashMap<String, CountMap>,
    last_replace_tag: String,
    files: usize,
    directories: usize,
    errors: usize,
    variants: usize,
    combining_marks: usize,
    replacements: usize,
    find: Option<Regex>,
    replace: String,
    pred: Option<Box<dyn Fn(&str) -> bool>>,
}

impl Utf8Count {
    pub fn new() -> Self {
        Utf8Count::default()
    }

    /// apply `find`/`replace` to every line before counting
    pub fn with_regex(find: Regex, replace: &str) -> Self {
        Utf8Count {
            find: Some(find),
            replace: replace.into(),
            ..Utf8Count::default()
        }
    }

    /// only count characters accepted by `pred`
    pub fn filtered(mut self, pred: impl Fn(&str) -> bool + 'static) -> Self {
        self.pred = Some(Box::new(pred));
        self
    }

    /// add all multi-byte characters of `s`, under `tag` as well when given
    ///
    /// Returns the number of characters counted.
    pub fn add(&mut self, s: &str, tag: Option<&str>) -> usize {
        let mut chars = Utf8Char::new(s);
        let mut added = 0;
        while let Some(c) = chars.next(true) {
            if self.pred.as_ref().is_some_and(|p| !p(&c)) {
                continue;
            }
            *self.map.entry(c.clone()).or_default() += 1;
            if let Some(tag) = tag {
                *self
                    .tags
                    .entry(c)
                    .or_default()
                    .entry(tag.to_string())
                    .or_default() += 1;
            }
            added += 1;
        }
        self.errors += chars.errors();
        self.variants += chars.variants();
        self.combining_marks += chars.combining_marks();
        added
    }

    /// add characters from a regular file, or from all files under a
    /// directory
    ///
    /// - `add_tag`: use file names as tags when counting
    /// - `file_names`: also count the characters of each file name
    /// - `recurse`: process nested directories too (otherwise only the
    ///   direct children of `path` are processed)
    pub fn add_file(
        &mut self,
        path: &Path,
        add_tag: bool,
        file_names: bool,
        recurse: bool,
    ) -> Result<usize> {
        if !path.exists() {
            return Err(Error::domain(format!("'{}' not found", path.display())));
        }
        self.do_add_file(path, add_tag, file_names, recurse, true)
    }

    /// number of times `s` was counted
    pub fn count(&self, s: &str) -> usize {
        self.map.get(s).copied().unwrap_or_default()
    }

    /// per-tag counts for `s`
    pub fn tags(&self, s: &str) -> Option<&CountMap> {
        self.tags.get(s)
    }

    pub fn unique_entries(&self) -> usize {
        self.map.len()
    }

    pub fn map(&self) -> &CountMap {
        &self.map
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn directories(&self) -> usize {
        self.directories
    }

    /// number of lines changed by the regex
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// last tag (file name) that had a line replaced
    pub fn last_replace_tag(&self) -> &str {
        &self.last_replace_tag
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn variants(&self) -> usize {
        self.variants
    }

    pub fn combining_marks(&self) -> usize {
        self.combining_marks
    }

    fn do_add_file(
        &mut self,
        path: &Path,
        add_tag: bool,
        file_names: bool,
        recurse: bool,
        top_level: bool,
    ) -> Result<usize> {
        // only process regular files (symlinks and special files are skipped)
        let meta = std::fs::symlink_metadata(path)?;
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tag = add_tag.then_some(file_name.as_str());
        if meta.is_file() {
            self.files += 1;
            let mut added = if file_names { self.add(&file_name, tag) } else { 0 };
            added += self.process_file(path, tag)?;
            return Ok(added);
        }
        if !meta.is_dir() {
            return Ok(0);
        }
        if !top_level && !recurse {
            return Ok(0);
        }
        self.directories += 1;
        let mut added = 0;
        // sort children so results don't depend on directory iteration order
        let mut children = BTreeSet::new();
        for entry in std::fs::read_dir(path)? {
            children.insert(entry?.path());
        }
        for child in children {
            added += self.do_add_file(&child, add_tag, file_names, recurse, false)?;
        }
        Ok(added)
    }

    fn process_file(&mut self, path: &Path, tag: Option<&str>) -> Result<usize> {
        let reader = BufReader::new(File::open(path)?);
        if self.find.is_none() {
            let mut added = 0;
            for line in reader.lines() {
                added += self.add(&line?, tag);
            }
            return Ok(added);
        }
        self.process_file_with_regex(reader, tag)
    }

    /// process line by line applying the regex first. Furigana can span
    /// lines (an open wide bracket with no close on the same line), so an
    /// unfinished line is carried over and joined with the part of the next
    /// line up to its first close bracket.
    fn process_file_with_regex(
        &mut self,
        reader: BufReader<File>,
        tag: Option<&str>,
    ) -> Result<usize> {
        let mut added = 0;
        let mut carry = String::new();
        for line in reader.lines() {
            let mut line = line?;
            if !carry.is_empty() {
                if let Some(close) = close_before_open(&line) {
                    let joined = carry.clone() + &line[..close];
                    added += self.add_with_regex(&joined, tag);
                    carry.clear();
                    line = line[close..].to_string();
                    if line.is_empty() {
                        continue;
                    }
                } else {
                    added += self.add_with_regex(&carry.clone(), tag);
                    carry.clear();
                }
            }
            if has_unclosed_bracket(&line) {
                carry = line;
            } else {
                added += self.add_with_regex(&line, tag);
            }
        }
        if !carry.is_empty() {
            added += self.add_with_regex(&carry.clone(), tag);
        }
        Ok(added)
    }

    fn add_with_regex(&mut self, line: &str, tag: Option<&str>) -> usize {
        let find = self.find.as_ref().expect("regex must be set");
        let replaced = find.replace_all(line, self.replace.as_str());
        if replaced != line {
            self.replacements += 1;
            if let Some(tag) = tag {
                self.last_replace_tag = tag.into();
            }
        }
        let replaced = replaced.into_owned();
        self.add(&replaced, tag)
    }
}

/// true if the line has an open wide bracket with no close after it
fn has_unclosed_bracket(line: &str) -> bool {
    match (line.rfind('（'), line.rfind('）')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// byte position just past the first close bracket, provided no open
/// bracket comes before it
fn close_before_open(line: &str) -> Option<usize> {
    let close = line.find('）')?;
    match line.find('（') {
        Some(open) if open < close => None,
        _ => Some(close + '）'.len_utf8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use utils::block::is_kanji;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn count_characters() {
        let mut count = Utf8Count::new();
        assert_eq!(count.add("ab天気で天気", None), 4);
        assert_eq!(count.count("天"), 2);
        assert_eq!(count.count("気"), 2);
        assert_eq!(count.count("で"), 1);
        assert_eq!(count.count("a"), 0);
        assert_eq!(count.unique_entries(), 3);
    }

    #[test]
    fn predicate_filters() {
        let mut count = Utf8Count::new().filtered(|s| is_kanji(s, true));
        assert_eq!(count.add("ひら天気がな", None), 2);
        assert_eq!(count.count("天"), 1);
        assert_eq!(count.count("ひ"), 0);
    }

    #[test]
    fn counters_from_utf8char() {
        let mut count = Utf8Count::new();
        count.add("憎\u{fe00}む", None);
        assert_eq!(count.variants(), 1);
        let input = format!("キ\u{3099}");
        count.add(&input, None);
        assert_eq!(count.combining_marks(), 1);
        assert_eq!(count.count("ギ"), 1);
        count.add("\u{3099}", None);
        assert_eq!(count.errors(), 1);
    }

    #[test]
    fn tags_per_file() {
        let mut count = Utf8Count::new();
        count.add("天気", Some("one.txt"));
        count.add("天", Some("two.txt"));
        let tags = count.tags("天").unwrap();
        assert_eq!(tags.get("one.txt"), Some(&1));
        assert_eq!(tags.get("two.txt"), Some(&1));
        assert!(count.tags("気").unwrap().get("two.txt").is_none());
    }

    #[test]
    fn file_and_directory_walk() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "甲乙\n");
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        write_file(&sub, "b.txt", "甲\n");
        let mut count = Utf8Count::new();
        let added = count.add_file(dir.path(), true, false, true).unwrap();
        assert_eq!(added, 3);
        assert_eq!(count.count("甲"), 2);
        assert_eq!(count.files(), 2);
        assert_eq!(count.directories(), 2);
        // without recursion the nested file is skipped
        let mut flat = Utf8Count::new();
        assert_eq!(flat.add_file(dir.path(), true, false, false).unwrap(), 2);
        assert_eq!(flat.files(), 1);
    }

    #[test]
    fn file_names_can_be_counted() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "天.txt", "甲\n");
        let mut count = Utf8Count::new();
        let added = count.add_file(dir.path(), true, true, true).unwrap();
        assert_eq!(added, 2);
        assert_eq!(count.count("天"), 1);
    }

    #[test]
    fn furigana_regex() {
        let mut count = Utf8Count::with_regex(REMOVE_FURIGANA.clone(), DEFAULT_REPLACE);
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "t.txt", "愛（あい）の言葉（ことば）\n");
        count.add_file(&path, true, false, true).unwrap();
        assert_eq!(count.count("愛"), 1);
        assert_eq!(count.count("言"), 1);
        // the bracketed kana was stripped before counting
        assert_eq!(count.count("あ"), 0);
        assert_eq!(count.count("（"), 0);
        assert_eq!(count.replacements(), 1);
        assert_eq!(count.last_replace_tag(), "t.txt");
    }

    #[test]
    fn furigana_spanning_lines() {
        let mut count = Utf8Count::with_regex(REMOVE_FURIGANA.clone(), DEFAULT_REPLACE);
        let dir = TempDir::new().unwrap();
        // the open bracket on the first line closes on the second
        let path = write_file(dir.path(), "t.txt", "国（く\nに）と人（ひと）\n");
        count.add_file(&path, false, false, true).unwrap();
        assert_eq!(count.count("国"), 1);
        assert_eq!(count.count("人"), 1);
        assert_eq!(count.count("く"), 0);
        assert_eq!(count.count("に"), 0);
        assert_eq!(count.count("ひ"), 0);
    }

    #[test]
    fn unclosed_bracket_helpers() {
        assert!(has_unclosed_bracket("国（く"));
        assert!(!has_unclosed_bracket("国（く）"));
        assert!(has_unclosed_bracket("（あ）次（"));
        assert_eq!(close_before_open("に）と"), Some("に）".len()));
        assert_eq!(close_before_open("（あ）"), None);
        assert_eq!(close_before_open("abc"), None);
    }

    #[test]
    fn missing_file_fails() {
        let mut count = Utf8Count::new();
        assert!(count
            .add_file(Path::new("/no/such/file"), true, false, true)
            .is_err());
    }
}
