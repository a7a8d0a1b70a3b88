//! Plain Kanji list files: one entry per line (JLPT, Kentei and frequency
//! lists) or several space separated entries per line.

use kana::Utf8Char;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use utils::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    OnePerLine,
    MultiplePerLine,
}

/// an ordered list of Kanji names with index lookup (1-based, so the
/// frequency file's first line is rank 1)
#[derive(Debug)]
pub struct ListFile {
    name: String,
    list: Vec<String>,
    map: HashMap<String, u16>,
}

impl ListFile {
    pub fn load(path: &Path, kind: ListKind) -> Result<Self> {
        Self::load_unique(path, kind, &mut HashSet::new())
    }

    /// load and also enforce uniqueness across multiple files via a caller
    /// owned name set (JLPT files share one set, Kentei files another)
    pub fn load_unique(
        path: &Path,
        kind: ListKind,
        unique: &mut HashSet<String>,
    ) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reader = BufReader::new(File::open(path).map_err(|e| {
            Error::domain(format!("can't open '{}': {e}", path.display()))
        })?);
        let mut result = ListFile {
            name,
            list: Vec::new(),
            map: HashMap::new(),
        };
        let error = |msg: String, line: usize| {
            Err(Error::domain(format!(
                "{msg} - file: {}, row: {line}",
                path.file_name().map(|f| f.to_string_lossy()).unwrap_or_default()
            )))
        };
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let row = i + 1;
            let tokens: Vec<&str> = match kind {
                ListKind::OnePerLine => {
                    let token = line.trim();
                    if token.contains(char::is_whitespace) {
                        return error(format!("got multiple tokens '{token}'"), row);
                    }
                    vec![token]
                }
                ListKind::MultiplePerLine => line.split_whitespace().collect(),
            };
            for token in tokens.into_iter().filter(|t| !t.is_empty()) {
                if Utf8Char::size(token, true) != 1 || !Utf8Char::new(token).is_valid(false) {
                    return error(format!("'{token}' is not a single multi-byte entry"), row);
                }
                if !unique.insert(token.to_string()) {
                    return error(format!("'{token}' already in another list"), row);
                }
                let index = result.list.len() as u16 + 1;
                if result.map.insert(token.to_string(), index).is_some() {
                    return error(format!("duplicate entry '{token}'"), row);
                }
                result.list.push(token.to_string());
            }
        }
        Ok(result)
    }

    /// file name without the extension ("n5", "k10", "frequency", ...)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// 1-based position of `name`, `None` if not in the list
    pub fn index(&self, name: &str) -> Option<u16> {
        self.map.get(name).copied()
    }
}
