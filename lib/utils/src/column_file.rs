//! Tab separated data file reader with named columns.
//!
//! The first row of a file names its columns. A [`Column`] can be shared by
//! several files: each distinct column name gets a process-wide number on
//! first use, while the position within a particular file comes from that
//! file's header row.

use crate::error::{Error, Result};
use crate::text::{UNICODE_STRING_MAX_SIZE, UNICODE_STRING_MIN_SIZE};
use crate::utf8::Code;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// process-wide registry assigning a unique number per column name. Written
/// only when a new name is first seen (append-only), so readers always
/// observe stable values.
static ALL_COLUMNS: Lazy<Mutex<HashMap<String, usize>>> = Lazy::new(Default::default);

fn column_number(name: &str) -> usize {
    let mut all = ALL_COLUMNS.lock().expect("column registry poisoned");
    let next = all.len();
    *all.entry(name.into()).or_insert(next)
}

/// a named column, comparable across files via its global number
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    number: usize,
}

impl Column {
    pub fn new(name: &str) -> Self {
        Column {
            name: name.into(),
            number: column_number(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> usize {
        self.number
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Column {}

/// reader for a delimiter separated file with a header row
#[derive(Debug)]
pub struct ColumnFile {
    reader: BufReader<File>,
    delimiter: char,
    file_name: String,
    current_row: usize,
    row_values: Vec<String>,
    /// column number to position in `row_values`
    positions: HashMap<usize, usize>,
}

impl ColumnFile {
    /// create a ColumnFile and process the header row (tab delimited)
    pub fn new(path: &Path, columns: &[Column]) -> Result<Self> {
        Self::with_delimiter(path, columns, '\t')
    }

    pub fn with_delimiter(path: &Path, columns: &[Column], delimiter: char) -> Result<Self> {
        let file_name = file_name_of(path);
        let fail = |msg: &str| Err(Error::domain(format!("{msg} - file: {file_name}")));
        if columns.is_empty() {
            return fail("must specify at least one column");
        }
        if !path.exists() {
            return fail("doesn't exist");
        }
        if !path.is_file() {
            return fail("not regular file");
        }
        let mut requested = HashMap::new();
        for c in columns {
            if requested.insert(c.name().to_string(), c.clone()).is_some() {
                return fail(&format!("duplicate column '{}'", c.name()));
            }
        }
        let mut reader = BufReader::new(File::open(path)?);
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return fail("missing header row");
        }
        let mut positions = HashMap::new();
        let mut found = HashSet::new();
        for (pos, name) in trim_eol(&header).split(delimiter).enumerate() {
            if !found.insert(name.to_string()) {
                return fail(&format!("duplicate header '{name}'"));
            }
            match requested.remove(name) {
                Some(column) => {
                    positions.insert(column.number(), pos);
                }
                None => return fail(&format!("unrecognized header '{name}'")),
            }
        }
        if !requested.is_empty() {
            let mut missing = requested.keys().cloned().collect::<Vec<_>>();
            missing.sort();
            return match missing.len() {
                1 => fail(&format!("column '{}' not found", missing[0])),
                n => fail(&format!("{n} columns not found: '{}'", missing.join("', '"))),
            };
        }
        Ok(ColumnFile {
            reader,
            delimiter,
            file_name,
            current_row: 0,
            row_values: vec![String::new(); columns.len()],
            positions,
        })
    }

    /// read the next row, must be called before the `get` methods
    pub fn next_row(&mut self) -> Result<bool> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        self.current_row += 1;
        let fields = trim_eol(&line).split(self.delimiter).collect::<Vec<_>>();
        let expected = self.row_values.len();
        if fields.len() > expected {
            return Err(self.error("too many columns"));
        }
        // a row missing just its final field is accepted as an empty final
        // column when the last value read was also empty
        if fields.len() < expected
            && (fields.len() + 1 < expected || !fields.last().is_some_and(|f| f.is_empty()))
        {
            return Err(self.error("not enough columns"));
        }
        for (i, value) in self.row_values.iter_mut().enumerate() {
            *value = fields.get(i).copied().unwrap_or_default().to_string();
        }
        Ok(true)
    }

    /// get the value of `column` for the current row
    pub fn get(&self, column: &Column) -> Result<&str> {
        if self.current_row == 0 {
            return Err(self.error("'next_row' must be called before calling 'get'"));
        }
        match self.positions.get(&column.number()) {
            Some(&pos) => Ok(&self.row_values[pos]),
            None => Err(self.error(&format!("unrecognized column '{}'", column.name()))),
        }
    }

    pub fn is_empty(&self, column: &Column) -> Result<bool> {
        Ok(self.get(column)?.is_empty())
    }

    /// get the value and convert to `u64` (`max` of `0` means no limit)
    pub fn get_u64(&self, column: &Column, max: u64) -> Result<u64> {
        let s = self.get(column)?;
        self.process_u64(s, column, max)
    }

    /// `None` if the column is empty, otherwise works like [`get_u64`]
    pub fn get_opt_u64(&self, column: &Column, max: u64) -> Result<Option<u64>> {
        let s = self.get(column)?;
        if s.is_empty() {
            return Ok(None);
        }
        self.process_u64(s, column, max).map(Some)
    }

    pub fn get_u8(&self, column: &Column) -> Result<u8> {
        self.get_u64(column, u8::MAX.into()).map(|x| x as u8)
    }

    pub fn get_u16(&self, column: &Column) -> Result<u16> {
        self.get_u64(column, u16::MAX.into()).map(|x| x as u16)
    }

    pub fn get_opt_u16(&self, column: &Column) -> Result<Option<u16>> {
        Ok(self.get_opt_u64(column, u16::MAX.into())?.map(|x| x as u16))
    }

    /// convert 'Y' or 'T' to true, 'N', 'F' or empty to false
    pub fn get_bool(&self, column: &Column) -> Result<bool> {
        let s = self.get(column)?;
        match s {
            "Y" | "T" => Ok(true),
            "N" | "F" | "" => Ok(false),
            _ => Err(self.error_for("failed to convert to bool", column, s)),
        }
    }

    /// convert a 4 or 5 digit (upper-case) hex value to a code point
    pub fn get_char32(&self, column: &Column) -> Result<Code> {
        let s = self.get(column)?.to_string();
        self.get_char32_value(column, &s)
    }

    /// like [`get_char32`] but takes the string to convert (helpful when a
    /// cell holds comma separated values)
    pub fn get_char32_value(&self, column: &Column, s: &str) -> Result<Code> {
        if s.len() < UNICODE_STRING_MIN_SIZE || s.len() > UNICODE_STRING_MAX_SIZE {
            return Err(self.error_for(
                "failed to convert to Code, size must be 4 or 5",
                column,
                s,
            ));
        }
        if !s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)) {
            return Err(self.error_for("failed to convert to Code, invalid hex", column, s));
        }
        Code::from_str_radix(s, 16)
            .map_err(|_| self.error_for("failed to convert to Code", column, s))
    }

    /// build a domain error that includes the file name and current row
    pub fn error(&self, msg: &str) -> Error {
        let mut result = format!("{msg} - file: {}", self.file_name);
        if self.current_row > 0 {
            result += &format!(", row: {}", self.current_row);
        }
        Error::domain(result)
    }

    /// [`error`] variant that also names a column and the offending value
    pub fn error_for(&self, msg: &str, column: &Column, value: &str) -> Error {
        self.error(&format!("{msg}, column: '{}', value: '{value}'", column.name()))
    }

    pub fn columns(&self) -> usize {
        self.row_values.len()
    }

    /// current row number, `0` means no rows have been processed yet
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn process_u64(&self, s: &str, column: &Column, max: u64) -> Result<u64> {
        let i = s
            .parse::<u64>()
            .map_err(|_| self.error_for("failed to convert to unsigned number", column, s))?;
        if max > 0 && i > max {
            return Err(self.error_for(&format!("exceeded max value of {max}"), column, s));
        }
        Ok(i)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |f| f.to_string_lossy().into())
}

/// append ".txt" to `name` inside `dir` and make sure the file exists
pub fn data_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let file = dir.join(format!("{name}.txt"));
    if !file.is_file() {
        return Err(Error::domain(format!(
            "'{}' must be a regular file",
            file.display()
        )));
    }
    Ok(file)
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}
