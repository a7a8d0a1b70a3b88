//! The 214 official Kanji radicals (部首).

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use utils::column_file::{Column, ColumnFile};
use utils::error::{Error, Result};

pub const MAX_RADICAL: u8 = 214;

/// one radical from 'radicals.txt', identified by its number
#[derive(Debug)]
pub struct Radical {
    number: u8,
    name: String,
    long_name: String,
    reading: String,
    examples: Vec<String>,
}

pub type RadicalRef = Arc<Radical>;

impl Radical {
    pub(crate) fn new(
        number: u8,
        name: &str,
        long_name: &str,
        reading: &str,
        examples: Vec<String>,
    ) -> Self {
        Radical {
            number,
            name: name.into(),
            long_name: long_name.into(),
            reading: reading.into(),
            examples,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// the radical itself (a single wide character like 水)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the fuller name, like 氵(さんずい) for radical 85
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

impl PartialEq for Radical {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Radical {}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.number)
    }
}

/// catalog of radicals keyed by number and name
#[derive(Default, Debug)]
pub struct RadicalData {
    by_number: HashMap<u8, RadicalRef>,
    by_name: HashMap<String, RadicalRef>,
}

impl RadicalData {
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let number_col = Column::new("Number");
        let name_col = Column::new("Name");
        let long_name_col = Column::new("LongName");
        let reading_col = Column::new("Reading");
        let examples_col = Column::new("Examples");
        let mut f = ColumnFile::new(
            path,
            &[
                number_col.clone(),
                name_col.clone(),
                long_name_col.clone(),
                reading_col.clone(),
                examples_col.clone(),
            ],
        )?;
        while f.next_row()? {
            let number = f.get_u64(&number_col, MAX_RADICAL.into())? as u8;
            if number == 0 {
                return Err(f.error("radical number can't be 0"));
            }
            let name = f.get(&name_col)?.to_string();
            if name.is_empty() {
                return Err(f.error("radical name can't be empty"));
            }
            let radical = Arc::new(Radical {
                number,
                name: name.clone(),
                long_name: f.get(&long_name_col)?.to_string(),
                reading: f.get(&reading_col)?.to_string(),
                examples: f
                    .get(&examples_col)?
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            });
            if self.by_number.insert(number, radical.clone()).is_some() {
                return Err(f.error(&format!("duplicate radical number {number}")));
            }
            if self.by_name.insert(name.clone(), radical).is_some() {
                return Err(f.error(&format!("duplicate radical name '{name}'")));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn find(&self, number: u8) -> Result<&RadicalRef> {
        self.by_number
            .get(&number)
            .ok_or_else(|| Error::domain(format!("radical {number} not found")))
    }

    pub fn find_by_name(&self, name: &str) -> Result<&RadicalRef> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::domain(format!("radical '{name}' not found")))
    }
}
