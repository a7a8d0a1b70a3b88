//! Kanji groups: meaning groups (shared sense) and pattern groups (shared
//! phonetic or visual component), loaded from 'meaning-groups.txt' and
//! 'pattern-groups.txt'.

use crate::data::KanjiData;
use crate::kanji::KanjiRef;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use utils::column_file::{data_file, Column, ColumnFile};
use utils::error::Result;
use utils::utf8::is_any_single_byte;

#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Hash)]
pub enum GroupType {
    Meaning,
    Pattern,
}

/// pattern groups come in three flavors, determined from the group name:
/// a leading wide colon marks a 'peer' group (no parent member), a wide
/// colon later in the name marks a 'family' (the part before the colon is
/// the parent and first member) and everything else groups by reading
#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
pub enum PatternType {
    Family,
    Peer,
    Reading,
    None,
}

/// the wide colon used in pattern group names
const COLON: &str = "：";

#[derive(Debug)]
pub struct Group {
    number: u16,
    name: String,
    group_type: GroupType,
    pattern_type: PatternType,
    members: Vec<KanjiRef>,
}

pub type GroupRef = Arc<Group>;

impl Group {
    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    pub fn members(&self) -> &[KanjiRef] {
        &self.members
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} {}]", self.number, self.name)
    }
}

/// loader and by-Kanji reverse index for both group files
#[derive(Debug)]
pub struct GroupData {
    meaning_groups: Vec<GroupRef>,
    pattern_groups: Vec<GroupRef>,
    /// a Kanji can be in any number of meaning groups
    meaning_map: HashMap<String, Vec<GroupRef>>,
    /// but only one pattern group (first wins, duplicates are reported)
    pattern_map: HashMap<String, GroupRef>,
    errors: Vec<String>,
}

impl GroupData {
    /// load both group files from `dir` (defaults to the registry's data
    /// directory), resolving members against `data`
    pub fn load(data: &KanjiData, dir: Option<&Path>) -> Result<Self> {
        let dir = dir.unwrap_or_else(|| data.data_dir());
        let mut result = GroupData {
            meaning_groups: Vec::new(),
            pattern_groups: Vec::new(),
            meaning_map: HashMap::new(),
            pattern_map: HashMap::new(),
            errors: Vec::new(),
        };
        result.load_file(data, &data_file(dir, "meaning-groups")?, GroupType::Meaning)?;
        result.load_file(data, &data_file(dir, "pattern-groups")?, GroupType::Pattern)?;
        Ok(result)
    }

    pub fn meaning_groups(&self) -> &[GroupRef] {
        &self.meaning_groups
    }

    pub fn pattern_groups(&self) -> &[GroupRef] {
        &self.pattern_groups
    }

    /// meaning groups a Kanji belongs to
    pub fn meaning_groups_for(&self, name: &str) -> &[GroupRef] {
        self.meaning_map.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// the (single) pattern group a Kanji belongs to
    pub fn pattern_group_for(&self, name: &str) -> Option<&GroupRef> {
        self.pattern_map.get(name)
    }

    /// problems found while loading (missing members, duplicates)
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn load_file(&mut self, data: &KanjiData, path: &Path, group_type: GroupType) -> Result<()> {
        let number_col = Column::new("Number");
        let name_col = Column::new("Name");
        let members_col = Column::new("Members");
        let mut f = ColumnFile::new(
            path,
            &[number_col.clone(), name_col.clone(), members_col.clone()],
        )?;
        while f.next_row()? {
            let name = f.get(&name_col)?.to_string();
            if name.is_empty() {
                return Err(f.error("group must have a name"));
            }
            if is_any_single_byte(&name) {
                return Err(f.error("group name must be all multi-byte characters"));
            }
            let members = f.get(&members_col)?;
            if members.ends_with(',') {
                return Err(f.error("members ends with ,"));
            }
            let number = f.get_u16(&number_col)?;
            let (pattern_type, member_names) = member_names(&name, members, group_type);
            let mut resolved = Vec::new();
            for member in &member_names {
                match data.find_by_name(member) {
                    Some(k) => {
                        if resolved.iter().any(|m: &KanjiRef| m.name() == k.name()) {
                            return Err(f.error(&format!(
                                "group has duplicate member '{member}'"
                            )));
                        }
                        resolved.push(k);
                    }
                    None => self.errors.push(format!(
                        "failed to find member {member} in group: '{name}', number: {number}"
                    )),
                }
            }
            if resolved.len() < 2 {
                return Err(f.error("group must have at least 2 members"));
            }
            let group = Arc::new(Group {
                number,
                name,
                group_type,
                pattern_type,
                members: resolved,
            });
            for member in group.members() {
                self.add(member.name(), &group);
            }
            match group_type {
                GroupType::Meaning => self.meaning_groups.push(group),
                GroupType::Pattern => self.pattern_groups.push(group),
            }
        }
        Ok(())
    }

    fn add(&mut self, kanji: &str, group: &GroupRef) {
        match group.group_type() {
            GroupType::Meaning => self
                .meaning_map
                .entry(kanji.into())
                .or_default()
                .push(group.clone()),
            GroupType::Pattern => {
                if let Some(existing) = self.pattern_map.get(kanji) {
                    self.errors.push(format!(
                        "{kanji} from {group} already in {existing}"
                    ));
                } else {
                    self.pattern_map.insert(kanji.into(), group.clone());
                }
            }
        }
    }
}

/// classify a pattern group from its name and build the member name list
/// (the part of a family name before the colon is the first member)
fn member_names(
    name: &str,
    members: &str,
    group_type: GroupType,
) -> (PatternType, Vec<String>) {
    let mut result = Vec::new();
    let pattern_type = if group_type == GroupType::Pattern {
        if name.starts_with(COLON) {
            PatternType::Peer
        } else if name.contains(COLON) {
            result.push(kana::Utf8Char::get_first(name));
            PatternType::Family
        } else {
            PatternType::Reading
        }
    } else {
        PatternType::None
    };
    result.extend(members.split(',').filter(|m| !m.is_empty()).map(String::from));
    (pattern_type, result)
}
