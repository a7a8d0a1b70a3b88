pub mod data;
pub mod group;
pub mod kanji;
pub mod list_file;
pub mod morohashi;
pub mod radical;
pub mod strokes;
pub mod types;
pub mod ucd;

pub use data::{DebugMode, KanjiData};
pub use group::{Group, GroupData, GroupType, PatternType};
pub use kanji::{Frequency, Kanji, KanjiInfo, KanjiKind, KanjiRef, NelsonId};
pub use morohashi::MorohashiId;
pub use radical::{Radical, RadicalData, RadicalRef};
pub use strokes::Strokes;
pub use types::{JinmeiReason, JlptLevel, KanjiGrade, KanjiType, KenteiKyu, UcdLinkType};
pub use ucd::{Ucd, UcdData};
