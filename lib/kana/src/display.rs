//! Display width handling for terminal output.
//!
//! Kana, Kanji and other wide characters occupy two columns in a terminal
//! while variation selectors and combining marks occupy none, so plain
//! `len`-based padding misaligns mixed-width output.

use std::io::Write;
use utils::block::{is_hiragana_code, is_katakana_code, is_kanji_code, is_non_spacing_code};
use utils::utf8::Code;
use utils::Result;

fn is_wide(c: Code) -> bool {
    is_kanji_code(c)
        || is_hiragana_code(c)
        || is_katakana_code(c)
        || (0x3000..=0x303f).contains(&c)  // CJK Symbols and Punctuation
        || (0x3190..=0x319f).contains(&c)  // Kanbun
        || (0xff00..=0xff60).contains(&c)  // Fullwidth Forms
        || (0xffe0..=0xffe6).contains(&c)  // Fullwidth Signs
}

/// terminal display width of `s` (wide characters count 2, non-spacing
/// marks count 0)
pub fn display_size(s: &str) -> usize {
    s.chars()
        .map(|c| {
            let code = c as Code;
            if is_non_spacing_code(code) {
                0
            } else if is_wide(code) {
                2
            } else {
                1
            }
        })
        .sum()
}

/// pad `s` with spaces on the right up to `width` display columns
pub fn pad_to(s: &str, width: usize) -> String {
    let size = display_size(s);
    if size >= width {
        s.into()
    } else {
        format!("{s}{}", " ".repeat(width - size))
    }
}

/// simple aligned table for terminal output
///
/// Cell padding is based on display width so columns line up even when the
/// cells mix Kana, Kanji and Ascii.
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    /// when true an automatic row count is written into the first column
    count_in_first_column: bool,
}

impl Table {
    pub fn new(header: Vec<String>, count_in_first_column: bool) -> Self {
        Table {
            header,
            rows: Vec::new(),
            count_in_first_column,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row = row;
        if self.count_in_first_column {
            row.insert(0, (self.rows.len() + 1).to_string());
        }
        self.rows.push(row);
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn print(&self, out: &mut dyn Write) -> Result<()> {
        let mut header = self.header.clone();
        if self.count_in_first_column && !header.is_empty() {
            header.insert(0, "No.".into());
        }
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain([header.len()])
            .max()
            .unwrap_or_default();
        let mut widths = vec![0; columns];
        for row in [&header].into_iter().chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(display_size(cell));
            }
        }
        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .fold(String::from("+"), |acc, part| acc + &part + "+");
        writeln!(out, "{border}")?;
        if !header.is_empty() {
            self.print_row(out, &header, &widths)?;
            writeln!(out, "{border}")?;
        }
        for row in &self.rows {
            self.print_row(out, row, &widths)?;
        }
        writeln!(out, "{border}")?;
        Ok(())
    }

    fn print_row(&self, out: &mut dyn Write, row: &[String], widths: &[usize]) -> Result<()> {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or_default();
            line += &format!("| {} ", pad_to(cell, *width));
        }
        writeln!(out, "{line}|")?;
        Ok(())
    }
}
