//! Bounded single-character choice prompter.
//!
//! Input comes from an injected reader so interactive drivers can hand in a
//! terminal stream while tests provide canned input. Bad option setups fail
//! at call time; user typos just re-prompt.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use utils::error::{Error, Result};

/// option character to description, ordered for prompt display
pub type Choices = BTreeMap<char, String>;

pub struct Choice<R, W> {
    input: R,
    out: W,
    quit: Option<char>,
    quit_description: String,
}

impl<R: BufRead, W: Write> Choice<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Choice {
            input,
            out,
            quit: None,
            quit_description: String::new(),
        }
    }

    pub fn with_quit(input: R, out: W, quit: char, description: &str) -> Result<Self> {
        let mut result = Self::new(input, out);
        result.set_quit(quit, description)?;
        Ok(result)
    }

    pub fn set_quit(&mut self, quit: char, description: &str) -> Result<()> {
        check_printable_ascii(quit, "quit option")?;
        self.quit = Some(quit);
        self.quit_description = description.into();
        Ok(())
    }

    pub fn clear_quit(&mut self) {
        self.quit = None;
    }

    pub fn quit(&self) -> Option<char> {
        self.quit
    }

    pub fn is_quit(&self, c: char) -> bool {
        self.quit == Some(c)
    }

    /// prompt with `msg` and the given choices until a valid option is read
    ///
    /// An empty input line selects `default` when one is given. The quit
    /// option (when set and `use_quit` is true) is added to the choices.
    pub fn get(
        &mut self,
        msg: &str,
        use_quit: bool,
        choices: &Choices,
        default: Option<char>,
    ) -> Result<char> {
        let mut all = choices.clone();
        if let Some(quit) = self.quit {
            if use_quit {
                if all
                    .insert(quit, self.quit_description.clone())
                    .is_some()
                {
                    return Err(Error::domain(format!(
                        "quit option '{quit}' already in choices"
                    )));
                }
            } else if all.contains_key(&quit) {
                return Err(Error::domain(format!(
                    "quit option '{quit}' already in choices"
                )));
            }
        }
        if all.is_empty() {
            return Err(Error::domain("must specify at least one choice"));
        }
        let mut prompt = format!("{msg}{}", if msg.is_empty() { "(" } else { " (" });
        prompt += &option_list(&all)?;
        match default {
            Some(d) => {
                if !all.contains_key(&d) {
                    return Err(Error::domain(format!(
                        "default option '{d}' not in choices"
                    )));
                }
                prompt += &format!(") def '{d}': ");
            }
            None => prompt += "): ",
        }
        loop {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // end of input: fall back to the default if there is one
                return default
                    .ok_or_else(|| Error::domain("unexpected end of input"));
            }
            let line = line.trim_end_matches('\n').trim_end_matches('\r');
            if line.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
                continue;
            }
            let mut chars = line.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if all.contains_key(&c) {
                    return Ok(c);
                }
            }
        }
    }

    /// [`get`] with a contiguous range of options added to `choices`
    pub fn get_range(
        &mut self,
        range: (char, char),
        msg: &str,
        use_quit: bool,
        choices: &Choices,
        default: Option<char>,
    ) -> Result<char> {
        check_printable_ascii(range.0, "first range option")?;
        check_printable_ascii(range.1, "last range option")?;
        if range.0 > range.1 {
            return Err(Error::domain(format!(
                "first range option '{}' is greater than last '{}'",
                range.0, range.1
            )));
        }
        let mut all = choices.clone();
        for c in range.0..=range.1 {
            if all.insert(c, String::new()).is_some() {
                return Err(Error::domain(format!(
                    "range option '{c}' already in choices"
                )));
            }
        }
        self.get(msg, use_quit, &all, default)
    }
}

/// build the option list for the prompt, collapsing runs of options that
/// have no description into ranges like "1-4"
fn option_list(choices: &Choices) -> Result<String> {
    let mut result = String::new();
    let mut range_start: Option<char> = None;
    let mut prev = '\0';
    let complete_range = |result: &mut String, start: Option<char>, prev: char| {
        if let Some(s) = start {
            if s != prev {
                result.push('-');
                result.push(prev);
            }
        }
    };
    for (i, (&c, description)) in choices.iter().enumerate() {
        check_printable_ascii(c, "option")?;
        if description.is_empty() {
            if range_start.is_none() {
                if i > 0 {
                    result += ", ";
                }
                result.push(c);
                range_start = Some(c);
            } else if c as u32 - prev as u32 > 1 {
                // a gap ends the current range
                complete_range(&mut result, range_start, prev);
                result += ", ";
                result.push(c);
                range_start = Some(c);
            }
        } else {
            complete_range(&mut result, range_start, prev);
            range_start = None;
            if i > 0 {
                result += ", ";
            }
            result.push(c);
            result.push('=');
            result += description;
        }
        prev = c;
    }
    complete_range(&mut result, range_start, prev);
    Ok(result)
}

fn check_printable_ascii(c: char, msg: &str) -> Result<()> {
    if !(' '..='~').contains(&c) {
        return Err(Error::domain(format!(
            "{msg} is non-printable: 0x{:02x}",
            c as u32
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn choices(pairs: &[(char, &str)]) -> Choices {
        pairs.iter().map(|(c, d)| (*c, d.to_string())).collect()
    }

    fn run(input: &str, f: impl FnOnce(&mut Choice<Cursor<&[u8]>, Vec<u8>>) -> Result<char>)
        -> (Result<char>, String) {
        let mut choice = Choice::new(Cursor::new(input.as_bytes()), Vec::new());
        let result = f(&mut choice);
        let output = String::from_utf8(choice.out).unwrap();
        (result, output)
    }

    #[test]
    fn returns_a_valid_choice() {
        let (result, output) = run("b\n", |c| {
            c.get("pick", true, &choices(&[('a', "first"), ('b', "second")]), None)
        });
        assert_eq!(result.unwrap(), 'b');
        assert_eq!(output, "pick (a=first, b=second): ");
    }

    #[test]
    fn reprompts_on_bad_input() {
        let (result, output) = run("x\nzz\na\n", |c| {
            c.get("pick", true, &choices(&[('a', "first")]), None)
        });
        assert_eq!(result.unwrap(), 'a');
        assert_eq!(output.matches("pick (").count(), 3);
    }

    #[test]
    fn empty_line_selects_default() {
        let (result, output) = run("\n", |c| {
            c.get("pick", true, &choices(&[('a', "first"), ('b', "")]), Some('b'))
        });
        assert_eq!(result.unwrap(), 'b');
        assert!(output.ends_with("def 'b': "), "{output}");
    }

    #[test]
    fn default_must_be_a_choice() {
        let (result, _) = run("", |c| {
            c.get("pick", true, &choices(&[('a', "first")]), Some('z'))
        });
        let e = result.unwrap_err();
        assert!(e.to_string().contains("default option 'z' not in choices"));
    }

    #[test]
    fn quit_option_is_added() {
        let mut choice =
            Choice::with_quit(Cursor::new(&b"q\n"[..]), Vec::new(), 'q', "quit").unwrap();
        let result = choice
            .get("pick", true, &choices(&[('a', "first")]), None)
            .unwrap();
        assert_eq!(result, 'q');
        assert!(choice.is_quit(result));
    }

    #[test]
    fn duplicate_quit_fails() {
        let mut choice =
            Choice::with_quit(Cursor::new(&b""[..]), Vec::new(), 'a', "quit").unwrap();
        let e = choice
            .get("pick", true, &choices(&[('a', "first")]), None)
            .unwrap_err();
        assert!(e.to_string().contains("quit option 'a' already in choices"));
    }

    #[test]
    fn non_printable_options_fail() {
        let mut choice = Choice::new(Cursor::new(&b""[..]), Vec::new());
        assert!(choice.set_quit('\n', "quit").is_err());
        let e = choice
            .get("pick", true, &choices(&[('\t', "tab")]), None)
            .unwrap_err();
        assert!(e.to_string().contains("non-printable"), "{e}");
    }

    #[test]
    fn range_options_collapse_in_prompt() {
        let (result, output) = run("2\n", |c| {
            c.get_range(('1', '4'), "pick", false, &Choices::new(), None)
        });
        assert_eq!(result.unwrap(), '2');
        assert_eq!(output, "pick (1-4): ");
    }

    #[test]
    fn range_mixes_with_described_choices() {
        let (result, output) = run("b\n", |c| {
            c.get_range(('1', '3'), "", false, &choices(&[('b', "back")]), None)
        });
        assert_eq!(result.unwrap(), 'b');
        assert_eq!(output, "(1-3, b=back): ");
    }

    #[test]
    fn inverted_range_fails() {
        let (result, _) = run("", |c| {
            c.get_range(('4', '1'), "pick", false, &Choices::new(), None)
        });
        assert!(result.unwrap_err().to_string().contains("greater than last"));
    }

    #[test]
    fn end_of_input_without_default_fails() {
        let (result, _) = run("", |c| c.get("pick", true, &choices(&[('a', "x")]), None));
        assert!(result.is_err());
        let (result, _) = run("", |c| {
            c.get("pick", true, &choices(&[('a', "x")]), Some('a'))
        });
        assert_eq!(result.unwrap(), 'a');
    }
}
