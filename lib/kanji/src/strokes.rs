//! Stroke counts, with an optional variant count for Kanji whose UCD data
//! lists a second value.

use std::cmp::Ordering;
use std::fmt;
use utils::error::{Error, Result};

/// 9F98 (龘) has 48 strokes and 2C6A9 has 53
pub const MAX_STROKES: u8 = 53;
/// variant strokes can't be 0 or 1 and the largest seen is 33
pub const MAX_VARIANT_STROKES: u8 = 33;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Strokes {
    value: u8,
    variant: Option<u8>,
}

impl Strokes {
    pub fn new(value: u8) -> Result<Self> {
        if value == 0 || value > MAX_STROKES {
            return Err(Error::range(format!("strokes '{value}' out of range")));
        }
        Ok(Strokes {
            value,
            variant: None,
        })
    }

    pub fn with_variant(value: u8, variant: u8) -> Result<Self> {
        let mut result = Strokes::new(value)?;
        if variant < 2 || variant > MAX_VARIANT_STROKES {
            return Err(Error::range(format!(
                "variant strokes '{variant}' out of range"
            )));
        }
        result.variant = Some(variant);
        Ok(result)
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn variant(&self) -> Option<u8> {
        self.variant
    }

    pub fn has_variant(&self) -> bool {
        self.variant.is_some()
    }
}

impl PartialOrd for Strokes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Strokes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Strokes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert!(Strokes::new(1).is_ok());
        assert!(Strokes::new(53).is_ok());
        assert!(Strokes::new(0).is_err());
        assert!(Strokes::new(54).is_err());
        assert!(Strokes::with_variant(10, 2).is_ok());
        assert!(Strokes::with_variant(10, 1).is_err());
        assert!(Strokes::with_variant(10, 34).is_err());
    }

    #[test]
    fn ordering_ignores_variant() {
        let a = Strokes::with_variant(5, 6).unwrap();
        let b = Strokes::new(5).unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(Strokes::new(4).unwrap() < b);
    }

    #[test]
    fn display() {
        assert_eq!(Strokes::new(10).unwrap().to_string(), "10");
        assert_eq!(Strokes::with_variant(10, 12).unwrap().to_string(), "10");
    }
}
