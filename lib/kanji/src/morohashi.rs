//! Morohashi (Dai Kan-Wa Jiten) index numbers.

use std::fmt;
use std::str::FromStr;
use utils::error::Error;

/// a Morohashi ID: usually just a number, but it can carry a 'P' (prime)
/// suffix, e.g. '4138' maps to 嗩 while '4138P' maps to 嘆
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MorohashiId {
    id: u16,
    prime: bool,
}

impl MorohashiId {
    pub fn new(id: u16, prime: bool) -> Self {
        MorohashiId { id, prime }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn prime(&self) -> bool {
        self.prime
    }
}

impl FromStr for MorohashiId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (digits, prime) = match s.strip_suffix('P') {
            Some(d) => (d, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::domain(format!("invalid Morohashi ID '{s}'")));
        }
        let id = digits
            .parse::<u16>()
            .map_err(|_| Error::range(format!("Morohashi ID '{s}' out of range")))?;
        Ok(MorohashiId { id, prime })
    }
}

impl fmt::Display for MorohashiId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.id, if self.prime { "P" } else { "" })
    }
}
