// ============================================================================
// Format Module
// Text encodings layered on top of the number representation
// ============================================================================
//
// - radix: the radix-64 notation (`>+1.23*a^+4`), both digit orders
// - record: the labeled {Base, Sign, Powr, Nums} debug/interchange record
//
// Display renders the radix notation when the base fits the alphabet and
// falls back to the compact record otherwise.

pub mod radix;
pub mod record;

pub use radix::{Endianness, ALPHABET, MAX_TEXT_BASE};

use crate::numeric::{Number, NumberError, NumberResult};
use std::fmt;
use std::str::FromStr;

impl Number {
    /// Parse the radix-64 notation.
    pub fn from_radix_str(text: &str) -> NumberResult<Self> {
        radix::parse(text)
    }

    /// Parse the labeled record, pretty or compact.
    pub fn from_record_str(text: &str) -> NumberResult<Self> {
        record::parse(text)
    }

    /// Render as big-endian radix-64 text.
    pub fn to_radix_string(&self) -> NumberResult<String> {
        radix::render(self, Endianness::Big, None)
    }

    /// Render as radix-64 text keeping at most `max_digits` significant digits.
    pub fn to_radix_string_limited(&self, max_digits: usize) -> NumberResult<String> {
        radix::render(self, Endianness::Big, Some(max_digits))
    }

    pub fn to_radix_string_with(&self, endianness: Endianness) -> NumberResult<String> {
        radix::render(self, endianness, None)
    }

    /// Multi-line labeled record.
    pub fn to_record_string(&self) -> NumberResult<String> {
        record::render(self, true)
    }

    /// Single-line labeled record.
    pub fn to_record_string_compact(&self) -> NumberResult<String> {
        record::render(self, false)
    }
}

impl FromStr for Number {
    type Err = NumberError;

    /// Accepts either encoding; a leading `{` selects the record.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('{') {
            record::parse(s)
        } else {
            radix::parse(s)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "{}inf", if self.is_negative() { '-' } else { '+' });
        }
        match self.to_radix_string() {
            Ok(text) => f.write_str(&text),
            Err(_) => match self.to_record_string_compact() {
                Ok(text) => f.write_str(&text),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Number")
            .field("negative", &self.negative)
            .field("base", &self.base)
            .field("power", &self.power)
            .field("digits", &self.digits.as_slice())
            .field("infinite", &self.infinite)
            .finish()
    }
}
