// ============================================================================
// Radix
// Validated base type and floating-base resolution
// ============================================================================

use super::errors::{NumberError, NumberResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A radix in `2..=255`.
///
/// A number whose base is still unknown carries `Option<Base>::None` instead
/// of a magic zero; see [`resolve`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Base(u8);

impl Base {
    pub const BINARY: Self = Self(2);
    pub const OCTAL: Self = Self(8);
    pub const DECIMAL: Self = Self(10);
    pub const HEXADECIMAL: Self = Self(16);

    /// Create a base.
    ///
    /// # Errors
    /// Returns `InvalidBase` for anything below 2.
    #[inline]
    pub fn new(radix: u8) -> NumberResult<Self> {
        if radix < 2 {
            Err(NumberError::InvalidBase(radix as u16))
        } else {
            Ok(Self(radix))
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The radix as a digit value, for carry arithmetic.
    #[inline]
    pub const fn radix(self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<u8> for Base {
    type Error = NumberError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Base> for u8 {
    fn from(base: Base) -> Self {
        base.0
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base({})", self.0)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the base two operands share.
///
/// An unset base adopts the other operand's base.
///
/// # Errors
/// - `IncompatibleBase` if both bases are set and differ
/// - `DualFloatingBase` if neither is set
pub fn resolve(left: Option<Base>, right: Option<Base>) -> NumberResult<Base> {
    match (left, right) {
        (Some(l), Some(r)) if l == r => Ok(l),
        (Some(l), Some(r)) => Err(NumberError::IncompatibleBase {
            left: l.get(),
            right: r.get(),
        }),
        (Some(b), None) | (None, Some(b)) => Ok(b),
        (None, None) => Err(NumberError::DualFloatingBase),
    }
}

/// Resolve the base shared by any number of operands.
pub fn resolve_all<I>(bases: I) -> NumberResult<Base>
where
    I: IntoIterator<Item = Option<Base>>,
{
    let mut found: Option<Base> = None;
    let mut any = false;
    for base in bases {
        any = true;
        if let Some(b) = base {
            found = Some(resolve(found, Some(b))?);
        }
    }
    match found {
        Some(b) => Ok(b),
        None if any => Err(NumberError::DualFloatingBase),
        None => Err(NumberError::InvalidBase(0)),
    }
}
