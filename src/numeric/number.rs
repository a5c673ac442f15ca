// ============================================================================
// Radix Number
// Signed digit sequence with a floating reference power
// ============================================================================

use super::base::Base;
use super::errors::{NumberError, NumberResult};
use smallvec::{smallvec, SmallVec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single digit. Wider than any radix so intermediate results can hold
/// out-of-range or negative values until the next normalization pass.
pub type Digit = i64;

/// Digit storage, most significant first.
pub type Digits = SmallVec<[Digit; 8]>;

/// Arbitrary-base, arbitrary-precision number.
///
/// The digit at index `i` contributes `digits[i] × base^(power − i)`, so
/// `power` is the exponent of the most significant stored digit and the
/// least significant digit sits at `power − (len − 1)`.
///
/// Values returned from the engine are normalized: every digit lies in
/// `[0, base)`, there are no leading or trailing zeros, and zero is the
/// single digit `0` at power `0` with a non-negative sign.
///
/// Every transformation returns a new value. Nothing aliases a digit buffer.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Number {
    pub(crate) negative: bool,
    pub(crate) base: Option<Base>,
    pub(crate) power: i64,
    pub(crate) digits: Digits,
    pub(crate) infinite: bool,
}

impl Number {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Raw constructor. The caller is responsible for normalizing.
    #[inline]
    pub(crate) fn from_raw(negative: bool, digits: Digits, base: Option<Base>, power: i64) -> Self {
        Self {
            negative,
            base,
            power,
            digits,
            infinite: false,
        }
    }

    /// Build a number from canonical digits (most significant first).
    ///
    /// # Errors
    /// Returns `Format` if any digit is not below the base.
    pub fn from_digits(negative: bool, digits: &[u8], base: Base, power: i64) -> NumberResult<Self> {
        if digits.iter().any(|&d| d >= base.get()) {
            return Err(NumberError::Format { construct: "digit" });
        }
        let digits: Digits = if digits.is_empty() {
            smallvec![0]
        } else {
            digits.iter().map(|&d| d as Digit).collect()
        };
        Ok(Self::from_raw(negative, digits, Some(base), power).fixed())
    }

    /// Canonical zero.
    #[inline]
    pub fn zero(base: Base) -> Self {
        Self::from_raw(false, smallvec![0], Some(base), 0)
    }

    #[inline]
    pub fn one(base: Base) -> Self {
        Self::from_raw(false, smallvec![1], Some(base), 0)
    }

    /// The value `base` itself: digit 1 at power 1.
    #[inline]
    pub fn base_unit(base: Base) -> Self {
        Self::from_raw(false, smallvec![1], Some(base), 1)
    }

    /// A small literal whose base is left unset.
    ///
    /// The literal adopts the base of whatever operand it meets; combining two
    /// floating literals fails with `DualFloatingBase`.
    ///
    /// The value sits in a single digit. `i64::MIN` has no positive
    /// magnitude in a digit, so it is kept as a negative digit and takes its
    /// sign when the literal is resolved.
    pub fn floating(value: i64) -> Self {
        match Digit::try_from(value.unsigned_abs()) {
            Ok(magnitude) => Self::from_raw(value < 0, smallvec![magnitude], None, 0),
            Err(_) => Self::from_raw(false, smallvec![value], None, 0),
        }
    }

    /// Signed infinity, the result of dividing by zero.
    pub fn infinity(negative: bool, base: Base) -> Self {
        Self {
            negative,
            base: Some(base),
            power: 0,
            digits: smallvec![0],
            infinite: true,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// `None` for a floating literal.
    #[inline]
    pub fn base(&self) -> Option<Base> {
        self.base
    }

    /// Exponent of the most significant digit.
    #[inline]
    pub fn power(&self) -> i64 {
        self.power
    }

    /// Exponent of the least significant digit.
    #[inline]
    pub fn lowest_power(&self) -> i64 {
        self.power - (self.digits.len() as i64 - 1)
    }

    #[inline]
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false: a number holds at least one digit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        !self.infinite && self.digits.iter().all(|&d| d == 0)
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        !self.infinite
    }

    /// True when no digit sits below position 0.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.is_finite() && (self.is_zero() || self.lowest_power() >= 0)
    }

    /// True when this is exactly `±1`.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.is_finite() && self.power == 0 && self.digits.as_slice() == [1]
    }

    /// True when this is exactly the value of its own base.
    #[inline]
    pub fn is_base_unit(&self) -> bool {
        self.is_finite() && !self.negative && self.power == 1 && self.digits.as_slice() == [1]
    }

    /// True when some digit lies outside `[0, base)`.
    pub fn is_overloaded(&self) -> bool {
        match self.base {
            Some(base) => self.digits.iter().any(|&d| d < 0 || d >= base.radix()),
            None => false,
        }
    }

    // ========================================================================
    // Positional Indexing
    // ========================================================================

    /// Buffer index holding the digit of weight `base^power`.
    #[inline]
    pub fn index_for_power(&self, power: i64) -> i64 {
        self.power - power
    }

    /// Weight exponent of the digit at buffer index `index`.
    #[inline]
    pub fn power_for_index(&self, index: i64) -> i64 {
        self.power - index
    }

    /// Digit of weight `base^power`; zero outside the occupied range.
    #[inline]
    pub fn digit_at_power(&self, power: i64) -> Digit {
        let index = self.index_for_power(power);
        if index < 0 || index >= self.digits.len() as i64 {
            0
        } else {
            self.digits[index as usize]
        }
    }


    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Multiply by `base^by`. Only the reference power moves.
    #[inline]
    pub fn shift(&self, by: i64) -> Self {
        self.clone().into_shifted(by)
    }

    #[inline]
    pub fn into_shifted(mut self, by: i64) -> Self {
        if !self.is_zero() && !self.infinite {
            self.power += by;
        }
        self
    }

    /// Digits `start..end` as a new normalized value, keeping each digit's
    /// weight.
    ///
    /// Out-of-range bounds are clamped; an empty range yields zero.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.digits.len());
        if start >= end {
            return Self::from_raw(false, smallvec![0], self.base, 0);
        }
        Self::from_raw(
            self.negative,
            self.digits[start..end].iter().copied().collect(),
            self.base,
            self.power - start as i64,
        )
        .fixed()
    }

    /// Keep only the first `count` significant digits (truncation).
    pub fn cut(&self, count: usize) -> Self {
        if self.infinite || self.digits.len() <= count.max(1) {
            return self.clone();
        }
        self.slice(0, count.max(1))
    }

    /// Split around absolute position `at`.
    ///
    /// Returns `(high, low)` where `high` holds the digits at powers `>= at`
    /// moved down by `at`, and `low` holds the digits below `at` unchanged,
    /// so that `self == high·base^at + low`. Both halves are non-negative.
    pub fn split_at_power(&self, at: i64) -> (Self, Self) {
        let magnitude = self.abs();
        let boundary = magnitude.index_for_power(at);
        if boundary < 0 {
            return (Self::from_raw(false, smallvec![0], self.base, 0), magnitude);
        }
        let boundary = boundary as usize + 1;
        let high = magnitude.slice(0, boundary).into_shifted(-at);
        let low = magnitude.slice(boundary, magnitude.len());
        (high, low)
    }

    /// Drop every digit below position 0 (truncate toward zero).
    pub fn trunc(&self) -> Self {
        if self.infinite || self.is_integer() {
            return self.clone();
        }
        if self.power < 0 {
            return Self::from_raw(false, smallvec![0], self.base, 0);
        }
        self.slice(0, self.power as usize + 1)
    }

    /// True when some digit sits below position 0.
    #[inline]
    pub fn has_fraction(&self) -> bool {
        self.is_finite() && !self.is_zero() && self.lowest_power() < 0
    }

    /// Same digits tagged with another base.
    ///
    /// Digit values are not reinterpreted. Used to resolve a floating literal
    /// against a concrete base.
    #[inline]
    pub fn with_base(&self, base: Base) -> Self {
        let mut copy = self.clone();
        copy.base = Some(base);
        copy
    }

    /// Resolve an unset base; values that already carry one are returned as is.
    pub(crate) fn resolved(&self, base: Base) -> Self {
        match self.base {
            Some(_) => self.clone(),
            None => self.with_base(base).fixed(),
        }
    }

    #[inline]
    pub fn with_sign(&self, negative: bool) -> Self {
        let mut copy = self.clone();
        copy.negative = negative && !copy.is_zero();
        copy
    }

    #[inline]
    pub fn negate(&self) -> Self {
        self.with_sign(!self.negative)
    }

    #[inline]
    pub fn abs(&self) -> Self {
        self.with_sign(false)
    }

    /// Structural identity: same sign, base, power and digits.
    pub fn identical(&self, other: &Self) -> bool {
        self.negative == other.negative
            && self.base == other.base
            && self.power == other.power
            && self.digits == other.digits
            && self.infinite == other.infinite
    }
}
