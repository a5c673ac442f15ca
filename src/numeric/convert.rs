// ============================================================================
// Native Conversions
// Integers, floats and rust_decimal at API boundaries
// ============================================================================

use super::base::Base;
use super::errors::{NumberError, NumberResult};
use super::number::{Digit, Digits, Number};
use rust_decimal::Decimal;

/// Digits summed when narrowing to `f64`; anything further is below its resolution.
const F64_SIGNIFICANT_DIGITS: usize = 64;

/// `Decimal::MAX` is `2^96 - 1`.
const DECIMAL_MAX_BITS: i64 = 96;

/// Fractional digits `Decimal` can represent.
const DECIMAL_MAX_SCALE: f64 = 28.0;

/// Fractional positions in `radix` that still reach `Decimal`'s scale.
fn decimal_fraction_depth(radix: u8) -> i64 {
    (DECIMAL_MAX_SCALE / (radix as f64).log10()).ceil() as i64 + 1
}

impl Number {
    /// Exact conversion from a native integer.
    pub fn from_i64(value: i64, base: Base) -> Self {
        Self::from_i128(value as i128, base)
    }

    pub fn from_i128(value: i128, base: Base) -> Self {
        let mut magnitude = value.unsigned_abs();
        if magnitude == 0 {
            return Self::zero(base);
        }
        let radix = base.get() as u128;
        let mut digits = Digits::new();
        while magnitude > 0 {
            digits.push((magnitude % radix) as Digit);
            magnitude /= radix;
        }
        digits.reverse();
        let power = digits.len() as i64 - 1;
        Self::from_raw(value < 0, digits, Some(base), power).fixed()
    }

    /// Convert a float, keeping at most `significant` digits.
    ///
    /// Infinite inputs map to the infinity sentinel.
    ///
    /// # Errors
    /// Returns `NonFinite` for NaN.
    pub fn from_f64(value: f64, base: Base, significant: usize) -> NumberResult<Self> {
        if value.is_nan() {
            return Err(NumberError::NonFinite);
        }
        if value.is_infinite() {
            return Ok(Self::infinity(value < 0.0, base));
        }
        if value == 0.0 {
            return Ok(Self::zero(base));
        }

        let radix = base.get() as f64;
        let mut rest = value.abs();

        // The logarithm only estimates the leading power; settle it exactly.
        let mut power = (rest.ln() / radix.ln()).floor() as i32;
        while radix.powi(power + 1) <= rest {
            power += 1;
        }
        while radix.powi(power) > rest {
            power -= 1;
        }

        let mut digits = Digits::new();
        for i in 0..significant.max(1) as i32 {
            let weight = radix.powi(power - i);
            if weight == 0.0 || rest == 0.0 {
                break;
            }
            let digit = (rest / weight).floor().clamp(0.0, radix - 1.0);
            rest -= digit * weight;
            digits.push(digit as Digit);
        }

        Ok(Self::from_raw(value < 0.0, digits, Some(base), power as i64).fixed())
    }

    /// Convert from `rust_decimal::Decimal`.
    ///
    /// Exact in base 10; other bases keep at most `fraction_digits` digits
    /// below the radix point.
    pub fn from_decimal(value: Decimal, base: Base, fraction_digits: usize) -> Self {
        let mantissa = value.mantissa();
        let scale = value.scale();
        if base == Base::DECIMAL {
            return Self::from_i128(mantissa, base).into_shifted(-(scale as i64));
        }

        let denominator = 10i128.pow(scale);
        let integer = Self::from_i128(mantissa.abs() / denominator, base);
        let mut remainder = mantissa.abs() % denominator;

        let radix = base.get() as i128;
        let mut fraction = Digits::new();
        for _ in 0..fraction_digits {
            if remainder == 0 {
                break;
            }
            remainder *= radix;
            fraction.push((remainder / denominator) as Digit);
            remainder %= denominator;
        }

        let mut digits: Digits = Digits::new();
        let top = integer.power.max(0);
        for p in (0..=top).rev() {
            digits.push(integer.digit_at_power(p));
        }
        digits.extend(fraction);
        Self::from_raw(mantissa < 0, digits, Some(base), top).fixed()
    }

    // ========================================================================
    // Narrowing
    // ========================================================================

    /// Lossy conversion to `f64`.
    pub fn to_f64(&self) -> f64 {
        let sign = if self.negative { -1.0 } else { 1.0 };
        if self.infinite {
            return sign * f64::INFINITY;
        }
        let radix = self.base.map_or(10.0, |b| b.get() as f64);
        let value: f64 = self
            .digits
            .iter()
            .take(F64_SIGNIFICANT_DIGITS)
            .enumerate()
            .map(|(i, &d)| d as f64 * radix.powf((self.power - i as i64) as f64))
            .sum();
        sign * value
    }

    /// Integer part as `i64`, truncated toward zero.
    ///
    /// # Errors
    /// - `NonFinite` for the infinity sentinel
    /// - `Overflow` if the integer part does not fit
    pub fn to_i64(&self) -> NumberResult<i64> {
        if self.infinite {
            return Err(NumberError::NonFinite);
        }
        let radix = self.base.map_or(10, |b| b.get() as i128);
        let mut value: i128 = 0;
        for p in (0..=self.power.max(0)).rev() {
            value = value
                .checked_mul(radix)
                .and_then(|v| v.checked_add(self.digit_at_power(p) as i128))
                .filter(|v| *v <= i64::MAX as i128 + 1)
                .ok_or(NumberError::Overflow)?;
        }
        if self.negative {
            value = -value;
        }
        i64::try_from(value).map_err(|_| NumberError::Overflow)
    }

    /// Conversion to `rust_decimal::Decimal`, lossy below its 28-digit scale.
    ///
    /// # Errors
    /// - `NonFinite` for the infinity sentinel
    /// - `Overflow` if the integer part exceeds `Decimal::MAX`
    pub fn to_decimal(&self) -> NumberResult<Decimal> {
        if self.infinite {
            return Err(NumberError::NonFinite);
        }
        let radix_value = self.base.map_or(10, |b| b.get());
        let radix = Decimal::from(radix_value);

        // A leading digit at base^96 or above is at least 2^96 > Decimal::MAX
        if self.power >= DECIMAL_MAX_BITS {
            return Err(NumberError::Overflow);
        }

        let mut integer = Decimal::ZERO;
        for p in (0..=self.power.max(0)).rev() {
            integer = integer
                .checked_mul(radix)
                .and_then(|v| v.checked_add(Decimal::from(self.digit_at_power(p))))
                .ok_or(NumberError::Overflow)?;
        }

        // Horner from the least significant fractional digit upward
        let mut fraction = Decimal::ZERO;
        let depth = decimal_fraction_depth(radix_value);
        for p in self.lowest_power().max(-depth).min(0)..0 {
            fraction = (fraction + Decimal::from(self.digit_at_power(p)))
                .checked_div(radix)
                .ok_or(NumberError::Overflow)?;
        }

        let magnitude = integer.checked_add(fraction).ok_or(NumberError::Overflow)?;
        Ok(if self.negative { -magnitude } else { magnitude })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i64() {
        let x = Number::from_i64(1234, Base::DECIMAL);
        assert_eq!(x.digits(), &[1, 2, 3, 4]);
        assert_eq!(x.power(), 3);

        let y = Number::from_i64(-7, Base::BINARY);
        assert_eq!(y.digits(), &[1, 1, 1]);
        assert!(y.is_negative());

        // Trailing zeros are stripped, the power keeps the magnitude
        let z = Number::from_i64(1000, Base::DECIMAL);
        assert_eq!(z.digits(), &[1]);
        assert_eq!(z.power(), 3);

        assert!(Number::from_i64(0, Base::OCTAL).is_zero());
    }

    #[test]
    fn test_i64_extremes() {
        let min = Number::from_i64(i64::MIN, Base::HEXADECIMAL);
        assert_eq!(min.to_i64().unwrap(), i64::MIN);
        let max = Number::from_i64(i64::MAX, Base::new(7).unwrap());
        assert_eq!(max.to_i64().unwrap(), i64::MAX);
    }

    #[test]
    fn test_to_i64_truncates() {
        let x = Number::from_digits(true, &[4, 2, 9], Base::DECIMAL, 1).unwrap(); // -42.9
        assert_eq!(x.to_i64().unwrap(), -42);

        let tiny = Number::from_digits(false, &[5], Base::DECIMAL, -3).unwrap();
        assert_eq!(tiny.to_i64().unwrap(), 0);
    }

    #[test]
    fn test_to_i64_overflow() {
        let huge = Number::from_digits(false, &[1], Base::DECIMAL, 40).unwrap();
        assert_eq!(huge.to_i64(), Err(NumberError::Overflow));
        assert_eq!(
            Number::infinity(false, Base::DECIMAL).to_i64(),
            Err(NumberError::NonFinite)
        );
    }

    #[test]
    fn test_from_f64() {
        // 12.5 = 1100.1b
        let x = Number::from_f64(12.5, Base::BINARY, 32).unwrap();
        assert_eq!(x.digits(), &[1, 1, 0, 0, 1]);
        assert_eq!(x.power(), 3);

        let half = Number::from_f64(0.5, Base::BINARY, 32).unwrap();
        assert_eq!(half.digits(), &[1]);
        assert_eq!(half.power(), -1);

        let neg = Number::from_f64(-3.0, Base::DECIMAL, 32).unwrap();
        assert!(neg.is_negative());
        assert_eq!(neg.to_i64().unwrap(), -3);
    }

    #[test]
    fn test_from_f64_non_finite() {
        assert_eq!(
            Number::from_f64(f64::NAN, Base::DECIMAL, 16).unwrap_err(),
            NumberError::NonFinite
        );
        let inf = Number::from_f64(f64::NEG_INFINITY, Base::DECIMAL, 16).unwrap();
        assert!(inf.is_infinite());
        assert!(inf.is_negative());
    }

    #[test]
    fn test_to_f64() {
        let x = Number::from_digits(false, &[1, 0, 1], Base::BINARY, 0).unwrap(); // 1.01b
        assert!((x.to_f64() - 1.25).abs() < 1e-12);

        let y = Number::from_i64(-255, Base::HEXADECIMAL);
        assert_eq!(y.to_f64(), -255.0);
    }

    #[test]
    fn test_from_decimal() {
        let d = Decimal::new(12345, 2); // 123.45
        let x = Number::from_decimal(d, Base::DECIMAL, 0);
        assert_eq!(x.digits(), &[1, 2, 3, 4, 5]);
        assert_eq!(x.power(), 2);

        // 2.75 in base 2 = 10.11
        let y = Number::from_decimal(Decimal::new(-275, 2), Base::BINARY, 16);
        assert_eq!(y.digits(), &[1, 0, 1, 1]);
        assert_eq!(y.power(), 1);
        assert!(y.is_negative());
    }

    #[test]
    fn test_to_decimal() {
        let x = Number::from_digits(false, &[1, 2, 3, 4, 5, 6], Base::DECIMAL, 2).unwrap();
        assert_eq!(x.to_decimal().unwrap(), Decimal::new(123456, 3));

        let y = Number::from_digits(true, &[1, 0, 1, 1], Base::BINARY, 1).unwrap();
        assert_eq!(y.to_decimal().unwrap(), Decimal::new(-275, 2));
    }

    #[test]
    fn test_to_decimal_extreme_powers() {
        let tiny = Number::one(Base::DECIMAL).shift(-1_000_000_000_000);
        assert_eq!(tiny.to_decimal().unwrap(), Decimal::ZERO);

        let tiny_binary = Number::one(Base::BINARY).shift(-1_000_000_000_000);
        assert_eq!(tiny_binary.to_decimal().unwrap(), Decimal::ZERO);

        let huge = Number::one(Base::BINARY).shift(1_000_000_000_000);
        assert_eq!(huge.to_decimal().unwrap_err(), NumberError::Overflow);
        assert_eq!(
            Number::one(Base::BINARY).shift(96).to_decimal().unwrap_err(),
            NumberError::Overflow
        );

        // Still exact near the edge of Decimal's scale
        let small = Number::from_digits(false, &[2, 5], Base::DECIMAL, -20).unwrap();
        assert_eq!(small.to_decimal().unwrap(), Decimal::new(25, 21));
    }
}
