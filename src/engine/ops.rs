// ============================================================================
// Operator Overloads
// Convenience operators over a default context
// ============================================================================
//
// Each operator snapshots `Context::default()`. They panic where the
// fallible methods return an error; use the `Context` methods in production.

use super::Context;
use crate::numeric::Number;
use std::ops::{Add, Mul, Neg, Shl, Shr, Sub};

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, other: Self) -> Self::Output {
        Context::default()
            .add(self, other)
            .expect("Number addition with incompatible bases - use Context::add in production")
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, other: Self) -> Self::Output {
        Context::default()
            .sub(self, other)
            .expect("Number subtraction with incompatible bases - use Context::sub in production")
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, other: Self) -> Self::Output {
        &self - &other
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, other: Self) -> Self::Output {
        Context::default()
            .mul(self, other)
            .expect("Number multiplication with incompatible bases - use Context::mul in production")
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, other: Self) -> Self::Output {
        &self * &other
    }
}

/// `x << n` multiplies by `base^n`.
impl Shl<i64> for Number {
    type Output = Number;

    fn shl(self, by: i64) -> Self::Output {
        self.into_shifted(by)
    }
}

/// `x >> n` divides by `base^n`.
impl Shr<i64> for Number {
    type Output = Number;

    fn shr(self, by: i64) -> Self::Output {
        self.into_shifted(-by)
    }
}
