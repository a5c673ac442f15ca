// ============================================================================
// Constants
// E, π and ln(base), computed once per base and reused
// ============================================================================

use super::addition::add_signed;
use super::division::divide_small;
use super::Context;
use crate::numeric::{Base, Number};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Constants memoized per base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Euler's number, Σ 1/k!
    E,
    /// π by Machin's formula
    Pi,
    /// Natural logarithm of the base itself
    LnBase,
}

/// Value and the digit count it was computed with.
static CONSTANTS: LazyLock<RwLock<HashMap<(Base, Constant), (usize, Number)>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

impl Context {
    /// `constant` in `base` with `precision + guard_digits` digits.
    ///
    /// A cached value is reused whenever it was computed with at least as
    /// many digits; otherwise it is recomputed and replaces the entry.
    pub fn constant(&self, constant: Constant, base: Base) -> Number {
        let digits = self.widened().precision();
        let key = (base, constant);

        if let Some((stored, value)) = CONSTANTS.read().get(&key) {
            if *stored >= digits {
                return value.cut(digits);
            }
        }

        tracing::debug!(?constant, base = base.get(), digits, "computing constant");
        let value = match constant {
            Constant::E => self.taylor(
                Number::one(base),
                &Number::one(base),
                |k| k,
                false,
                i64::MIN,
                base,
                "e",
            ),
            Constant::Pi => self.machin_pi(base),
            Constant::LnBase => self.ln_halley(&Number::base_unit(base), base),
        };

        let mut table = CONSTANTS.write();
        let stale = table.get(&key).is_none_or(|(stored, _)| *stored < digits);
        if stale {
            table.insert(key, (digits, value.clone()));
        }
        value.cut(digits)
    }

    /// Euler's number to the context precision.
    pub fn e(&self, base: Base) -> Number {
        self.constant(Constant::E, base).cut(self.precision())
    }

    /// π to the context precision.
    pub fn pi(&self, base: Base) -> Number {
        self.constant(Constant::Pi, base).cut(self.precision())
    }

    /// π = 16·atan(1/5) − 4·atan(1/239); the two series run side by side.
    fn machin_pi(&self, base: Base) -> Number {
        let w = self.widened();
        let (a, b) = w.join(
            w.precision(),
            || self.atan_inverse(5, base),
            || self.atan_inverse(239, base),
        );
        let a = w.mul_resolved(&Number::from_i64(16, base), &a, base);
        let b = w.mul_resolved(&Number::from_i64(4, base), &b, base);
        add_signed(&a, &b, true, base, self.parallel_threshold())
    }

    /// atan(1/m) = Σ (−1)^k / ((2k+1)·m^(2k+1))
    fn atan_inverse(&self, m: i64, base: Base) -> Number {
        let digits = self.widened().precision();
        let threshold = self.parallel_threshold();
        let square = m * m;

        let mut power = divide_small(&Number::one(base), m, digits);
        let mut sum = power.clone();
        for k in 1..=i64::from(self.max_iterations()) {
            power = divide_small(&power, square, digits);
            let term = divide_small(&power, 2 * k + 1, digits);
            if term.is_zero() {
                break;
            }
            sum = add_signed(&sum, &term, k % 2 == 1, base, threshold);
            if term.power() < sum.power() - digits as i64 {
                break;
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::Arc;

    fn context(precision: u16) -> Context {
        ContextBuilder::new()
            .precision(precision)
            .build(Arc::new(NoOpDiagnosticHandler))
            .unwrap()
    }

    #[test]
    fn test_e_decimal() {
        let ctx = context(30);
        let expected: Number = ">+2.71828182845904523536028747135*a".parse().unwrap();
        assert!(ctx.approx_eq(&ctx.e(Base::DECIMAL), &expected, 28).unwrap());
    }

    #[test]
    fn test_pi_decimal() {
        let ctx = context(30);
        let expected: Number = ">+3.14159265358979323846264338327*a".parse().unwrap();
        assert!(ctx.approx_eq(&ctx.pi(Base::DECIMAL), &expected, 28).unwrap());
    }

    #[test]
    fn test_pi_other_bases() {
        let ctx = context(40);
        for radix in [2u8, 7, 16, 60] {
            let pi = ctx.pi(Base::new(radix).unwrap());
            assert!((pi.to_f64() - std::f64::consts::PI).abs() < 1e-9, "base {}", radix);
        }
    }

    #[test]
    fn test_cache_serves_lower_precision() {
        let base = Base::new(11).unwrap();
        let high = context(60).e(base);
        let low = context(20).e(base);
        assert!(low.len() <= 20);
        assert!(high.cut(20).identical(&low));
    }
}
