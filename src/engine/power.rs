// ============================================================================
// Powers, Roots and Logarithms
// Exponentiation by squaring, Newton roots, Halley logarithm
// ============================================================================

use super::addition::add_signed;
use super::constants::Constant;
use super::division::{divide_small, native_digits};
use super::Context;
use crate::interfaces::Diagnostic;
use crate::numeric::{Base, Number, NumberError, NumberResult};
use rayon::prelude::*;

impl Context {
    // ========================================================================
    // Integer Helpers
    // ========================================================================

    /// Largest integer not above `a`.
    pub fn floor(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        if a.is_infinite() || a.is_integer() {
            return a.into_owned();
        }
        let truncated = a.trunc();
        if a.is_negative() {
            self.add_resolved(&truncated, &Number::one(base), true, base)
        } else {
            truncated
        }
    }

    /// Integer value of an operand that must be one; fractions are floored
    /// with a `NonIntegerOperand` diagnostic.
    fn integer_operand(&self, a: &Number, operation: &'static str) -> NumberResult<i64> {
        if a.is_infinite() {
            return Err(NumberError::NonFinite);
        }
        if a.has_fraction() {
            self.emit(Diagnostic::NonIntegerOperand { operation });
            return self.floor(a).to_i64();
        }
        a.to_i64()
    }

    // ========================================================================
    // Exponentiation
    // ========================================================================

    /// `a^b` for integer `b`; a fractional exponent is floored with a
    /// diagnostic.
    ///
    /// # Errors
    /// - base resolution failures
    /// - `NonFinite` for an infinite exponent
    /// - `Overflow` for an exponent beyond `i64`
    pub fn pow(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        let exponent = self.integer_operand(&b, "pow")?;
        Ok(self.pow_resolved(&a, exponent, base))
    }

    /// `a^n` for a native exponent.
    pub fn pow_int(&self, a: &Number, n: i64) -> Number {
        let (base, a) = self.operand(a);
        self.pow_resolved(&a, n, base)
    }

    pub(crate) fn pow_resolved(&self, a: &Number, n: i64, base: Base) -> Number {
        if n == 0 {
            return Number::one(base);
        }
        if a.is_infinite() {
            return if n > 0 {
                Number::infinity(a.is_negative() && n % 2 != 0, base)
            } else {
                Number::zero(base)
            };
        }
        if n < 0 {
            let denominator = self.pow_magnitude(a, n.unsigned_abs(), base, None);
            return self.div_resolved(&Number::one(base), &denominator, base);
        }
        self.pow_magnitude(a, n as u64, base, None)
    }

    /// Exponentiation by squaring. With `cut`, every product is truncated
    /// to that many digits.
    pub(crate) fn pow_magnitude(&self, a: &Number, e: u64, base: Base, cut: Option<usize>) -> Number {
        if e == 0 {
            return Number::one(base);
        }
        if e == 1 || a.is_zero() {
            return a.clone();
        }
        if a.is_unit() {
            return if a.is_negative() && e % 2 == 1 {
                a.clone()
            } else {
                Number::one(base)
            };
        }
        if a.is_base_unit() {
            return Number::one(base).into_shifted(i64::try_from(e).unwrap_or(i64::MAX));
        }

        let product = |x: &Number, y: &Number| match cut {
            Some(digits) => self.mul_cut(x, y, base, digits),
            None => self.mul_resolved(x, y, base),
        };

        let half = self.pow_magnitude(a, e / 2, base, cut);
        let square = product(&half, &half);
        if e % 2 == 1 {
            product(&square, a)
        } else {
            square
        }
    }

    /// Real power `a^b = exp(b·ln a)`; integer exponents go through `pow`.
    ///
    /// # Errors
    /// `OutOfDomain` for a fractional power of a negative value.
    pub fn powf(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        if b.is_infinite() {
            return Err(NumberError::NonFinite);
        }
        if b.is_integer() {
            return Ok(self.pow_resolved(&a, b.to_i64()?, base));
        }
        if a.is_negative() {
            return Err(NumberError::OutOfDomain("fractional power of a negative value"));
        }
        if a.is_zero() {
            if b.is_negative() {
                self.emit(Diagnostic::DivisionByZero { negative: false });
                return Ok(Number::infinity(false, base));
            }
            return Ok(Number::zero(base));
        }

        let w = self.widened();
        let log = w.ln_resolved(&a, base)?;
        let exponent = w.mul_resolved(&b, &log, base);
        Ok(w.exp_resolved(&exponent, base).cut(self.precision()))
    }

    // ========================================================================
    // Roots
    // ========================================================================

    /// Integer root; a fractional degree is floored with a diagnostic.
    ///
    /// # Errors
    /// `OutOfDomain` for a non-positive degree or an even root of a
    /// negative value.
    pub fn root(&self, a: &Number, degree: &Number) -> NumberResult<Number> {
        let (base, a, degree) = self.operands(a, degree)?;
        let n = self.integer_operand(&degree, "root")?;
        self.root_resolved(&a, n, base)
    }

    pub fn sqrt(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        self.root_resolved(&a, 2, base)
    }

    fn root_resolved(&self, a: &Number, n: i64, base: Base) -> NumberResult<Number> {
        if n <= 0 {
            return Err(NumberError::OutOfDomain("root degree must be positive"));
        }
        if a.is_negative() && n % 2 == 0 {
            return Err(NumberError::OutOfDomain("even root of a negative value"));
        }
        if n == 1 || a.is_zero() || a.is_infinite() {
            return Ok(a.clone());
        }

        let x = a.abs();
        let w = self.widened();
        let digits = w.precision();
        let threshold = self.parallel_threshold();

        // x = m·base^k with m in [1, base); seed with the native root of
        // m·base^(k mod n), then restore base^(k div n).
        let k = x.power();
        let (whole, part) = (k.div_euclid(n), k.rem_euclid(n));
        let radix_ln = (base.get() as f64).ln();
        let mantissa = x.shift(-k).to_f64();
        let seed = ((mantissa.ln() + part as f64 * radix_ln) / n as f64).exp();
        let mut r = Number::from_f64(seed, base, native_digits(base))?.into_shifted(whole);

        let scale = Number::from_i64(n - 1, base);
        let mut settled = false;
        for iteration in 0..self.max_iterations() {
            let lower = w.pow_magnitude(&r, (n - 1) as u64, base, Some(digits));
            let quotient = w.div_resolved(&x, &lower, base);
            let weighted = w.mul_resolved(&scale, &r, base);
            let next = divide_small(
                &add_signed(&weighted, &quotient, false, base, threshold),
                n,
                digits,
            );
            let done = self.converged(&r, &next);
            r = next;
            if done {
                tracing::trace!(iteration, degree = n, "root converged");
                settled = true;
                break;
            }
        }
        if !settled {
            self.emit(Diagnostic::IterationCapReached {
                operation: "root",
                iterations: self.max_iterations(),
            });
        }

        Ok(r.cut(self.precision()).with_sign(a.is_negative()))
    }

    // ========================================================================
    // Logarithms
    // ========================================================================

    /// Natural logarithm.
    ///
    /// `ln 0` is `-inf` with a `Singularity` diagnostic.
    ///
    /// # Errors
    /// `OutOfDomain` for negative arguments.
    pub fn ln(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        self.ln_resolved(&a, base)
    }

    pub(crate) fn ln_resolved(&self, a: &Number, base: Base) -> NumberResult<Number> {
        if a.is_negative() {
            return Err(NumberError::OutOfDomain("logarithm of a negative value"));
        }
        if a.is_infinite() {
            return Ok(a.clone());
        }
        if a.is_zero() {
            self.emit(Diagnostic::Singularity { operation: "ln" });
            return Ok(Number::infinity(true, base));
        }
        if a.is_unit() {
            return Ok(Number::zero(base));
        }

        // ln(m·base^k) = ln m + k·ln base, with m in [1, base)
        let k = a.power();
        let mut result = self.ln_halley(&a.shift(-k), base);
        if k != 0 {
            let w = self.widened();
            let ln_base = self.constant(Constant::LnBase, base);
            let offset = w.mul_resolved(&Number::from_i64(k, base), &ln_base, base);
            result = w.add_resolved(&result, &offset, false, base);
        }
        Ok(result.cut(self.precision()))
    }

    /// Halley iteration `y ← y + 2(x − e^y)/(x + e^y)` for a positive `x`
    /// of moderate size. The result keeps guard digits.
    pub(crate) fn ln_halley(&self, x: &Number, base: Base) -> Number {
        let w = self.widened();
        let digits = w.precision();
        let threshold = self.parallel_threshold();

        let mut y = Number::from_f64(x.to_f64().ln(), base, native_digits(base))
            .unwrap_or_else(|_| Number::zero(base));

        for iteration in 0..self.max_iterations() {
            let e = w.exp_resolved(&y, base);
            let gap = add_signed(x, &e, true, base, threshold);
            if gap.is_zero() {
                return y;
            }
            let total = add_signed(x, &e, false, base, threshold);
            let twice = add_signed(&gap, &gap, false, base, threshold);
            let step = w.div_resolved(&twice, &total, base);
            let next = add_signed(&y, &step, false, base, threshold).cut(digits);
            if self.converged(&y, &next) {
                tracing::trace!(iteration, "ln converged");
                return next;
            }
            y = next;
        }

        self.emit(Diagnostic::IterationCapReached {
            operation: "ln",
            iterations: self.max_iterations(),
        });
        y
    }

    /// Logarithm of `a` in base `b`.
    pub fn log(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        let w = self.widened();
        let numerator = w.ln_resolved(&a, base)?;
        let denominator = w.ln_resolved(&b, base)?;
        Ok(w.div_resolved(&numerator, &denominator, base).cut(self.precision()))
    }

    // ========================================================================
    // Factorial
    // ========================================================================

    /// `a!`; a fractional operand is floored with a diagnostic.
    ///
    /// # Errors
    /// `OutOfDomain` for negative operands, `NonFinite` for infinity.
    pub fn factorial(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        if a.is_negative() {
            return Err(NumberError::OutOfDomain("factorial of a negative value"));
        }
        let n = self.integer_operand(&a, "factorial")?;
        if n < 2 {
            return Ok(Number::one(base));
        }

        let product = if n as u64 >= self.parallel_threshold() as u64 {
            (2..=n)
                .into_par_iter()
                .map(|k| Number::from_i64(k, base))
                .reduce(|| Number::one(base), |x, y| self.mul_resolved(&x, &y, base))
        } else {
            (2..=n).fold(Number::one(base), |acc, k| {
                self.mul_resolved(&acc, &Number::from_i64(k, base), base)
            })
        };
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::Arc;

    fn dec(value: i64) -> Number {
        Number::from_i64(value, Base::DECIMAL)
    }

    fn collecting() -> (Context, Arc<CollectingDiagnosticHandler>) {
        let handler = Arc::new(CollectingDiagnosticHandler::new());
        let ctx = ContextBuilder::new().precision(30).build(handler.clone()).unwrap();
        (ctx, handler)
    }

    #[test]
    fn test_pow_identities() {
        let ctx = Context::default();
        let a = Number::from_digits(true, &[1, 7], Base::new(9).unwrap(), 3).unwrap();
        assert!(ctx.pow_int(&a, 0).identical(&Number::one(Base::new(9).unwrap())));
        assert!(ctx.pow_int(&a, 1).identical(&a));

        let mut previous = Number::one(Base::new(9).unwrap());
        for n in 1..8 {
            let expected = ctx.mul(&a, &previous).unwrap();
            let actual = ctx.pow_int(&a, n);
            assert!(actual.identical(&expected), "n = {}", n);
            previous = actual;
        }
    }

    #[test]
    fn test_pow_shortcuts() {
        let ctx = Context::default();
        assert!(ctx.pow_int(&dec(-1), 7).identical(&dec(-1)));
        assert!(ctx.pow_int(&dec(-1), 8).identical(&dec(1)));
        let p = ctx.pow_int(&dec(10), 25);
        assert_eq!(p.digits(), &[1]);
        assert_eq!(p.power(), 25);
        assert!(ctx.pow_int(&dec(2), 10).identical(&dec(1024)));
    }

    #[test]
    fn test_negative_exponent() {
        let ctx = Context::default();
        let p = ctx.pow_int(&dec(2), -3);
        assert_eq!(p.digits(), &[1, 2, 5]);
        assert_eq!(p.power(), -1);
    }

    #[test]
    fn test_fractional_exponent_is_floored() {
        let (ctx, handler) = collecting();
        let exponent = Number::from_digits(false, &[3, 7], Base::DECIMAL, 0).unwrap();
        assert!(ctx.pow(&dec(2), &exponent).unwrap().identical(&dec(8)));
        assert!(handler.contains(&Diagnostic::NonIntegerOperand { operation: "pow" }));
    }

    #[test]
    fn test_floor() {
        let ctx = Context::default();
        let x = Number::from_digits(true, &[2, 5], Base::DECIMAL, 0).unwrap();
        assert!(ctx.floor(&x).identical(&dec(-3)));
        let y = Number::from_digits(false, &[2, 5], Base::DECIMAL, 0).unwrap();
        assert!(ctx.floor(&y).identical(&dec(2)));
    }

    #[test]
    fn test_sqrt_and_roots() {
        let (ctx, _) = collecting();
        assert!(ctx.approx_eq(&ctx.sqrt(&dec(144)).unwrap(), &dec(12), 26).unwrap());
        assert!(ctx
            .approx_eq(&ctx.root(&dec(-125), &dec(3)).unwrap(), &dec(-5), 26)
            .unwrap());

        // sqrt(2) = 1.41421356237309504880168872420...
        let root2 = ctx.sqrt(&dec(2)).unwrap();
        let expected: Number = ">+1.41421356237309504880168872420*a".parse().unwrap();
        assert!(ctx.approx_eq(&root2, &expected, 26).unwrap());

        // Large magnitudes seed through the power offset
        let big = ctx.pow_int(&dec(10), 400);
        let r = ctx.sqrt(&big).unwrap();
        assert_eq!(r.power(), 200);

        assert!(matches!(ctx.sqrt(&dec(-4)), Err(NumberError::OutOfDomain(_))));
        assert!(matches!(ctx.root(&dec(4), &dec(0)), Err(NumberError::OutOfDomain(_))));
    }

    #[test]
    fn test_ln_values() {
        let (ctx, handler) = collecting();
        assert!(ctx.ln(&dec(1)).unwrap().is_zero());

        // ln 10 = 2.30258509299404568401799145468...
        let expected: Number = ">+2.30258509299404568401799145468*a".parse().unwrap();
        assert!(ctx.approx_eq(&ctx.ln(&dec(10)).unwrap(), &expected, 26).unwrap());

        // ln 2 in base 2 agrees with the decimal value
        let ln2 = ctx.ln(&Number::from_i64(2, Base::BINARY)).unwrap();
        assert!((ln2.to_f64() - std::f64::consts::LN_2).abs() < 1e-8);

        let neg = ctx.ln(&dec(0)).unwrap();
        assert!(neg.is_infinite() && neg.is_negative());
        assert!(handler.contains(&Diagnostic::Singularity { operation: "ln" }));

        assert!(matches!(ctx.ln(&dec(-1)), Err(NumberError::OutOfDomain(_))));
    }

    #[test]
    fn test_ln_of_e_is_one() {
        let (ctx, _) = collecting();
        let e = ctx.e(Base::DECIMAL);
        assert!(ctx.approx_eq(&ctx.ln(&e).unwrap(), &dec(1), 26).unwrap());
    }

    #[test]
    fn test_log_and_powf() {
        let (ctx, _) = collecting();
        assert!(ctx.approx_eq(&ctx.log(&dec(1000), &dec(10)).unwrap(), &dec(3), 26).unwrap());
        assert!(ctx.approx_eq(&ctx.log(&dec(1024), &dec(2)).unwrap(), &dec(10), 26).unwrap());

        // 4^0.5 = 2
        let half = Number::from_digits(false, &[5], Base::DECIMAL, -1).unwrap();
        assert!(ctx.approx_eq(&ctx.powf(&dec(4), &half).unwrap(), &dec(2), 26).unwrap());
        assert!(ctx.powf(&dec(-4), &half).is_err());
    }

    #[test]
    fn test_factorial() {
        let (ctx, handler) = collecting();
        assert!(ctx.factorial(&dec(0)).unwrap().identical(&dec(1)));
        assert!(ctx.factorial(&dec(10)).unwrap().identical(&dec(3_628_800)));
        assert!(ctx.factorial(&dec(20)).unwrap().identical(&dec(2_432_902_008_176_640_000)));

        let x = Number::from_digits(false, &[5, 9], Base::DECIMAL, 0).unwrap();
        assert!(ctx.factorial(&x).unwrap().identical(&dec(120)));
        assert!(handler.contains(&Diagnostic::NonIntegerOperand { operation: "factorial" }));

        assert!(ctx.factorial(&dec(-1)).is_err());
    }

    #[test]
    fn test_parallel_factorial_matches_sequential() {
        let sequential = ContextBuilder::new()
            .with_parallel_threshold(usize::MAX)
            .build(Arc::new(NoOpDiagnosticHandler))
            .unwrap();
        let parallel = ContextBuilder::new()
            .with_parallel_threshold(8)
            .build(Arc::new(NoOpDiagnosticHandler))
            .unwrap();
        let a = sequential.factorial(&dec(60)).unwrap();
        let b = parallel.factorial(&dec(60)).unwrap();
        assert!(a.identical(&b));
    }
}
