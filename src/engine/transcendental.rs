// ============================================================================
// Transcendental Functions
// Taylor series for exp, sin, cos, sinh, cosh; tan and tanh by quotient
// ============================================================================

use super::addition::add_signed;
use super::compare::compare_magnitudes;
use super::constants::Constant;
use super::division::divide_small;
use super::Context;
use crate::interfaces::Diagnostic;
use crate::numeric::{Base, Number, NumberError, NumberResult};
use std::cmp::Ordering;

impl Context {
    /// Sum `first + t₁ + t₂ + …` where `tₖ = ±tₖ₋₁ · ratio / divisor(k)`.
    ///
    /// Stops once a term falls `precision + guard` places below the larger
    /// of the running sum's power and `reference`, or at the iteration cap.
    /// The sum keeps guard digits.
    pub(crate) fn taylor(
        &self,
        first: Number,
        ratio: &Number,
        divisor: impl Fn(i64) -> i64,
        alternating: bool,
        reference: i64,
        base: Base,
        operation: &'static str,
    ) -> Number {
        let w = self.widened();
        let digits = w.precision();
        let threshold = self.parallel_threshold();

        let mut term = first.clone();
        let mut sum = first;
        for k in 1..=i64::from(self.max_iterations()) {
            let next = divide_small(&w.mul_cut(&term, ratio, base, digits), divisor(k), digits);
            term = if alternating { next.negate() } else { next };
            if term.is_zero() {
                return sum;
            }
            sum = add_signed(&sum, &term, false, base, threshold);
            if term.power() < sum.power().max(reference) - digits as i64 {
                tracing::trace!(operation, terms = k, "series converged");
                return sum;
            }
        }

        self.emit(Diagnostic::IterationCapReached {
            operation,
            iterations: self.max_iterations(),
        });
        sum
    }

    // ========================================================================
    // Exponential
    // ========================================================================

    /// `e^a`
    ///
    /// The fractional part runs through the series; the integer part is a
    /// power of the memoized `E`.
    pub fn exp(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.exp_resolved(&a, base)
    }

    pub(crate) fn exp_resolved(&self, a: &Number, base: Base) -> Number {
        if a.is_infinite() {
            return if a.is_negative() {
                Number::zero(base)
            } else {
                a.clone()
            };
        }
        if a.is_zero() {
            return Number::one(base);
        }

        let w = self.widened();
        let digits = w.precision();
        let whole = a.trunc();
        let fraction = add_signed(a, &whole, true, base, self.parallel_threshold());

        let mut result = self.taylor(
            Number::one(base),
            &fraction,
            |k| k,
            false,
            i64::MIN,
            base,
            "exp",
        );

        if !whole.is_zero() {
            let Ok(count) = whole.to_i64() else {
                return if a.is_negative() {
                    Number::zero(base)
                } else {
                    Number::infinity(false, base)
                };
            };
            let e = self.constant(Constant::E, base);
            let scale = w.pow_magnitude(&e, count.unsigned_abs(), base, Some(digits));
            result = if count > 0 {
                w.mul_cut(&result, &scale, base, digits)
            } else {
                w.div_resolved(&result, &scale, base)
            };
        }

        result.cut(self.precision())
    }

    // ========================================================================
    // Circular Functions
    // ========================================================================

    /// Bring `x` into `[−π, π]` by whole turns.
    fn reduce_angle(&self, x: &Number, base: Base) -> Number {
        let pi = self.constant(Constant::Pi, base);
        if compare_magnitudes(x, &pi) != Ordering::Greater {
            return x.clone();
        }

        // Whole turns need every integer digit of x/2π on top of the precision.
        let digits = self.widened().precision() + x.power().max(0) as usize;
        let wide = self.with_precision(u16::try_from(digits).unwrap_or(u16::MAX));
        let threshold = self.parallel_threshold();

        let pi = wide.constant(Constant::Pi, base);
        let two_pi = add_signed(&pi, &pi, false, base, threshold);
        let offset = add_signed(x, &pi, false, base, threshold);
        let turns = wide.floor(&wide.div_resolved(&offset, &two_pi, base));
        add_signed(x, &wide.mul_resolved(&turns, &two_pi, base), true, base, threshold)
    }

    /// Sine.
    ///
    /// # Errors
    /// `NonFinite` for infinite arguments.
    pub fn sin(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        self.sin_resolved(&a, base)
    }

    /// Cosine.
    ///
    /// # Errors
    /// `NonFinite` for infinite arguments.
    pub fn cos(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        self.cos_resolved(&a, base)
    }

    /// Tangent as `sin/cos`, both series evaluated together.
    ///
    /// Where the cosine vanishes the result is the infinity sentinel with a
    /// `DivisionByZero` diagnostic.
    pub fn tan(&self, a: &Number) -> NumberResult<Number> {
        let (base, a) = self.operand(a);
        let (sin, cos) = self.join(
            self.widened().precision(),
            || self.sin_resolved(&a, base),
            || self.cos_resolved(&a, base),
        );
        Ok(self.div_resolved(&sin?, &cos?, base))
    }

    fn sin_resolved(&self, a: &Number, base: Base) -> NumberResult<Number> {
        if a.is_infinite() {
            return Err(NumberError::NonFinite);
        }
        if a.is_zero() {
            return Ok(Number::zero(base));
        }
        let w = self.widened();
        let x = self.reduce_angle(a, base);
        let square = w.mul_cut(&x, &x, base, w.precision());
        let reference = x.power();
        let sum = self.taylor(
            x,
            &square,
            |k| (2 * k) * (2 * k + 1),
            true,
            reference,
            base,
            "sin",
        );
        Ok(sum.cut(self.precision()))
    }

    fn cos_resolved(&self, a: &Number, base: Base) -> NumberResult<Number> {
        if a.is_infinite() {
            return Err(NumberError::NonFinite);
        }
        if a.is_zero() {
            return Ok(Number::one(base));
        }
        let w = self.widened();
        let x = self.reduce_angle(a, base);
        let square = w.mul_cut(&x, &x, base, w.precision());
        let sum = self.taylor(
            Number::one(base),
            &square,
            |k| (2 * k - 1) * (2 * k),
            true,
            0,
            base,
            "cos",
        );
        Ok(sum.cut(self.precision()))
    }

    // ========================================================================
    // Hyperbolic Functions
    // ========================================================================

    /// Hyperbolic sine; the series for `|a| <= 1`, exponentials beyond.
    pub fn sinh(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.sinh_resolved(&a, base)
    }

    /// Hyperbolic cosine; the series for `|a| <= 1`, exponentials beyond.
    pub fn cosh(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.cosh_resolved(&a, base)
    }

    /// Hyperbolic tangent as `sinh/cosh`, both evaluated together.
    pub fn tanh(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        if a.is_infinite() {
            return Number::one(base).with_sign(a.is_negative());
        }
        let (sinh, cosh) = self.join(
            self.widened().precision(),
            || self.sinh_resolved(&a, base),
            || self.cosh_resolved(&a, base),
        );
        self.div_resolved(&sinh, &cosh, base)
    }

    fn sinh_resolved(&self, a: &Number, base: Base) -> Number {
        if a.is_infinite() || a.is_zero() {
            return a.clone();
        }
        let w = self.widened();
        if compare_magnitudes(a, &Number::one(base)) != Ordering::Greater {
            let square = w.mul_cut(a, a, base, w.precision());
            let sum = self.taylor(
                a.clone(),
                &square,
                |k| (2 * k) * (2 * k + 1),
                false,
                i64::MIN,
                base,
                "sinh",
            );
            return sum.cut(self.precision());
        }
        let (up, down) = self.exponential_pair(a, base);
        let diff = add_signed(&up, &down, true, base, self.parallel_threshold());
        divide_small(&diff, 2, self.precision())
    }

    fn cosh_resolved(&self, a: &Number, base: Base) -> Number {
        if a.is_infinite() {
            return Number::infinity(false, base);
        }
        if a.is_zero() {
            return Number::one(base);
        }
        let w = self.widened();
        if compare_magnitudes(a, &Number::one(base)) != Ordering::Greater {
            let square = w.mul_cut(a, a, base, w.precision());
            let sum = self.taylor(
                Number::one(base),
                &square,
                |k| (2 * k - 1) * (2 * k),
                false,
                i64::MIN,
                base,
                "cosh",
            );
            return sum.cut(self.precision());
        }
        let (up, down) = self.exponential_pair(a, base);
        let total = add_signed(&up, &down, false, base, self.parallel_threshold());
        divide_small(&total, 2, self.precision())
    }

    /// `(e^a, e^−a)` with guard digits.
    fn exponential_pair(&self, a: &Number, base: Base) -> (Number, Number) {
        let w = self.widened();
        let negated = a.negate();
        self.join(
            w.precision(),
            || w.exp_resolved(a, base),
            || w.exp_resolved(&negated, base),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::Arc;

    fn context() -> (Context, Arc<CollectingDiagnosticHandler>) {
        let handler = Arc::new(CollectingDiagnosticHandler::new());
        let ctx = ContextBuilder::new().precision(30).build(handler.clone()).unwrap();
        (ctx, handler)
    }

    fn dec(value: i64) -> Number {
        Number::from_i64(value, Base::DECIMAL)
    }

    fn literal(text: &str) -> Number {
        text.parse().unwrap()
    }

    #[test]
    fn test_exp_values() {
        let (ctx, _) = context();
        assert!(ctx.exp(&dec(0)).identical(&dec(1)));

        let e = ctx.e(Base::DECIMAL);
        assert!(ctx.approx_eq(&ctx.exp(&dec(1)), &e, 28).unwrap());

        // e^2.5 = 12.1824939607034734380701759511...
        let x = literal(">+2.5*a");
        let expected = literal(">+1.21824939607034734380701759511*a^+1");
        assert!(ctx.approx_eq(&ctx.exp(&x), &expected, 26).unwrap());

        // e^-3 = 0.0497870683678639429793424156500...
        let expected = literal(">+4.97870683678639429793424156500*a^-2");
        assert!(ctx.approx_eq(&ctx.exp(&dec(-3)), &expected, 26).unwrap());
    }

    #[test]
    fn test_exp_ln_round_trip() {
        let (ctx, _) = context();
        let x = literal(">+7.25*a");
        let back = ctx.ln(&ctx.exp(&x)).unwrap();
        assert!(ctx.approx_eq(&back, &x, 26).unwrap());
    }

    #[test]
    fn test_exp_infinities() {
        let (ctx, _) = context();
        assert!(ctx.exp(&Number::infinity(true, Base::DECIMAL)).is_zero());
        assert!(ctx.exp(&Number::infinity(false, Base::DECIMAL)).is_infinite());
    }

    #[test]
    fn test_sin_cos_values() {
        let (ctx, _) = context();
        assert!(ctx.sin(&dec(0)).unwrap().is_zero());
        assert!(ctx.cos(&dec(0)).unwrap().identical(&dec(1)));

        // sin 1 = 0.841470984807896506652502321630...
        let expected = literal(">+8.41470984807896506652502321630*a^-1");
        assert!(ctx.approx_eq(&ctx.sin(&dec(1)).unwrap(), &expected, 26).unwrap());

        // cos 1 = 0.540302305868139717400936607442...
        let expected = literal(">+5.40302305868139717400936607442*a^-1");
        assert!(ctx.approx_eq(&ctx.cos(&dec(1)).unwrap(), &expected, 26).unwrap());
    }

    #[test]
    fn test_angle_reduction() {
        let (ctx, _) = context();
        // sin 100 = -0.506365641109758793656557610459...
        let expected = literal(">-5.06365641109758793656557610459*a^-1");
        let s = ctx.sin(&dec(100)).unwrap();
        assert!(ctx.approx_eq(&s, &expected, 24).unwrap(), "{}", s);
    }

    #[test]
    fn test_pythagorean_identity() {
        let (ctx, _) = context();
        let x = literal(">-2.3*a");
        let s = ctx.sin(&x).unwrap();
        let c = ctx.cos(&x).unwrap();
        let one = ctx
            .add(&ctx.mul(&s, &s).unwrap(), &ctx.mul(&c, &c).unwrap())
            .unwrap();
        assert!(ctx.approx_eq(&one, &dec(1), 26).unwrap());
    }

    #[test]
    fn test_tan() {
        let (ctx, _) = context();
        // tan 1 = 1.55740772465490223050697480745...
        let expected = literal(">+1.55740772465490223050697480745*a");
        assert!(ctx.approx_eq(&ctx.tan(&dec(1)).unwrap(), &expected, 26).unwrap());
        assert!(ctx.tan(&Number::infinity(false, Base::DECIMAL)).is_err());
    }

    #[test]
    fn test_hyperbolic() {
        let (ctx, _) = context();
        // sinh 0.5 = 0.521095305493747361622425626411...
        let expected = literal(">+5.21095305493747361622425626411*a^-1");
        assert!(ctx.approx_eq(&ctx.sinh(&literal(">+.5*a")), &expected, 26).unwrap());

        // cosh 2 = 3.76219569108363145956221347777...
        let expected = literal(">+3.76219569108363145956221347777*a");
        assert!(ctx.approx_eq(&ctx.cosh(&dec(2)), &expected, 26).unwrap());

        // tanh 3 = 0.995054753686730451331880185255...
        let expected = literal(">+9.95054753686730451331880185255*a^-1");
        assert!(ctx.approx_eq(&ctx.tanh(&dec(3)), &expected, 26).unwrap());

        let t = ctx.tanh(&Number::infinity(true, Base::DECIMAL));
        assert!(t.identical(&dec(-1)));
    }

    #[test]
    fn test_forked_pairs_match_sequential() {
        let (sequential, _) = context();
        let forked = ContextBuilder::new()
            .precision(30)
            .with_parallel_threshold(1)
            .build(Arc::new(NoOpDiagnosticHandler))
            .unwrap();

        for x in [literal(">+.7*a"), dec(2), literal(">-1.3*a")] {
            assert!(forked.tan(&x).unwrap().identical(&sequential.tan(&x).unwrap()));
            assert!(forked.tanh(&x).identical(&sequential.tanh(&x)));
            assert!(forked.sinh(&x).identical(&sequential.sinh(&x)));
            assert!(forked.cosh(&x).identical(&sequential.cosh(&x)));
        }

        // tan 1 = 1.55740772465490223050697480745...
        let expected = literal(">+1.55740772465490223050697480745*a");
        assert!(forked.approx_eq(&forked.tan(&dec(1)).unwrap(), &expected, 26).unwrap());
    }

    #[test]
    fn test_other_base() {
        let (ctx, handler) = context();
        let x = Number::from_i64(1, Base::HEXADECIMAL);
        let s = ctx.sin(&x).unwrap();
        assert!((s.to_f64() - 1f64.sin()).abs() < 1e-12);
        assert!(handler.is_empty());
    }
}
