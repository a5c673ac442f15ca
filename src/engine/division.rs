// ============================================================================
// Division Algorithms
// Table long division, Newton-Raphson reciprocal, Goldschmidt rescaling
// ============================================================================

use super::addition::add_signed;
use super::compare::{compare_magnitudes, compare_scaled};
use super::context::agree_to;
use super::Context;
use crate::domain::settings::DEFAULT_BASE;
use crate::interfaces::{Diagnostic, DivisionAlgorithm};
use crate::numeric::{Base, Digit, Digits, Number, NumberError, NumberResult};
use arrayvec::ArrayVec;
use std::cmp::Ordering;

/// Digits carried beyond the requested precision inside iterative division.
const DIVISION_GUARD: usize = 2;

type MultipleTable = ArrayVec<Number, 256>;

#[inline]
fn base_of(x: &Number) -> Base {
    x.base().unwrap_or(DEFAULT_BASE)
}

/// `|divisor| × d` for every digit value `d` in `[0, base)`.
fn multiples(divisor: &Number, base: Base) -> MultipleTable {
    let step = divisor.abs();
    let mut table = MultipleTable::new();
    let mut current = Number::zero(base);
    for _ in 0..base.get() {
        let next = add_signed(&current, &step, false, base, usize::MAX);
        table.push(current);
        current = next;
    }
    table
}

/// Largest `d` with `table[d]·base^offset <= |remainder|`.
fn largest_multiple(table: &MultipleTable, remainder: &Number, offset: i64) -> usize {
    let (mut lo, mut hi) = (0usize, table.len() - 1);
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if compare_scaled(remainder, &table[mid], offset) == Ordering::Less {
            hi = mid - 1;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Digits of `base` an `f64` mantissa resolves.
pub(crate) fn native_digits(base: Base) -> usize {
    ((53.0 / (base.get() as f64).log2()).floor() as usize).max(1)
}

/// Native estimate of `1/x`.
fn seed_reciprocal(x: &Number, base: Base) -> Number {
    Number::from_f64(1.0 / x.to_f64(), base, native_digits(base))
        .unwrap_or_else(|_| Number::one(base))
}

/// Long division by a native integer, keeping `digits` significant digits.
pub(crate) fn divide_small(x: &Number, divisor: i64, digits: usize) -> Number {
    let base = base_of(x);
    let radix = base.radix() as i128;
    let k = divisor.unsigned_abs() as i128;
    if x.is_zero() || k == 0 {
        return Number::zero(base);
    }

    let mut rem: i128 = 0;
    let mut out = Digits::new();
    let mut significant = 0usize;
    let mut p = x.power();
    loop {
        rem = rem * radix + x.digit_at_power(p) as i128;
        let q = rem / k;
        rem %= k;
        if q != 0 || significant > 0 {
            significant += 1;
        }
        out.push(q as Digit);
        if significant >= digits || (rem == 0 && p <= x.lowest_power()) {
            break;
        }
        p -= 1;
    }

    Number::from_raw(x.is_negative() != (divisor < 0), out, Some(base), x.power()).fixed()
}

// ============================================================================
// Schoolbook
// ============================================================================

/// Digit-by-digit long division.
///
/// Each quotient digit is the largest table entry that fits the aligned
/// remainder, found by binary search.
pub struct SchoolbookDivision;

impl DivisionAlgorithm for SchoolbookDivision {
    fn divide(&self, ctx: &Context, dividend: &Number, divisor: &Number) -> Number {
        let base = base_of(divisor);
        let table = multiples(divisor, base);
        let precision = ctx.precision();
        let threshold = ctx.parallel_threshold();

        let top = dividend.power() - divisor.power();
        let mut remainder = dividend.abs();
        let mut quotient = Digits::new();
        let mut significant = 0usize;
        let mut q = top;

        while !remainder.is_zero() && significant < precision {
            let digit = largest_multiple(&table, &remainder, q);
            if digit > 0 {
                remainder = add_signed(&remainder, &table[digit].shift(q), true, base, threshold);
            }
            if digit > 0 || significant > 0 {
                significant += 1;
            }
            quotient.push(digit as Digit);
            q -= 1;
        }

        Number::from_raw(false, quotient, Some(base), top).fixed()
    }

    fn name(&self) -> &str {
        "Schoolbook"
    }
}

// ============================================================================
// Newton-Raphson
// ============================================================================

/// Multiply by a reciprocal refined with `r ← r + r·(1 − r·x)`.
///
/// The divisor is shifted into `[1/base, 1)` first so the seed and the
/// iterates stay near unit magnitude.
pub struct NewtonRaphsonDivision;

impl NewtonRaphsonDivision {
    fn reciprocal(&self, ctx: &Context, x: &Number, base: Base, precision: usize) -> Number {
        let working = precision + DIVISION_GUARD;
        let threshold = ctx.parallel_threshold();
        let one = Number::one(base);
        let mut r = seed_reciprocal(x, base);

        for iteration in 0..ctx.max_iterations() {
            let residual = add_signed(&one, &ctx.mul_resolved(&r, x, base), true, base, threshold);
            if residual.is_zero() {
                tracing::trace!(iteration, "reciprocal exact");
                return r;
            }
            let correction = ctx.mul_cut(&r, &residual, base, working);
            let next = add_signed(&r, &correction, false, base, threshold).cut(working);
            if agree_to(&r, &next, precision) {
                tracing::trace!(iteration, "reciprocal converged");
                return next;
            }
            r = next;
        }

        ctx.emit(Diagnostic::IterationCapReached {
            operation: "newton-raphson division",
            iterations: ctx.max_iterations(),
        });
        r
    }
}

impl DivisionAlgorithm for NewtonRaphsonDivision {
    fn divide(&self, ctx: &Context, dividend: &Number, divisor: &Number) -> Number {
        let base = base_of(divisor);
        let precision = ctx.precision();
        let shift = divisor.power() + 1;
        let reciprocal = self.reciprocal(ctx, &divisor.abs().shift(-shift), base, precision);
        ctx.mul_resolved(&dividend.abs(), &reciprocal, base)
            .into_shifted(-shift)
            .cut(precision)
    }

    fn name(&self) -> &str {
        "NewtonRaphson"
    }
}

// ============================================================================
// Goldschmidt
// ============================================================================

/// Rescale numerator and denominator by `2 − d` until `d` reaches one.
///
/// The two products of each step are independent and forked together.
pub struct GoldschmidtDivision;

impl DivisionAlgorithm for GoldschmidtDivision {
    fn divide(&self, ctx: &Context, dividend: &Number, divisor: &Number) -> Number {
        let base = base_of(divisor);
        let precision = ctx.precision();
        let working = precision + DIVISION_GUARD;
        let threshold = ctx.parallel_threshold();

        let shift = divisor.power() + 1;
        let scaled = divisor.abs().shift(-shift);
        let seed = seed_reciprocal(&scaled, base);

        let one = Number::one(base);
        let two = Number::from_i64(2, base);
        let mut n = ctx.mul_cut(&dividend.abs(), &seed, base, working);
        let mut d = ctx.mul_cut(&scaled, &seed, base, working);

        for iteration in 0..ctx.max_iterations() {
            let error = add_signed(&one, &d, true, base, threshold);
            if error.is_zero() || error.power() < -(precision as i64) {
                tracing::trace!(iteration, "goldschmidt converged");
                return n.into_shifted(-shift).cut(precision);
            }
            let factor = add_signed(&two, &d, true, base, threshold);
            let (next_n, next_d) = ctx.join(
                n.len() + d.len(),
                || ctx.mul_cut(&n, &factor, base, working),
                || ctx.mul_cut(&d, &factor, base, working),
            );
            n = next_n;
            d = next_d;
        }

        ctx.emit(Diagnostic::IterationCapReached {
            operation: "goldschmidt division",
            iterations: ctx.max_iterations(),
        });
        n.into_shifted(-shift).cut(precision)
    }

    fn name(&self) -> &str {
        "Goldschmidt"
    }
}

// ============================================================================
// Context Operations
// ============================================================================

impl Context {
    /// `a / b`, keeping `precision` significant digits.
    ///
    /// Division by zero returns the infinity sentinel carrying the
    /// dividend's sign (`0/0` is `+inf`) and emits `DivisionByZero`.
    /// Anything finite divided by infinity is zero.
    pub fn div(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        Ok(self.div_resolved(&a, &b, base))
    }

    pub(crate) fn div_resolved(&self, a: &Number, b: &Number, base: Base) -> Number {
        let negative = a.is_negative() != b.is_negative();
        if b.is_infinite() {
            if a.is_infinite() {
                self.emit(Diagnostic::IndeterminateForm { operation: "div" });
            }
            return Number::zero(base);
        }
        if a.is_infinite() {
            return Number::infinity(negative, base);
        }
        if b.is_zero() {
            let negative = a.is_negative();
            self.emit(Diagnostic::DivisionByZero { negative });
            return Number::infinity(negative, base);
        }
        if a.is_zero() {
            return Number::zero(base);
        }
        if b.is_unit() {
            return a.cut(self.precision()).with_sign(negative);
        }
        self.divide_magnitudes(&a.abs(), &b.abs()).with_sign(negative)
    }

    /// `1 / a`
    pub fn reciprocal(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.div_resolved(&Number::one(base), &a, base)
    }

    /// Remainder of `a / b`, carrying the sign of `a`.
    ///
    /// Subtracts the largest aligned table multiple of `|b|` until the
    /// remainder drops below `|b|`; fractional operands are allowed.
    ///
    /// # Errors
    /// - `DivisionByZero` when `b` is zero
    /// - `NonFinite` when `a` is infinite
    pub fn rem(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        if b.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        if a.is_infinite() {
            return Err(NumberError::NonFinite);
        }
        if b.is_infinite() {
            return Ok(a.into_owned());
        }

        let divisor = b.abs();
        let table = multiples(&divisor, base);
        let mut remainder = a.abs();
        while compare_magnitudes(&remainder, &divisor) != Ordering::Less {
            let mut offset = remainder.power() - divisor.power();
            if compare_scaled(&remainder, &divisor, offset) == Ordering::Less {
                offset -= 1;
            }
            let digit = largest_multiple(&table, &remainder, offset);
            remainder = add_signed(
                &remainder,
                &table[digit].shift(offset),
                true,
                base,
                self.parallel_threshold(),
            );
        }

        Ok(remainder.with_sign(a.is_negative()))
    }
}
