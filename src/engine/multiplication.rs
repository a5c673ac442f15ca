// ============================================================================
// Multiplication Algorithms
// Single-digit scaling, schoolbook and Karatsuba
// ============================================================================

use super::addition::add_signed;
use super::Context;
use crate::domain::settings::DEFAULT_BASE;
use crate::interfaces::{Diagnostic, MultiplicationAlgorithm};
use crate::numeric::{Base, Digit, Digits, Number, NumberResult};
use rayon::prelude::*;
use smallvec::smallvec;

/// Multiply every digit by `factor`, leaving carries for a later pass.
///
/// Signs are dropped; the result is a raw magnitude.
pub(crate) fn scale(x: &Number, factor: Digit, parallel_threshold: usize) -> Number {
    let digits: Digits = if x.len() >= parallel_threshold {
        Digits::from_vec(x.digits().par_iter().map(|&d| d * factor).collect())
    } else {
        x.digits().iter().map(|&d| d * factor).collect()
    };
    Number::from_raw(false, digits, x.base(), x.power())
}

#[inline]
fn base_of(x: &Number) -> Base {
    x.base().unwrap_or(DEFAULT_BASE)
}

// ============================================================================
// Schoolbook
// ============================================================================

/// Classical O(n·m) multiplication.
///
/// Each digit of the shorter operand scales the longer one; the scaled rows
/// accumulate at their offsets and a single normalization settles the carries.
pub struct SchoolbookMultiplication;

impl MultiplicationAlgorithm for SchoolbookMultiplication {
    fn multiply(&self, ctx: &Context, lhs: &Number, rhs: &Number) -> Number {
        let base = base_of(lhs);
        if lhs.is_zero() || rhs.is_zero() {
            return Number::zero(base);
        }

        let (long, short) = if lhs.len() >= rhs.len() {
            (lhs, rhs)
        } else {
            (rhs, lhs)
        };

        let mut acc: Digits = smallvec![0; long.len() + short.len() - 1];
        for (offset, &d) in short.digits().iter().enumerate() {
            if d == 0 {
                continue;
            }
            let row = scale(long, d, ctx.parallel_threshold());
            for (slot, &v) in acc[offset..].iter_mut().zip(row.digits()) {
                *slot += v;
            }
        }

        Number::from_raw(false, acc, Some(base), lhs.power() + rhs.power()).fixed()
    }

    fn name(&self) -> &str {
        "Schoolbook"
    }
}

// ============================================================================
// Karatsuba
// ============================================================================

/// Divide-and-conquer multiplication with three half-size products.
///
/// Operands below `cutoff` combined digits fall back to schoolbook. The three
/// sub-products are forked onto the thread pool once the operands reach the
/// context's parallel threshold.
pub struct KaratsubaMultiplication {
    cutoff: usize,
}

impl KaratsubaMultiplication {
    pub fn new(cutoff: usize) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Product of two non-negative integers (lowest power at least 0).
    fn product(&self, ctx: &Context, x: &Number, y: &Number) -> Number {
        let base = base_of(x);
        if x.is_zero() || y.is_zero() {
            return Number::zero(base);
        }
        if x.len() == 1 {
            return scale(y, x.digits()[0], ctx.parallel_threshold())
                .fixed()
                .into_shifted(x.power());
        }
        if y.len() == 1 {
            return scale(x, y.digits()[0], ctx.parallel_threshold())
                .fixed()
                .into_shifted(y.power());
        }
        if x.len() + y.len() <= self.cutoff {
            return SchoolbookMultiplication.multiply(ctx, x, y);
        }

        let half = (x.power().max(y.power()) + 1) / 2;
        let (x1, x0) = x.split_at_power(half);
        let (y1, y0) = y.split_at_power(half);

        let threshold = ctx.parallel_threshold();
        let (high, (low, cross)) = ctx.join(
            x.len() + y.len(),
            || self.product(ctx, &x1, &y1),
            || {
                ctx.join(
                    x.len() + y.len(),
                    || self.product(ctx, &x0, &y0),
                    || {
                        let xs = add_signed(&x0, &x1, false, base, threshold);
                        let ys = add_signed(&y0, &y1, false, base, threshold);
                        self.product(ctx, &xs, &ys)
                    },
                )
            },
        );

        let middle = add_signed(
            &add_signed(&cross, &low, true, base, threshold),
            &high,
            true,
            base,
            threshold,
        );
        let upper = add_signed(
            &high.into_shifted(2 * half),
            &middle.into_shifted(half),
            false,
            base,
            threshold,
        );
        add_signed(&upper, &low, false, base, threshold)
    }
}

impl MultiplicationAlgorithm for KaratsubaMultiplication {
    fn multiply(&self, ctx: &Context, lhs: &Number, rhs: &Number) -> Number {
        if lhs.is_zero() || rhs.is_zero() {
            return Number::zero(base_of(lhs));
        }
        // Split points are absolute positions, so work on integers.
        let sa = -lhs.lowest_power();
        let sb = -rhs.lowest_power();
        let x = lhs.abs().into_shifted(sa);
        let y = rhs.abs().into_shifted(sb);
        self.product(ctx, &x, &y).into_shifted(-(sa + sb))
    }

    fn name(&self) -> &str {
        "Karatsuba"
    }
}

// ============================================================================
// Context Operations
// ============================================================================

impl Context {
    /// `a × b`
    ///
    /// `inf × 0` is zero with an `IndeterminateForm` diagnostic.
    pub fn mul(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        Ok(self.mul_resolved(&a, &b, base))
    }

    pub(crate) fn mul_resolved(&self, a: &Number, b: &Number, base: Base) -> Number {
        let negative = a.is_negative() != b.is_negative();
        if a.is_infinite() || b.is_infinite() {
            if a.is_zero() || b.is_zero() {
                self.emit(Diagnostic::IndeterminateForm { operation: "mul" });
                return Number::zero(base);
            }
            return Number::infinity(negative, base);
        }
        if a.is_zero() || b.is_zero() {
            return Number::zero(base);
        }
        self.multiply_magnitudes(a, b).with_sign(negative)
    }

    /// Product truncated to `digits` significant digits.
    pub(crate) fn mul_cut(&self, a: &Number, b: &Number, base: Base, digits: usize) -> Number {
        self.mul_resolved(a, b, base).cut(digits)
    }
}
