// ============================================================================
// Addition / Subtraction
// Position-wise signed sums over a shared power range
// ============================================================================

use super::Context;
use crate::interfaces::Diagnostic;
use crate::numeric::{resolve_bases, Base, Digit, Digits, Number, NumberResult};
use rayon::prelude::*;

/// Signed sum of two finite values sharing `base`; subtracts when `negate_rhs`.
///
/// Every slot of the aligned range is computed independently, in parallel
/// from `parallel_threshold` slots upward. The first nonzero slot fixes the
/// sign; normalization then settles the carries and borrows.
pub(crate) fn add_signed(
    lhs: &Number,
    rhs: &Number,
    negate_rhs: bool,
    base: Base,
    parallel_threshold: usize,
) -> Number {
    if rhs.is_zero() {
        return lhs.clone();
    }
    if lhs.is_zero() {
        return if negate_rhs { rhs.negate() } else { rhs.clone() };
    }

    let sa: Digit = if lhs.is_negative() { -1 } else { 1 };
    let sb: Digit = if rhs.is_negative() != negate_rhs { -1 } else { 1 };

    let top = lhs.power().max(rhs.power());
    let bottom = lhs.lowest_power().min(rhs.lowest_power());
    let width = (top - bottom + 1) as usize;

    let slot = |i: usize| {
        let p = top - i as i64;
        sa * lhs.digit_at_power(p) + sb * rhs.digit_at_power(p)
    };

    let mut slots: Digits = if width >= parallel_threshold {
        Digits::from_vec((0..width).into_par_iter().map(slot).collect())
    } else {
        (0..width).map(slot).collect()
    };

    let negative = slots.iter().find(|&&d| d != 0).is_some_and(|&d| d < 0);
    if negative {
        for d in slots.iter_mut() {
            *d = -*d;
        }
    }

    Number::from_raw(negative, slots, Some(base), top).fixed()
}

impl Context {
    /// `a + b`
    ///
    /// # Errors
    /// `IncompatibleBase` or `DualFloatingBase` when the bases cannot be
    /// reconciled.
    pub fn add(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        Ok(self.add_resolved(&a, &b, false, base))
    }

    /// `a − b`
    pub fn sub(&self, a: &Number, b: &Number) -> NumberResult<Number> {
        let (base, a, b) = self.operands(a, b)?;
        Ok(self.add_resolved(&a, &b, true, base))
    }

    /// Sum of any number of operands; all concrete bases must agree.
    ///
    /// An empty slice sums to zero in the default base.
    pub fn summation(&self, terms: &[Number]) -> NumberResult<Number> {
        if terms.is_empty() {
            return Ok(Number::zero(self.default_base()));
        }
        let base = resolve_bases(terms.iter().map(Number::base))?;
        Ok(terms.iter().fold(Number::zero(base), |acc, term| {
            self.add_resolved(&acc, &term.resolved(base), false, base)
        }))
    }

    /// `a + 1`
    pub fn increment(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.add_resolved(&a, &Number::one(base), false, base)
    }

    /// `a − 1`
    pub fn decrement(&self, a: &Number) -> Number {
        let (base, a) = self.operand(a);
        self.add_resolved(&a, &Number::one(base), true, base)
    }

    pub(crate) fn add_resolved(&self, a: &Number, b: &Number, subtract: bool, base: Base) -> Number {
        let b_negative = b.is_negative() != subtract;
        match (a.is_infinite(), b.is_infinite()) {
            (true, true) if a.is_negative() != b_negative => {
                self.emit(Diagnostic::IndeterminateForm {
                    operation: if subtract { "sub" } else { "add" },
                });
                Number::zero(base)
            },
            (true, _) => a.clone(),
            (false, true) => Number::infinity(b_negative, base),
            (false, false) => add_signed(a, b, subtract, base, self.parallel_threshold()),
        }
    }
}
