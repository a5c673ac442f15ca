// ============================================================================
// Numeric Module
// The radix number representation
// ============================================================================
//
// This module provides:
// - Base: validated radix, plus resolution of unset (floating) bases
// - Number: sign, base, reference power and digit sequence
// - Normalization: carry propagation and zero stripping (`fix`)
// - Conversions to and from i64, f64 and rust_decimal::Decimal
// - NumberError: structural failures
//
// Nothing here performs arithmetic between two values; that lives in
// `crate::engine`.

mod base;
mod convert;
mod errors;
mod normalize;
mod number;

pub use base::{resolve as resolve_base, resolve_all as resolve_bases, Base};
pub use errors::{NumberError, NumberResult};
pub use number::{Digit, Digits, Number};

/// True when both operands carry the same base (unset counts as a base).
#[inline]
pub fn same_base(a: &Number, b: &Number) -> bool {
    a.base() == b.base()
}

/// True when at least one operand has an unset base.
#[inline]
pub fn either_floating(a: &Number, b: &Number) -> bool {
    a.base().is_none() || b.base().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_predicates() {
        let octal = Number::from_i64(5, Base::OCTAL);
        let decimal = Number::from_i64(5, Base::DECIMAL);
        let literal = Number::floating(5);

        assert!(same_base(&octal, &Number::one(Base::OCTAL)));
        assert!(!same_base(&octal, &decimal));
        assert!(!same_base(&octal, &literal));
        assert!(same_base(&literal, &Number::floating(-2)));

        assert!(!either_floating(&octal, &decimal));
        assert!(either_floating(&octal, &literal));
        assert!(either_floating(&literal, &decimal));
        assert!(either_floating(&literal, &literal));
    }
}
