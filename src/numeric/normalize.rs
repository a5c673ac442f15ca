// ============================================================================
// Normalization
// Carry propagation and zero stripping
// ============================================================================
//
// Digits are stored most significant first, so carries travel toward index 0
// (increasing power). A carry out of index 0 grows the buffer at the front and
// raises `power` by one per new digit.

use super::number::{Digit, Number};
use smallvec::smallvec;

impl Number {
    /// Strip leading and trailing zeros.
    ///
    /// Each leading zero removed lowers `power` by one. A value made of zeros
    /// collapses to canonical zero.
    pub fn simplify(&mut self) {
        if self.infinite {
            return;
        }
        let leading = self.digits.iter().take_while(|&&d| d == 0).count();
        if leading == self.digits.len() {
            self.digits = smallvec![0];
            self.power = 0;
            self.negative = false;
            return;
        }
        let trailing = self.digits.iter().rev().take_while(|&&d| d == 0).count();
        self.digits.truncate(self.digits.len() - trailing);
        if leading > 0 {
            self.digits.drain(..leading);
            self.power -= leading as i64;
        }
    }

    /// Force every digit into `[0, base)`.
    ///
    /// A single least-to-most significant sweep settles all in-range positions;
    /// whatever carry leaves the top becomes new leading digits. When the top
    /// carry is negative the whole value is negative: every digit is negated,
    /// the sign flips, and a second sweep resolves the borrows that creates.
    /// Values with an unset base are left untouched.
    pub fn carry_cleanup(&mut self) {
        let Some(base) = self.base else {
            return;
        };
        if self.infinite || !self.is_overloaded() {
            return;
        }
        let radix = base.radix();

        let carry = self.propagate(radix);
        if carry < 0 {
            for digit in self.digits.iter_mut() {
                *digit = -*digit;
            }
            self.negative = !self.negative;
            self.push_carry(-carry, radix);
            let carry = self.propagate(radix);
            self.push_carry(carry, radix);
        } else {
            self.push_carry(carry, radix);
        }
    }

    /// `carry_cleanup` followed by `simplify`. Idempotent.
    pub fn fix(&mut self) {
        if self.digits.is_empty() {
            self.digits.push(0);
        }
        self.carry_cleanup();
        self.simplify();
    }

    /// Owned form of [`fix`](Self::fix).
    #[inline]
    pub fn fixed(mut self) -> Self {
        self.fix();
        self
    }

    fn propagate(&mut self, radix: Digit) -> Digit {
        let mut carry: Digit = 0;
        for digit in self.digits.iter_mut().rev() {
            let value = *digit + carry;
            *digit = value.rem_euclid(radix);
            carry = value.div_euclid(radix);
        }
        carry
    }

    fn push_carry(&mut self, mut carry: Digit, radix: Digit) {
        while carry > 0 {
            self.digits.insert(0, carry % radix);
            carry /= radix;
            self.power += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::numeric::{Base, Number};
    use smallvec::smallvec;

    fn raw(negative: bool, digits: &[i64], power: i64) -> Number {
        Number::from_raw(negative, digits.iter().copied().collect(), Some(Base::DECIMAL), power)
    }

    #[test]
    fn test_simplify_strips_zeros() {
        let mut x = raw(false, &[0, 0, 1, 2, 0], 4);
        x.simplify();
        assert_eq!(x.digits(), &[1, 2]);
        assert_eq!(x.power(), 2);
    }

    #[test]
    fn test_simplify_zero_is_canonical() {
        let mut x = raw(true, &[0, 0, 0], 7);
        x.simplify();
        assert_eq!(x.digits(), &[0]);
        assert_eq!(x.power(), 0);
        assert!(!x.is_negative());
    }

    #[test]
    fn test_overloaded_until_cleanup() {
        let mut x = raw(false, &[3, 12, -1], 2);
        assert!(x.is_overloaded());
        x.carry_cleanup();
        assert!(!x.is_overloaded());
        // 300 + 120 - 1
        assert!(x.identical(&Number::from_i64(419, Base::DECIMAL)));

        let clean = raw(false, &[4, 0, 9], 2);
        assert!(!clean.is_overloaded());
        assert!(!Number::floating(1234).is_overloaded());
    }

    #[test]
    fn test_carry_grows_buffer() {
        // [9, 15] at power 1 = 90 + 15 = 105
        let mut x = raw(false, &[9, 15], 1);
        x.carry_cleanup();
        assert_eq!(x.digits(), &[1, 0, 5]);
        assert_eq!(x.power(), 2);
    }

    #[test]
    fn test_large_carry() {
        // 1234 stored as one digit
        let mut x = raw(false, &[1234], 0);
        x.fix();
        assert_eq!(x.digits(), &[1, 2, 3, 4]);
        assert_eq!(x.power(), 3);
    }

    #[test]
    fn test_borrow_from_neighbour() {
        // [3, -4] at power 1 = 30 - 4 = 26
        let mut x = raw(false, &[3, -4], 1);
        x.fix();
        assert_eq!(x.digits(), &[2, 6]);
        assert_eq!(x.power(), 1);
        assert!(!x.is_negative());
    }

    #[test]
    fn test_negative_total_flips_sign() {
        // [1, -50] at power 1 = 10 - 50 = -40
        let mut x = raw(false, &[1, -50], 1);
        x.fix();
        assert_eq!(x.digits(), &[4]);
        assert_eq!(x.power(), 1);
        assert!(x.is_negative());

        // [-1, 5] = -10 + 5 = -5 on a negative number becomes +5
        let mut y = raw(true, &[-1, 5], 1);
        y.fix();
        assert_eq!(y.digits(), &[5]);
        assert_eq!(y.power(), 0);
        assert!(!y.is_negative());
    }

    #[test]
    fn test_fix_is_idempotent() {
        let mut x = raw(false, &[0, 27, -3, 14, 0], 2);
        x.fix();
        let once = x.clone();
        x.fix();
        assert!(x.identical(&once));
    }

    #[test]
    fn test_floating_base_untouched() {
        let mut x = Number::from_raw(false, smallvec![300], None, 0);
        x.carry_cleanup();
        assert_eq!(x.digits(), &[300]);
    }
}
