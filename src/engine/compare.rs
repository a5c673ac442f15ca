// ============================================================================
// Comparator
// Total ordering over signed values, infinities included
// ============================================================================

use super::Context;
use crate::domain::settings;
use crate::interfaces::{Diagnostic, DiagnosticHandler, LoggingDiagnosticHandler};
use crate::numeric::Number;
use std::cmp::Ordering;

/// Compare `|a|` with `|b|·base^offset`.
///
/// Both operands must be finite and normalized, so the leading digit is
/// nonzero and the top power alone decides unequal magnitudes.
pub(crate) fn compare_scaled(a: &Number, b: &Number, offset: i64) -> Ordering {
    match (a.is_zero(), b.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {},
    }

    let b_top = b.power() + offset;
    if a.power() != b_top {
        return a.power().cmp(&b_top);
    }

    let bottom = a.lowest_power().min(b.lowest_power() + offset);
    for p in (bottom..=a.power()).rev() {
        match a.digit_at_power(p).cmp(&b.digit_at_power(p - offset)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Compare magnitudes of two finite values.
#[inline]
pub fn compare_magnitudes(a: &Number, b: &Number) -> Ordering {
    compare_scaled(a, b, 0)
}

/// Compare signed values. Both must share a concrete base.
pub(crate) fn compare_values(a: &Number, b: &Number) -> Ordering {
    if a.is_negative() != b.is_negative() {
        return if a.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let magnitude = match (a.is_infinite(), b.is_infinite()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_magnitudes(a, b),
    };

    if a.is_negative() {
        magnitude.reverse()
    } else {
        magnitude
    }
}

/// `MismatchedBaseComparison` when both bases are concrete and differ.
fn base_mismatch(a: &Number, b: &Number) -> Option<Diagnostic> {
    match (a.base(), b.base()) {
        (Some(left), Some(right)) if left != right => Some(Diagnostic::MismatchedBaseComparison {
            left: left.get(),
            right: right.get(),
        }),
        _ => None,
    }
}

/// Compare two values without a context.
///
/// A floating literal adopts the other operand's base, or the process-wide
/// default when both are floating. Differing concrete bases are compared
/// position by position and the diagnostic goes to `tracing`.
pub fn compare(a: &Number, b: &Number) -> Ordering {
    if let Some(diagnostic) = base_mismatch(a, b) {
        LoggingDiagnosticHandler.on_diagnostic(diagnostic);
    }
    let base = a.base().or(b.base()).unwrap_or_else(settings::default_base);
    compare_values(&a.resolved(base), &b.resolved(base))
}

impl Context {
    /// Three-way comparison.
    ///
    /// Differing concrete bases still compare position by position, with a
    /// `MismatchedBaseComparison` diagnostic.
    pub fn compare(&self, a: &Number, b: &Number) -> Ordering {
        if let Some(diagnostic) = base_mismatch(a, b) {
            self.emit(diagnostic);
        }
        let base = a.base().or(b.base()).unwrap_or(self.default_base());
        compare_values(&a.resolved(base), &b.resolved(base))
    }

    pub fn max<'a>(&self, a: &'a Number, b: &'a Number) -> &'a Number {
        if self.compare(a, b) == Ordering::Less {
            b
        } else {
            a
        }
    }

    pub fn min<'a>(&self, a: &'a Number, b: &'a Number) -> &'a Number {
        if self.compare(a, b) == Ordering::Greater {
            b
        } else {
            a
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare(self, other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::CollectingDiagnosticHandler;
    use crate::numeric::Base;
    use crate::prelude::*;
    use std::sync::Arc;

    fn dec(value: i64) -> Number {
        Number::from_i64(value, Base::DECIMAL)
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Subscriber writing warn-level events into a shared buffer.
    fn capture_warnings() -> (impl tracing::Subscriber + Send + Sync, Arc<parking_lot::Mutex<Vec<u8>>>) {
        let sink = Captured::default();
        let buffer = sink.0.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        (subscriber, buffer)
    }

    #[test]
    fn test_ordering_by_sign_and_magnitude() {
        assert_eq!(compare(&dec(5), &dec(3)), Ordering::Greater);
        assert_eq!(compare(&dec(-5), &dec(3)), Ordering::Less);
        assert_eq!(compare(&dec(-5), &dec(-3)), Ordering::Less);
        assert_eq!(compare(&dec(0), &dec(0)), Ordering::Equal);
        assert_eq!(compare(&dec(120), &dec(12)), Ordering::Greater);
    }

    #[test]
    fn test_fractions_compare_across_ranges() {
        // 1.25 vs 1.3
        let a = Number::from_digits(false, &[1, 2, 5], Base::DECIMAL, 0).unwrap();
        let b = Number::from_digits(false, &[1, 3], Base::DECIMAL, 0).unwrap();
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_infinity_ordering() {
        let inf = Number::infinity(false, Base::DECIMAL);
        let ninf = Number::infinity(true, Base::DECIMAL);
        assert_eq!(compare(&inf, &dec(1_000_000)), Ordering::Greater);
        assert_eq!(compare(&ninf, &dec(-1_000_000)), Ordering::Less);
        assert_eq!(compare(&inf, &inf), Ordering::Equal);
        assert_eq!(compare(&ninf, &inf), Ordering::Less);
    }

    #[test]
    fn test_compare_scaled() {
        // 450 vs 45·10^1
        assert_eq!(compare_scaled(&dec(450), &dec(45), 1), Ordering::Equal);
        assert_eq!(compare_scaled(&dec(449), &dec(45), 1), Ordering::Less);
        assert_eq!(compare_scaled(&dec(4500), &dec(45), 1), Ordering::Greater);
    }

    #[test]
    fn test_floating_literal_comparison() {
        assert_eq!(Number::floating(3), dec(3));
        assert!(Number::floating(-2) < dec(1));
    }

    #[test]
    fn test_mismatched_bases_emit_diagnostic() {
        let handler = Arc::new(CollectingDiagnosticHandler::new());
        let ctx = ContextBuilder::new().build(handler.clone()).unwrap();

        let a = Number::from_i64(1, Base::BINARY);
        let b = Number::from_i64(1, Base::DECIMAL);
        assert_eq!(ctx.compare(&a, &b), Ordering::Equal);
        assert!(handler.contains(&Diagnostic::MismatchedBaseComparison { left: 2, right: 10 }));
    }

    #[test]
    fn test_operator_comparison_logs_mismatched_bases() {
        let (subscriber, captured) = capture_warnings();
        let less = tracing::subscriber::with_default(subscriber, || {
            Number::from_i64(5, Base::OCTAL) < Number::from_i64(7, Base::DECIMAL)
        });
        assert!(less);

        let output = String::from_utf8(captured.lock().clone()).unwrap();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("comparing base 8 with base 10"), "{}", output);
    }

    #[test]
    fn test_same_base_comparison_is_silent() {
        let (subscriber, captured) = capture_warnings();
        tracing::subscriber::with_default(subscriber, || {
            assert!(dec(5) < dec(7));
            assert_eq!(Number::floating(7), dec(7));
        });
        assert!(captured.lock().is_empty());
    }

    #[test]
    fn test_min_max() {
        let ctx = Context::default();
        let (a, b) = (dec(-4), dec(9));
        assert!(ctx.max(&a, &b).identical(&b));
        assert!(ctx.min(&a, &b).identical(&a));
    }
}
