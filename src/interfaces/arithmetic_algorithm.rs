// ============================================================================
// Arithmetic Algorithm Interfaces
// Defines the contract for pluggable multiplication and division strategies
// ============================================================================

use crate::engine::Context;
use crate::numeric::Number;

/// Strategy pattern interface for multiplication
/// Implementations: Schoolbook, Karatsuba
pub trait MultiplicationAlgorithm: Send + Sync {
    /// Multiply the magnitudes of two finite operands sharing one base.
    ///
    /// Signs are ignored; the result is normalized and non-negative.
    ///
    /// # Arguments
    /// * `ctx` - Computation context (thresholds, nested operations)
    /// * `lhs`, `rhs` - Operands with a resolved, identical base
    fn multiply(&self, ctx: &Context, lhs: &Number, rhs: &Number) -> Number;

    /// Get the algorithm name for logging/benchmarks
    fn name(&self) -> &str;
}

/// Strategy pattern interface for division
/// Implementations: Schoolbook, Newton-Raphson, Goldschmidt
pub trait DivisionAlgorithm: Send + Sync {
    /// Divide the magnitude of `dividend` by the magnitude of `divisor`.
    ///
    /// Operands are finite, share one base, and the divisor is nonzero.
    /// The quotient is non-negative and keeps at most `ctx.precision()`
    /// significant digits.
    fn divide(&self, ctx: &Context, dividend: &Number, divisor: &Number) -> Number;

    /// Get the algorithm name for logging/benchmarks
    fn name(&self) -> &str;
}
