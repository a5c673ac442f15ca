// ============================================================================
// Computation Context
// Configuration, strategy objects and diagnostic sink for every operation
// ============================================================================

use super::addition::add_signed;
use super::factory::{create_division_algorithm, create_multiplication_algorithm};
use crate::domain::config::ContextConfig;
use crate::domain::settings;
use crate::interfaces::{
    Diagnostic, DiagnosticHandler, DivisionAlgorithm, LoggingDiagnosticHandler,
    MultiplicationAlgorithm,
};
use crate::numeric::{resolve_base, Base, Number, NumberResult};
use std::borrow::Cow;
use std::sync::Arc;

/// Entry point for arithmetic.
///
/// A context is cheap to clone and safe to share across threads. Two contexts
/// with different precisions can run side by side without touching the
/// process-wide defaults.
#[derive(Clone)]
pub struct Context {
    config: ContextConfig,
    multiplier: Arc<dyn MultiplicationAlgorithm>,
    divider: Arc<dyn DivisionAlgorithm>,
    diagnostics: Arc<dyn DiagnosticHandler>,
}

impl Context {
    /// Assemble a context from already-built parts.
    ///
    /// Use [`create_context`](super::create_context) or
    /// [`ContextBuilder`](super::ContextBuilder) to build one from a
    /// validated configuration.
    pub fn new(
        config: ContextConfig,
        multiplier: Arc<dyn MultiplicationAlgorithm>,
        divider: Arc<dyn DivisionAlgorithm>,
        diagnostics: Arc<dyn DiagnosticHandler>,
    ) -> Self {
        Self {
            config,
            multiplier,
            divider,
            diagnostics,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Significant digits kept by division and iterative routines.
    #[inline]
    pub fn precision(&self) -> usize {
        self.config.precision as usize
    }

    /// Base given to floating literals that meet no concrete operand.
    #[inline]
    pub fn default_base(&self) -> Base {
        self.config.default_base
    }

    pub fn multiplication_algorithm(&self) -> &str {
        self.multiplier.name()
    }

    pub fn division_algorithm(&self) -> &str {
        self.divider.name()
    }

    /// Same strategies, different precision.
    pub fn with_precision(&self, precision: u16) -> Self {
        let mut copy = self.clone();
        copy.config.precision = precision.max(1);
        copy
    }

    /// Copy carrying the configured guard digits on top of the precision.
    pub(crate) fn widened(&self) -> Self {
        self.with_precision(self.config.precision.saturating_add(self.config.guard_digits))
    }

    #[inline]
    pub(crate) fn max_iterations(&self) -> u32 {
        self.config.max_iterations
    }

    #[inline]
    pub(crate) fn parallel_threshold(&self) -> usize {
        self.config.parallel_threshold
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "diagnostic emitted");
        self.diagnostics.on_diagnostic(diagnostic);
    }

    // ========================================================================
    // Operand Preparation
    // ========================================================================

    /// Resolve the shared base of two operands, fixing any floating literal.
    pub(crate) fn operands<'a>(
        &self,
        a: &'a Number,
        b: &'a Number,
    ) -> NumberResult<(Base, Cow<'a, Number>, Cow<'a, Number>)> {
        let base = resolve_base(a.base(), b.base())?;
        Ok((base, resolve_with(a, base), resolve_with(b, base)))
    }

    /// Resolve a single operand; a floating literal takes the default base.
    pub(crate) fn operand<'a>(&self, a: &'a Number) -> (Base, Cow<'a, Number>) {
        let base = a.base().unwrap_or(self.config.default_base);
        (base, resolve_with(a, base))
    }

    // ========================================================================
    // Fork-Join
    // ========================================================================

    /// Run two independent computations, in parallel once the operands are
    /// at least `parallel_threshold` digits long.
    pub(crate) fn join<A, B, RA, RB>(&self, digits: usize, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        if digits >= self.config.parallel_threshold {
            rayon::join(a, b)
        } else {
            (a(), b())
        }
    }

    // ========================================================================
    // Strategy Dispatch
    // ========================================================================

    /// Magnitude product of two finite, resolved operands.
    #[inline]
    pub(crate) fn multiply_magnitudes(&self, a: &Number, b: &Number) -> Number {
        self.multiplier.multiply(self, a, b)
    }

    /// Magnitude quotient of two finite, resolved operands; divisor nonzero.
    #[inline]
    pub(crate) fn divide_magnitudes(&self, a: &Number, b: &Number) -> Number {
        self.divider.divide(self, a, b)
    }

    // ========================================================================
    // Convergence
    // ========================================================================

    /// True when two successive iterates agree to `precision` digits.
    ///
    /// Iterates are carried with guard digits, so last-place jitter
    /// does not keep a loop alive.
    pub(crate) fn converged(&self, previous: &Number, next: &Number) -> bool {
        agree_to(previous, next, self.precision())
    }

    /// True when `a` and `b` agree to `digits` significant digits.
    ///
    /// # Errors
    /// Fails only when the operands have incompatible bases.
    pub fn approx_eq(&self, a: &Number, b: &Number, digits: usize) -> NumberResult<bool> {
        if a.is_infinite() || b.is_infinite() {
            return Ok(a.is_infinite() && b.is_infinite() && a.is_negative() == b.is_negative());
        }
        let diff = self.sub(a, b)?;
        Ok(diff.is_zero() || diff.power() < a.power().max(b.power()) - digits as i64)
    }
}

/// True when `previous` and `next` differ only below their leading `digits`
/// positions.
pub(crate) fn agree_to(previous: &Number, next: &Number, digits: usize) -> bool {
    let Some(base) = next.base() else {
        return false;
    };
    let diff = add_signed(previous, next, true, base, usize::MAX);
    diff.is_zero() || diff.power() < previous.power().max(next.power()) - digits as i64
}

fn resolve_with(x: &Number, base: Base) -> Cow<'_, Number> {
    if x.base().is_some() {
        Cow::Borrowed(x)
    } else {
        Cow::Owned(x.resolved(base))
    }
}

impl Default for Context {
    /// Snapshot of the process-wide precision and base, default strategies,
    /// diagnostics forwarded to `tracing`.
    fn default() -> Self {
        let config = ContextConfig::new(settings::precision(), settings::default_base());
        Self::new(
            config.clone(),
            create_multiplication_algorithm(&config),
            create_division_algorithm(&config),
            Arc::new(LoggingDiagnosticHandler),
        )
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("multiplication", &self.multiplier.name())
            .field("division", &self.divider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_context;
    use crate::interfaces::NoOpDiagnosticHandler;

    #[test]
    fn test_default_snapshot() {
        let ctx = Context::default();
        assert!(ctx.precision() >= 1);
        assert_eq!(ctx.multiplication_algorithm(), "Karatsuba");
        assert_eq!(ctx.division_algorithm(), "Schoolbook");
    }

    #[test]
    fn test_join_forks_at_threshold() {
        let config = ContextConfig::default().with_parallel_threshold(8);
        let ctx = create_context(config, Arc::new(NoOpDiagnosticHandler)).unwrap();

        // Off the pool below the threshold, on it at or above
        let (a, b) = ctx.join(7, rayon::current_thread_index, rayon::current_thread_index);
        assert_eq!((a, b), (None, None));

        let (a, b) = ctx.join(8, rayon::current_thread_index, rayon::current_thread_index);
        assert!(a.is_some() && b.is_some());
    }

    #[test]
    fn test_widened_adds_guard_digits() {
        let ctx = Context::default().with_precision(20);
        assert_eq!(ctx.widened().precision(), 20 + ctx.config().guard_digits as usize);
    }

    #[test]
    fn test_operand_resolution() {
        let ctx = Context::default();
        let a = Number::from_i64(5, Base::OCTAL);
        let lit = Number::floating(12);

        let (base, x, y) = ctx.operands(&a, &lit).unwrap();
        assert_eq!(base, Base::OCTAL);
        assert!(x.identical(&a));
        // 12 in base 8 is 14
        assert_eq!(y.digits(), &[1, 4]);

        assert!(ctx.operands(&lit, &lit).is_err());
    }

    #[test]
    fn test_join_sequential_and_parallel() {
        let ctx = Context::default();
        assert_eq!(ctx.join(0, || 1, || 2), (1, 2));
        assert_eq!(ctx.join(usize::MAX, || "a", || "b"), ("a", "b"));
    }
}
