// ============================================================================
// Diagnostic Handler Interface
// Defines the contract for observing recoverable numeric edge cases
// ============================================================================

use parking_lot::Mutex;
use std::fmt;

/// Recoverable events emitted by the engine.
///
/// Each one accompanies a value that was still produced: an infinity
/// sentinel, a floored operand, a result that stopped iterating early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Division by zero; the result is the signed infinity sentinel
    DivisionByZero { negative: bool },

    /// A fractional operand was floored where an integer is required
    NonIntegerOperand { operation: &'static str },

    /// Two concrete, differing bases were compared numerically
    MismatchedBaseComparison { left: u8, right: u8 },

    /// An iterative routine stopped at its cap before converging
    IterationCapReached {
        operation: &'static str,
        iterations: u32,
    },

    /// The operation has no meaningful value (inf − inf, inf × 0, inf / inf)
    IndeterminateForm { operation: &'static str },

    /// The function diverges at the operand (ln 0)
    Singularity { operation: &'static str },

    /// Precision set outside the recommended range
    PrecisionOutOfRange { precision: u16 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DivisionByZero { negative } => write!(
                f,
                "division by zero; returning {}infinity",
                if *negative { "-" } else { "+" }
            ),
            Diagnostic::NonIntegerOperand { operation } => {
                write!(f, "{}: non-integer operand floored", operation)
            },
            Diagnostic::MismatchedBaseComparison { left, right } => {
                write!(f, "comparing base {} with base {}", left, right)
            },
            Diagnostic::IterationCapReached {
                operation,
                iterations,
            } => write!(
                f,
                "{}: stopped after {} iterations without converging",
                operation, iterations
            ),
            Diagnostic::IndeterminateForm { operation } => {
                write!(f, "{}: indeterminate form, returning zero", operation)
            },
            Diagnostic::Singularity { operation } => {
                write!(f, "{}: singularity, returning infinity", operation)
            },
            Diagnostic::PrecisionOutOfRange { precision } => write!(
                f,
                "precision {} is outside the recommended range 15..=100",
                precision
            ),
        }
    }
}

/// Sink for diagnostics.
/// Implementations can log, count, or collect them for inspection.
pub trait DiagnosticHandler: Send + Sync {
    /// Handle a diagnostic
    fn on_diagnostic(&self, diagnostic: Diagnostic);

    /// Batch handler (optional optimization)
    fn on_diagnostics(&self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.on_diagnostic(diagnostic);
        }
    }
}

/// Discards everything
pub struct NoOpDiagnosticHandler;

impl DiagnosticHandler for NoOpDiagnosticHandler {
    fn on_diagnostic(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at warn level
pub struct LoggingDiagnosticHandler;

impl DiagnosticHandler for LoggingDiagnosticHandler {
    fn on_diagnostic(&self, diagnostic: Diagnostic) {
        tracing::warn!("radix arithmetic: {}", diagnostic);
    }
}

/// Keeps every diagnostic for later inspection
#[derive(Default)]
pub struct CollectingDiagnosticHandler {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnosticHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.collected.lock().clone()
    }

    /// Drain everything collected so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.collected.lock())
    }

    pub fn len(&self) -> usize {
        self.collected.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.lock().is_empty()
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.collected.lock().contains(diagnostic)
    }
}

impl DiagnosticHandler for CollectingDiagnosticHandler {
    fn on_diagnostic(&self, diagnostic: Diagnostic) {
        self.collected.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpDiagnosticHandler;
        handler.on_diagnostic(Diagnostic::DivisionByZero { negative: false });
        // Should not panic
    }

    #[test]
    fn test_collecting_handler() {
        let handler = CollectingDiagnosticHandler::new();
        handler.on_diagnostics(vec![
            Diagnostic::DivisionByZero { negative: true },
            Diagnostic::NonIntegerOperand { operation: "pow" },
        ]);

        assert_eq!(handler.len(), 2);
        assert!(handler.contains(&Diagnostic::DivisionByZero { negative: true }));

        let drained = handler.take();
        assert_eq!(drained.len(), 2);
        assert!(handler.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            Diagnostic::DivisionByZero { negative: true }.to_string(),
            "division by zero; returning -infinity"
        );
        assert_eq!(
            Diagnostic::IterationCapReached {
                operation: "ln",
                iterations: 8
            }
            .to_string(),
            "ln: stopped after 8 iterations without converging"
        );
    }
}
