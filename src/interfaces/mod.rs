// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod arithmetic_algorithm;
mod diagnostic_handler;

pub use arithmetic_algorithm::{DivisionAlgorithm, MultiplicationAlgorithm};
pub use diagnostic_handler::{
    CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler, LoggingDiagnosticHandler,
    NoOpDiagnosticHandler,
};
