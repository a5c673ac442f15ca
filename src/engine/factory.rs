// ============================================================================
// Context Factory
// Creates computation contexts with proper configuration
// ============================================================================

use crate::domain::config::{ContextConfig, DivisionAlgorithmType, MultiplicationAlgorithmType};
use crate::engine::{
    Context, GoldschmidtDivision, KaratsubaMultiplication, NewtonRaphsonDivision,
    SchoolbookDivision, SchoolbookMultiplication,
};
use crate::interfaces::{Diagnostic, DiagnosticHandler, DivisionAlgorithm, MultiplicationAlgorithm};
use crate::numeric::{Base, NumberResult};
use std::sync::Arc;

/// Combined digit count below which forced Karatsuba still uses schoolbook.
/// Single-digit operands are scaled directly regardless.
const FORCED_KARATSUBA_CUTOFF: usize = 4;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a computation context from configuration
///
/// # Arguments
/// * `config` - Context configuration
/// * `diagnostics` - Sink for recoverable numeric events
///
/// # Returns
/// * `NumberResult<Context>` - Configured context or `InvalidConfig`
///
/// A precision outside the recommended range is accepted and reported to
/// `diagnostics` as `PrecisionOutOfRange`.
///
/// # Example
/// ```
/// use radix_number::prelude::*;
/// use std::sync::Arc;
///
/// let config = ContextConfig::high_precision(Base::DECIMAL);
/// let ctx = create_context(config, Arc::new(NoOpDiagnosticHandler)).unwrap();
/// assert_eq!(ctx.precision(), 100);
/// ```
pub fn create_context(
    config: ContextConfig,
    diagnostics: Arc<dyn DiagnosticHandler>,
) -> NumberResult<Context> {
    config.validate()?;

    if !config.precision_recommended() {
        diagnostics.on_diagnostic(Diagnostic::PrecisionOutOfRange {
            precision: config.precision,
        });
    }

    let multiplier = create_multiplication_algorithm(&config);
    let divider = create_division_algorithm(&config);
    tracing::debug!(
        multiplication = multiplier.name(),
        division = divider.name(),
        precision = config.precision,
        base = config.default_base.get(),
        "context created"
    );

    Ok(Context::new(config, multiplier, divider, diagnostics))
}

/// Creates the multiplication strategy from configuration
pub fn create_multiplication_algorithm(config: &ContextConfig) -> Arc<dyn MultiplicationAlgorithm> {
    match config.multiplication {
        MultiplicationAlgorithmType::Auto => {
            Arc::new(KaratsubaMultiplication::new(config.karatsuba_threshold))
        },
        MultiplicationAlgorithmType::Schoolbook => Arc::new(SchoolbookMultiplication),
        MultiplicationAlgorithmType::Karatsuba => {
            Arc::new(KaratsubaMultiplication::new(FORCED_KARATSUBA_CUTOFF))
        },
    }
}

/// Creates the division strategy from configuration
pub fn create_division_algorithm(config: &ContextConfig) -> Arc<dyn DivisionAlgorithm> {
    match config.division {
        DivisionAlgorithmType::Schoolbook => Arc::new(SchoolbookDivision),
        DivisionAlgorithmType::NewtonRaphson => Arc::new(NewtonRaphsonDivision),
        DivisionAlgorithmType::Goldschmidt => Arc::new(GoldschmidtDivision),
    }
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating contexts with fluent API
///
/// # Example
/// ```
/// use radix_number::prelude::*;
/// use std::sync::Arc;
///
/// let ctx = ContextBuilder::new()
///     .precision(50)
///     .base(Base::HEXADECIMAL)
///     .karatsuba_multiplication()
///     .newton_raphson_division()
///     .build(Arc::new(NoOpDiagnosticHandler))
///     .unwrap();
///
/// assert_eq!(ctx.division_algorithm(), "NewtonRaphson");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    config: ContextConfig,
}

impl ContextBuilder {
    /// Start from the default configuration (32 digits, base 10)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: ContextConfig) -> Self {
        Self { config }
    }

    pub fn precision(mut self, precision: u16) -> Self {
        self.config.precision = precision;
        self
    }

    pub fn base(mut self, base: Base) -> Self {
        self.config.default_base = base;
        self
    }

    // ========================================================================
    // Algorithm Selection
    // ========================================================================

    pub fn multiplication(mut self, algorithm: MultiplicationAlgorithmType) -> Self {
        self.config.multiplication = algorithm;
        self
    }

    /// Schoolbook below the Karatsuba threshold, Karatsuba above (default)
    pub fn auto_multiplication(self) -> Self {
        self.multiplication(MultiplicationAlgorithmType::Auto)
    }

    pub fn schoolbook_multiplication(self) -> Self {
        self.multiplication(MultiplicationAlgorithmType::Schoolbook)
    }

    pub fn karatsuba_multiplication(self) -> Self {
        self.multiplication(MultiplicationAlgorithmType::Karatsuba)
    }

    pub fn division(mut self, algorithm: DivisionAlgorithmType) -> Self {
        self.config.division = algorithm;
        self
    }

    /// Table long division (default)
    pub fn schoolbook_division(self) -> Self {
        self.division(DivisionAlgorithmType::Schoolbook)
    }

    pub fn newton_raphson_division(self) -> Self {
        self.division(DivisionAlgorithmType::NewtonRaphson)
    }

    pub fn goldschmidt_division(self) -> Self {
        self.division(DivisionAlgorithmType::Goldschmidt)
    }

    // ========================================================================
    // Tuning
    // ========================================================================

    pub fn with_karatsuba_threshold(mut self, digits: usize) -> Self {
        self.config.karatsuba_threshold = digits;
        self
    }

    pub fn with_parallel_threshold(mut self, digits: usize) -> Self {
        self.config.parallel_threshold = digits;
        self
    }

    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    pub fn with_guard_digits(mut self, digits: u16) -> Self {
        self.config.guard_digits = digits;
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    pub fn fast(base: Base) -> Self {
        Self::from_config(ContextConfig::fast(base))
    }

    pub fn high_precision(base: Base) -> Self {
        Self::from_config(ContextConfig::high_precision(base))
    }

    // ========================================================================
    // Build
    // ========================================================================

    pub fn build(self, diagnostics: Arc<dyn DiagnosticHandler>) -> NumberResult<Context> {
        create_context(self.config, diagnostics)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &ContextConfig {
        &self.config
    }
}
