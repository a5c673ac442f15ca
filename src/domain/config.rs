// ============================================================================
// Context Configuration
// Precision, default base and algorithm selection for a computation context
// ============================================================================

use crate::numeric::{Base, NumberError, NumberResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digit count at which `Auto` switches from schoolbook to Karatsuba.
pub const DEFAULT_KARATSUBA_THRESHOLD: usize = 300;

/// Digit count below which loops and recursive branches stay on one thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Recommended precision range; values outside it still work.
pub const RECOMMENDED_PRECISION: std::ops::RangeInclusive<u16> = 15..=100;

// ============================================================================
// Algorithm Selection
// ============================================================================

/// Multiplication strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MultiplicationAlgorithmType {
    /// Schoolbook below `karatsuba_threshold` combined digits, Karatsuba above
    #[default]
    Auto,

    /// Classical O(n·m) shift-and-accumulate
    Schoolbook,

    /// Divide-and-conquer all the way down to single digits
    Karatsuba,
}

/// Division strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DivisionAlgorithmType {
    /// Digit-by-digit long division over a table of divisor multiples
    #[default]
    Schoolbook,

    /// Multiply by a reciprocal refined with r ← r + r·(1 − r·x)
    NewtonRaphson,

    /// Rescale numerator and denominator by (2 − d) until d reaches 1
    Goldschmidt,
}

// ============================================================================
// Context Configuration
// ============================================================================

/// Comprehensive configuration for creating a computation context
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContextConfig {
    /// Significant digits kept by division and iterative routines
    pub precision: u16,

    /// Base for values built from native numbers and for unset bases
    pub default_base: Base,

    /// Multiplication strategy
    pub multiplication: MultiplicationAlgorithmType,

    /// Division strategy
    pub division: DivisionAlgorithmType,

    /// Combined digit count at which `Auto` multiplication turns to Karatsuba
    pub karatsuba_threshold: usize,

    /// Digit count at which work is split across the thread pool
    pub parallel_threshold: usize,

    /// Hard cap on every iterative loop
    pub max_iterations: u32,

    /// Extra digits carried inside iterative routines and trimmed at the end
    pub guard_digits: u16,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new(32, Base::DECIMAL)
    }
}

impl ContextConfig {
    /// Create a new configuration with required parameters
    pub fn new(precision: u16, default_base: Base) -> Self {
        Self {
            precision,
            default_base,
            multiplication: MultiplicationAlgorithmType::Auto,
            division: DivisionAlgorithmType::Schoolbook,
            karatsuba_threshold: DEFAULT_KARATSUBA_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_iterations: 1000,
            guard_digits: 4,
        }
    }

    /// Builder method: Set precision
    pub fn with_precision(mut self, precision: u16) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set default base
    pub fn with_base(mut self, base: Base) -> Self {
        self.default_base = base;
        self
    }

    /// Builder method: Set multiplication strategy
    pub fn with_multiplication(mut self, algorithm: MultiplicationAlgorithmType) -> Self {
        self.multiplication = algorithm;
        self
    }

    /// Builder method: Set division strategy
    pub fn with_division(mut self, algorithm: DivisionAlgorithmType) -> Self {
        self.division = algorithm;
        self
    }

    /// Builder method: Set the schoolbook/Karatsuba crossover
    pub fn with_karatsuba_threshold(mut self, digits: usize) -> Self {
        self.karatsuba_threshold = digits;
        self
    }

    /// Builder method: Set the fork threshold
    pub fn with_parallel_threshold(mut self, digits: usize) -> Self {
        self.parallel_threshold = digits;
        self
    }

    /// Builder method: Set the iteration cap
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Builder method: Set guard digits
    pub fn with_guard_digits(mut self, digits: u16) -> Self {
        self.guard_digits = digits;
        self
    }

    /// True when precision is inside the recommended range
    pub fn precision_recommended(&self) -> bool {
        RECOMMENDED_PRECISION.contains(&self.precision)
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumberResult<()> {
        if self.precision == 0 {
            return Err(NumberError::InvalidConfig(
                "precision must be at least one digit".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(NumberError::InvalidConfig(
                "iteration cap must be positive".to_string(),
            ));
        }

        if self.parallel_threshold == 0 {
            return Err(NumberError::InvalidConfig(
                "parallel threshold must be positive".to_string(),
            ));
        }

        // Iterates are compared at `precision` but carried at
        // `precision + guard_digits`; fewer than two never settle.
        if self.guard_digits < 2 {
            return Err(NumberError::InvalidConfig(
                "at least two guard digits are required".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl ContextConfig {
    /// Low precision, quick iteration
    /// - 16 significant digits
    /// - Schoolbook division
    pub fn fast(default_base: Base) -> Self {
        Self::new(16, default_base).with_guard_digits(2)
    }

    /// High precision for transcendental work
    /// - 100 significant digits
    /// - Newton-Raphson division
    pub fn high_precision(default_base: Base) -> Self {
        Self::new(100, default_base)
            .with_division(DivisionAlgorithmType::NewtonRaphson)
            .with_guard_digits(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = ContextConfig::new(40, Base::HEXADECIMAL);

        assert_eq!(config.precision, 40);
        assert_eq!(config.default_base, Base::HEXADECIMAL);
        assert_eq!(config.multiplication, MultiplicationAlgorithmType::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ContextConfig::default()
            .with_precision(50)
            .with_multiplication(MultiplicationAlgorithmType::Karatsuba)
            .with_division(DivisionAlgorithmType::Goldschmidt)
            .with_karatsuba_threshold(64);

        assert_eq!(config.precision, 50);
        assert_eq!(config.division, DivisionAlgorithmType::Goldschmidt);
        assert_eq!(config.karatsuba_threshold, 64);
    }

    #[test]
    fn test_validation() {
        assert!(ContextConfig::default().with_precision(0).validate().is_err());
        assert!(ContextConfig::default().with_max_iterations(0).validate().is_err());
        assert!(ContextConfig::default().with_parallel_threshold(0).validate().is_err());
        assert!(ContextConfig::default().with_guard_digits(1).validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        let fast = ContextConfig::fast(Base::BINARY);
        assert_eq!(fast.precision, 16);
        assert!(fast.precision_recommended());

        let high = ContextConfig::high_precision(Base::DECIMAL);
        assert_eq!(high.division, DivisionAlgorithmType::NewtonRaphson);
        assert!(high.precision_recommended());

        assert!(!ContextConfig::default().with_precision(500).precision_recommended());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let config = ContextConfig::high_precision(Base::HEXADECIMAL);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"NewtonRaphson\""));
        let back: ContextConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        assert!(serde_json::from_str::<Base>("1").is_err());
    }
}
