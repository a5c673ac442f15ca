// ============================================================================
// Numeric Errors
// Error types for structural failures of radix arithmetic
// ============================================================================

use std::fmt;

/// Hard failures: the operation could not be performed at all.
///
/// Numerically meaningful edge cases (division by zero, a fractional operand
/// where an integer is expected) are not errors. They produce a value plus a
/// [`Diagnostic`](crate::interfaces::Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberError {
    /// Textual input does not match the grammar; names the failing construct
    Format { construct: &'static str },
    /// Requested base is below 2 or above what the encoding supports
    InvalidBase(u16),
    /// Two concrete, differing bases were combined
    IncompatibleBase { left: u8, right: u8 },
    /// Both operands carry an unset base and nothing can resolve it
    DualFloatingBase,
    /// Modulus by zero
    DivisionByZero,
    /// The operand lies outside the function's domain
    OutOfDomain(&'static str),
    /// NaN input, or an infinite operand where only finite values make sense
    NonFinite,
    /// Value does not fit the requested native type
    Overflow,
    /// Context configuration was rejected
    InvalidConfig(String),
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::Format { construct } => {
                write!(f, "format error: malformed {}", construct)
            },
            NumberError::InvalidBase(base) => write!(f, "invalid base: {}", base),
            NumberError::IncompatibleBase { left, right } => write!(
                f,
                "incompatible bases: cannot combine base {} with base {}",
                left, right
            ),
            NumberError::DualFloatingBase => {
                write!(f, "both operands have an unset base; nothing to resolve it against")
            },
            NumberError::DivisionByZero => write!(f, "division by zero"),
            NumberError::OutOfDomain(what) => write!(f, "out of domain: {}", what),
            NumberError::NonFinite => write!(f, "non-finite operand"),
            NumberError::Overflow => {
                write!(f, "overflow: value does not fit the target type")
            },
            NumberError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for NumberError {}

/// Result type alias for radix number operations
pub type NumberResult<T> = Result<T, NumberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumberError::Format { construct: "base marker" }.to_string(),
            "format error: malformed base marker"
        );
        assert_eq!(NumberError::InvalidBase(1).to_string(), "invalid base: 1");
        assert_eq!(
            NumberError::IncompatibleBase { left: 2, right: 10 }.to_string(),
            "incompatible bases: cannot combine base 2 with base 10"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumberError::DualFloatingBase, NumberError::DualFloatingBase);
        assert_ne!(NumberError::InvalidBase(0), NumberError::InvalidBase(1));
    }
}
