// ============================================================================
// Radix Number Library
// Arbitrary-base, arbitrary-precision arithmetic with pluggable algorithms
// ============================================================================

//! # Radix Number
//!
//! Signed numbers in any base from 2 to 255, with as many digits as memory
//! allows, and an arithmetic engine built on them.
//!
//! ## Features
//!
//! - **Any radix** with a floating reference power, so integers and
//!   fractions share one representation
//! - **Pluggable algorithms**: schoolbook or Karatsuba multiplication;
//!   schoolbook, Newton-Raphson or Goldschmidt division
//! - **Fork-join parallelism** via rayon for large operands
//! - **Transcendental functions** (exp, ln, sin, cos, tan and hyperbolic
//!   variants) to a configurable precision
//! - **Diagnostics** instead of panics for numeric edge cases such as
//!   division by zero
//! - **Text encodings**: radix-64 notation and a labeled debug record
//!
//! ## Example
//!
//! ```rust
//! use radix_number::prelude::*;
//! use std::sync::Arc;
//!
//! let ctx = ContextBuilder::new()
//!     .precision(40)
//!     .build(Arc::new(NoOpDiagnosticHandler))
//!     .unwrap();
//!
//! let a: Number = ">+1.f*g^+1".parse().unwrap(); // 0x1f in base 16
//! let b = Number::from_i64(33, Base::HEXADECIMAL);
//! let sum = ctx.add(&a, &b).unwrap();
//! assert_eq!(sum.to_i64().unwrap(), 64);
//!
//! let third = ctx.div(&Number::one(Base::DECIMAL), &Number::from_i64(3, Base::DECIMAL)).unwrap();
//! assert_eq!(third.len(), 40);
//!
//! // Division by zero yields a signed infinity, not an error
//! let inf = ctx.div(&b, &Number::zero(Base::HEXADECIMAL)).unwrap();
//! assert!(inf.is_infinite());
//! ```

pub mod domain;
pub mod engine;
pub mod format;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::settings;
    pub use crate::domain::{ContextConfig, DivisionAlgorithmType, MultiplicationAlgorithmType};
    pub use crate::engine::{
        compare, create_context, Constant, Context, ContextBuilder, GoldschmidtDivision,
        KaratsubaMultiplication, NewtonRaphsonDivision, SchoolbookDivision,
        SchoolbookMultiplication,
    };
    pub use crate::format::Endianness;
    pub use crate::interfaces::{
        CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler, DivisionAlgorithm,
        LoggingDiagnosticHandler, MultiplicationAlgorithm, NoOpDiagnosticHandler,
    };
    pub use crate::numeric::{Base, Number, NumberError, NumberResult};
}
