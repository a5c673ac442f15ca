// ============================================================================
// Engine Module
// Arithmetic over radix numbers: context, strategies, functions
// ============================================================================

mod addition;
mod compare;
mod constants;
mod context;
mod division;
mod multiplication;
mod ops;
mod power;
mod transcendental;

pub mod factory;

pub use compare::{compare, compare_magnitudes};
pub use constants::Constant;
pub use context::Context;
pub use division::{GoldschmidtDivision, NewtonRaphsonDivision, SchoolbookDivision};
pub use factory::{
    create_context, create_division_algorithm, create_multiplication_algorithm, ContextBuilder,
};
pub use multiplication::{KaratsubaMultiplication, SchoolbookMultiplication};
