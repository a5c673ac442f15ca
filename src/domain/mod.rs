// ============================================================================
// Domain Module
// Configuration for computation contexts
// ============================================================================

pub mod config;
pub mod settings;

pub use config::{ContextConfig, DivisionAlgorithmType, MultiplicationAlgorithmType};
