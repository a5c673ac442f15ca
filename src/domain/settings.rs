// ============================================================================
// Process-wide Settings
// Default precision and base read by `Context::default()`
// ============================================================================
//
// These are read-mostly values meant to be set once during startup. Changing
// them while other threads compute is allowed but those computations may see
// either value; build an explicit `Context` when that matters.

use super::config::RECOMMENDED_PRECISION;
use crate::numeric::{Base, NumberError, NumberResult};
use parking_lot::RwLock;
use std::sync::LazyLock;

pub const DEFAULT_PRECISION: u16 = 32;
pub const DEFAULT_BASE: Base = Base::DECIMAL;

#[derive(Debug, Clone, Copy)]
struct Settings {
    precision: u16,
    default_base: Base,
}

static SETTINGS: LazyLock<RwLock<Settings>> = LazyLock::new(|| {
    RwLock::new(Settings {
        precision: DEFAULT_PRECISION,
        default_base: DEFAULT_BASE,
    })
});

/// Current default precision (significant digits).
pub fn precision() -> u16 {
    SETTINGS.read().precision
}

/// Set the default precision.
///
/// Values outside the recommended range are accepted with a warning.
///
/// # Errors
/// Returns `InvalidConfig` for zero.
pub fn set_precision(precision: u16) -> NumberResult<()> {
    if precision == 0 {
        return Err(NumberError::InvalidConfig(
            "precision must be at least one digit".to_string(),
        ));
    }
    if !RECOMMENDED_PRECISION.contains(&precision) {
        tracing::warn!(
            precision,
            "precision outside the recommended range {:?}",
            RECOMMENDED_PRECISION
        );
    }
    SETTINGS.write().precision = precision;
    Ok(())
}

/// Current default base.
pub fn default_base() -> Base {
    SETTINGS.read().default_base
}

/// Set the default base.
///
/// # Errors
/// Returns `InvalidBase` below 2.
pub fn set_default_base(radix: u8) -> NumberResult<()> {
    let base = Base::new(radix)?;
    SETTINGS.write().default_base = base;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The globals are shared by every test in the binary; only the
    // rejecting paths are exercised here so nothing else observes a change.

    #[test]
    fn test_rejects_invalid_values() {
        assert!(set_precision(0).is_err());
        assert_eq!(set_default_base(1), Err(NumberError::InvalidBase(1)));
        assert!(precision() > 0);
        assert!(default_base().get() >= 2);
    }
}
