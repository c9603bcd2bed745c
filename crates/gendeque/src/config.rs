//! Container configuration parameters.

use crate::error::DequeError;

/// Configuration for a [`GenDeque`](crate::GenDeque).
///
/// Controls the initial slot count and how aggressively each end grows.
/// Validated at construction; immutable for the container's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DequeConfig {
    /// Slot count used when a container is created with capacity zero.
    ///
    /// Default: 8. Must be at least 1.
    pub initial_capacity: usize,

    /// Factor applied to the capacity when an end runs out of room.
    ///
    /// Default: 2. Must be at least 2. All extra room produced by a growth
    /// step goes to the end that triggered it.
    pub growth_factor: usize,
}

impl DequeConfig {
    /// Default slot count for an empty container.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Default growth multiplier.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Create a config with the default growth factor and the given
    /// initial capacity.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Check the documented constraints on every field.
    pub fn validate(&self) -> Result<(), DequeError> {
        if self.initial_capacity == 0 {
            return Err(DequeError::InvalidConfig {
                reason: "initial_capacity must be >= 1 (got 0)".to_string(),
            });
        }
        if self.growth_factor < 2 {
            return Err(DequeError::InvalidConfig {
                reason: format!(
                    "growth_factor must be >= 2 (got {})",
                    self.growth_factor
                ),
            });
        }
        Ok(())
    }

    /// Capacity after one growth step from `capacity`.
    ///
    /// Never returns less than 1, so an exhausted zero-capacity block can
    /// always grow.
    pub fn grown(&self, capacity: usize) -> usize {
        capacity.saturating_mul(self.growth_factor).max(1)
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_slots_doubling() {
        let config = DequeConfig::default();
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn grown_doubles_with_minimum_one() {
        let config = DequeConfig::default();
        assert_eq!(config.grown(0), 1);
        assert_eq!(config.grown(1), 2);
        assert_eq!(config.grown(8), 16);
    }

    #[test]
    fn zero_initial_capacity_rejected() {
        let config = DequeConfig::new(0);
        assert!(matches!(
            config.validate(),
            Err(DequeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn growth_factor_below_two_rejected() {
        let config = DequeConfig {
            initial_capacity: 4,
            growth_factor: 1,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("growth_factor"));
    }

    #[test]
    fn custom_growth_factor_applies() {
        let config = DequeConfig {
            initial_capacity: 4,
            growth_factor: 3,
        };
        assert_eq!(config.grown(4), 12);
    }
}
