//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of vehicles a station can hold unless configured otherwise.
pub const DEFAULT_FLEET_CAPACITY: usize = 512;

/// Tunable limits applied to every station of a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of vehicles per station.
    pub fleet_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fleet_capacity: DEFAULT_FLEET_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Build a configuration with the given per-station fleet capacity.
    pub fn with_fleet_capacity(capacity: usize) -> Result<Self> {
        let config = Self {
            fleet_capacity: capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never hold a vehicle.
    pub fn validate(&self) -> Result<()> {
        if self.fleet_capacity == 0 {
            return Err(Error::InvalidFleetCapacity {
                capacity: self.fleet_capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_matches_reference_limit() {
        assert_eq!(RegistryConfig::default().fleet_capacity, 512);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = RegistryConfig::with_fleet_capacity(0).expect_err("zero rejected");
        assert!(matches!(err, Error::InvalidFleetCapacity { capacity: 0 }));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RegistryConfig = serde_json::from_str("{}").expect("parses");
        assert_eq!(config, RegistryConfig::default());
    }
}
