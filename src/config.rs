//! Field configuration

use crate::error::FieldError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a neural field simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldConfig {
    /// Number of spatial nodes.
    pub sampling_points: usize,

    /// Integration step in milliseconds.
    pub time_step: f64,

    /// Field time constant in milliseconds.
    pub tau: f64,

    /// Resting level `h` the field relaxes to without input.
    pub resting_level: f64,

    /// Amplitude of the per-node uniform noise.
    pub noise_strength: f64,

    /// Length of every interaction kernel (odd).
    pub kernel_size: usize,

    /// Seed for the noise source. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl FieldConfig {
    /// Create a configuration with the default dynamics and `sampling_points` nodes.
    pub fn new(sampling_points: usize) -> Self {
        Self {
            sampling_points,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise_strength(mut self, noise_strength: f64) -> Self {
        self.noise_strength = noise_strength;
        self
    }

    /// Fraction of `du` applied per step (dt / tau).
    pub fn step_fraction(&self) -> f64 {
        self.time_step / self.tau
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.sampling_points == 0 {
            return Err(FieldError::InvalidConfig("sampling_points must be > 0"));
        }
        if !(self.time_step > 0.0) {
            return Err(FieldError::InvalidConfig("time_step must be > 0"));
        }
        if !(self.tau > 0.0) {
            return Err(FieldError::InvalidConfig("tau must be > 0"));
        }
        if !(self.noise_strength >= 0.0) {
            return Err(FieldError::InvalidConfig("noise_strength must be >= 0"));
        }
        if self.kernel_size % 2 == 0 {
            return Err(FieldError::EvenKernelLength(self.kernel_size));
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            sampling_points: 120,
            time_step: 25.0,
            tau: 500.0,
            resting_level: -50.0,
            noise_strength: 0.2,
            kernel_size: 15,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.sampling_points, 120);
        assert_eq!(config.kernel_size, 15);
        assert!((config.step_fraction() - 0.05).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_even_kernel() {
        let config = FieldConfig {
            kernel_size: 14,
            ..FieldConfig::default()
        };
        assert_eq!(config.validate(), Err(FieldError::EvenKernelLength(14)));
    }

    #[test]
    fn test_rejects_degenerate_dynamics() {
        assert!(FieldConfig::new(0).validate().is_err());
        assert!(FieldConfig::default()
            .with_noise_strength(-0.1)
            .validate()
            .is_err());

        let config = FieldConfig {
            tau: 0.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
