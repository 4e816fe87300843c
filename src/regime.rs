//! Interaction regimes
//!
//! A regime pairs a kernel with a global inhibition strength. The pairs are
//! computed once and never mutated, so switching regimes can never leave a
//! kernel running with another regime's inhibition.

use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;
use crate::kernel::{build_kernel, InteractionKernel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named operating regime of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Regime {
    /// One peak wins; strong global inhibition.
    Selective,
    /// Several peaks coexist; no global inhibition.
    MultiPeak,
    /// Peaks sustain themselves after input is removed.
    WorkingMemory,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::Selective, Regime::MultiPeak, Regime::WorkingMemory];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Regime::Selective => "selective",
            Regime::MultiPeak => "multi_peak",
            Regime::WorkingMemory => "working_memory",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Regime::Selective => "selective kernel",
            Regime::MultiPeak => "multi peak kernel",
            Regime::WorkingMemory => "working memory kernel",
        }
    }

    /// Calibrated global inhibition strength (never positive).
    pub fn global_inhibition_strength(self) -> f64 {
        match self {
            Regime::Selective => -20.5,
            Regime::MultiPeak => 0.0,
            Regime::WorkingMemory => -2.0,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Regime {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regime::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| FieldError::UnknownRegime(s.to_string()))
    }
}

/// Immutable kernel + global inhibition pair for one regime.
#[derive(Clone, Debug, PartialEq)]
pub struct RegimeConfig {
    regime: Regime,
    kernel: InteractionKernel,
    global_inhibition_strength: f64,
}

impl RegimeConfig {
    /// Pair an arbitrary kernel with an inhibition strength under a regime tag.
    pub fn new(regime: Regime, kernel: InteractionKernel, global_inhibition_strength: f64) -> Self {
        Self {
            regime,
            kernel,
            global_inhibition_strength,
        }
    }

    /// The calibrated configuration of `regime` with kernels of `kernel_size`.
    pub fn calibrated(regime: Regime, kernel_size: usize) -> Self {
        Self::new(
            regime,
            build_kernel(regime, kernel_size),
            regime.global_inhibition_strength(),
        )
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn kernel(&self) -> &InteractionKernel {
        &self.kernel
    }

    pub fn global_inhibition_strength(&self) -> f64 {
        self.global_inhibition_strength
    }
}

/// The three precomputed regimes.
#[derive(Clone, Debug)]
pub struct RegimeLibrary {
    configs: [RegimeConfig; 3],
}

impl RegimeLibrary {
    /// Precompute every regime with kernels of `kernel_size` weights.
    ///
    /// # Panics
    /// Panics if `kernel_size` is even. [`FieldConfig::validate`] rejects
    /// such sizes before a [`Simulation`] builds its library.
    ///
    /// [`FieldConfig::validate`]: crate::FieldConfig::validate
    /// [`Simulation`]: crate::Simulation
    pub fn new(kernel_size: usize) -> Self {
        Self {
            configs: Regime::ALL.map(|r| RegimeConfig::calibrated(r, kernel_size)),
        }
    }

    pub fn get(&self, regime: Regime) -> &RegimeConfig {
        let idx = match regime {
            Regime::Selective => 0,
            Regime::MultiPeak => 1,
            Regime::WorkingMemory => 2,
        };
        &self.configs[idx]
    }

    /// Look up a regime by name.
    pub fn select(&self, name: &str) -> Result<&RegimeConfig, FieldError> {
        Ok(self.get(name.parse()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegimeConfig> {
        self.configs.iter()
    }
}
