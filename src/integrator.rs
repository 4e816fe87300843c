//! Stochastic Euler integration of the field equation
//!
//! ```text
//! tau du_i/dt = -u_i + h + s_i + p_i + sum_k w_k f(u_{i+k-c}) + g sum_j f(u_j) + noise
//! ```
//!
//! All nodes update simultaneously: sigmoid outputs are snapshotted before
//! any activation is written, so no node sees a sibling's new value within
//! the same step.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::FieldConfig;
use crate::field::FieldState;
use crate::kernel::InteractionKernel;
use crate::math::sigmoid;
use crate::regime::RegimeConfig;

/// Lateral input to `node` given the output rates `f(u)` of every node.
///
/// Neighbors outside `[0, rates.len())` contribute nothing (open boundary).
pub fn lateral_interaction(rates: &[f64], kernel: &InteractionKernel, node: usize) -> f64 {
    let half = kernel.half_width();
    kernel
        .weights()
        .iter()
        .enumerate()
        .filter_map(|(k, &w)| {
            let neighbor = (node + k).checked_sub(half)?;
            rates.get(neighbor).map(|&r| w * r)
        })
        .sum()
}

/// Advances a [`FieldState`] one time step at a time.
#[derive(Clone, Debug)]
pub struct FieldIntegrator {
    rng: ChaCha8Rng,
    /// Pre-step sigmoid outputs, reused across steps.
    rates: Vec<f64>,
}

impl FieldIntegrator {
    /// Integrator whose noise is drawn from entropy.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Integrator with a reproducible noise sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            rates: Vec::new(),
        }
    }

    /// Integrate one step in place and return the global inhibition sum used.
    ///
    /// Values are never clamped; NaN or infinite inputs propagate.
    pub fn step(
        &mut self,
        state: &mut FieldState,
        config: &FieldConfig,
        regime: &RegimeConfig,
    ) -> f64 {
        let (activation, external, persistent) = state.integration_parts();

        self.rates.clear();
        self.rates.extend(activation.iter().map(|&u| sigmoid(u)));

        let global_activity: f64 = self.rates.iter().sum();
        let global_inhibition = regime.global_inhibition_strength() * global_activity;
        let fraction = config.step_fraction();
        let noise_scale = config.time_step.sqrt() * config.noise_strength;

        for (i, u) in activation.iter_mut().enumerate() {
            let interaction = lateral_interaction(&self.rates, regime.kernel(), i);
            let du = -*u
                + config.resting_level
                + external[i]
                + persistent[i]
                + interaction
                + global_inhibition;

            *u += fraction * du;
            if noise_scale != 0.0 {
                *u += noise_scale * self.rng.gen_range(-1.0..1.0);
            }
        }

        tracing::trace!(global_activity, global_inhibition, "field step");
        global_activity
    }
}

impl Default for FieldIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regime::Regime;

    fn ones_regime(strength: f64) -> RegimeConfig {
        let kernel = InteractionKernel::new(vec![1.0, 1.0, 1.0]).unwrap();
        RegimeConfig::new(Regime::Selective, kernel, strength)
    }

    fn quiet_config(n: usize) -> FieldConfig {
        FieldConfig::new(n).with_noise_strength(0.0)
    }

    #[test]
    fn test_boundary_contributes_nothing() {
        let kernel = InteractionKernel::new(vec![1.0, 10.0, 100.0]).unwrap();
        let rates = [1.0, 1.0, 1.0, 1.0];

        // Left edge: the k=0 neighbor is index -1
        assert!((lateral_interaction(&rates, &kernel, 0) - 110.0).abs() < 1e-12);
        // Interior
        assert!((lateral_interaction(&rates, &kernel, 1) - 111.0).abs() < 1e-12);
        // Right edge: the k=2 neighbor is index 4
        assert!((lateral_interaction(&rates, &kernel, 3) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_wider_than_field() {
        let kernel = InteractionKernel::new(vec![1.0; 15]).unwrap();
        let rates = [0.5, 0.5];
        for node in 0..2 {
            assert!((lateral_interaction(&rates, &kernel, node) - 1.0).abs() < 1e-12);
        }
        assert_eq!(lateral_interaction(&[], &kernel, 0), 0.0);
    }

    #[test]
    fn test_resting_field_is_unchanged() {
        let config = quiet_config(5);
        let mut state = FieldState::new(5, -50.0);
        let mut integrator = FieldIntegrator::seeded(1);

        integrator.step(&mut state, &config, &ones_regime(0.0));

        for &u in state.activation().iter() {
            assert!((u + 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic_without_noise() {
        let config = quiet_config(8);
        let regime = ones_regime(-1.0);
        let initial = vec![-3.0, 1.0, 4.0, -1.0, 5.0, -9.0, 2.0, 6.0];

        let mut a = FieldState::from_activation(initial.clone());
        let mut b = FieldState::from_activation(initial);
        FieldIntegrator::seeded(1).step(&mut a, &config, &regime);
        FieldIntegrator::seeded(2).step(&mut b, &config, &regime);

        assert_eq!(a, b);
    }

    #[test]
    fn test_update_is_simultaneous() {
        // Node 1 is driven only by its neighbors' pre-step rates, which are
        // identical, so nodes 0 and 2 must see the same interaction.
        let config = quiet_config(3);
        let regime = ones_regime(0.0);
        let mut state = FieldState::from_activation(vec![0.0, 0.0, 0.0]);
        let expected_interaction_edge = 2.0 * sigmoid(0.0);
        let expected_interaction_mid = 3.0 * sigmoid(0.0);

        FieldIntegrator::seeded(1).step(&mut state, &config, &regime);

        let f = config.step_fraction();
        let u = state.activation();
        assert!((u[0] - f * (-50.0 + expected_interaction_edge)).abs() < 1e-12);
        assert!((u[1] - f * (-50.0 + expected_interaction_mid)).abs() < 1e-12);
        assert!((u[2] - u[0]).abs() < 1e-12);
    }

    #[test]
    fn test_global_inhibition_uses_all_nodes() {
        let config = quiet_config(4);
        let kernel = InteractionKernel::new(vec![0.0]).unwrap();
        let regime = RegimeConfig::new(Regime::Selective, kernel, -2.0);
        let mut state = FieldState::from_activation(vec![-50.0, 0.0, 0.0, -50.0]);

        let activity = FieldIntegrator::seeded(1).step(&mut state, &config, &regime);

        assert!((activity - 1.0).abs() < 1e-9);
        // du at the resting node is just the global term
        let f = config.step_fraction();
        assert!((state.activation()[0] - (-50.0 + f * -2.0 * activity)).abs() < 1e-9);
    }

    #[test]
    fn test_external_and_persistent_input_drive() {
        let config = quiet_config(2);
        let regime = ones_regime(0.0);
        let mut state = FieldState::new(2, -50.0);
        state.set_external_input(&[10.0, 0.0]).unwrap();
        state.commit_input();
        state.set_external_input(&[0.0, 20.0]).unwrap();

        FieldIntegrator::seeded(1).step(&mut state, &config, &regime);

        let f = config.step_fraction();
        assert!((state.activation()[0] - (-50.0 + f * 10.0)).abs() < 1e-6);
        assert!((state.activation()[1] - (-50.0 + f * 20.0)).abs() < 1e-6);
    }

    #[test]
    fn test_noise_is_bounded_and_seeded() {
        let config = FieldConfig::new(50);
        let regime = ones_regime(0.0);
        let bound = config.time_step.sqrt() * config.noise_strength;

        let mut a = FieldState::new(50, -50.0);
        let mut b = FieldState::new(50, -50.0);
        FieldIntegrator::seeded(7).step(&mut a, &config, &regime);
        FieldIntegrator::seeded(7).step(&mut b, &config, &regime);

        assert_eq!(a, b);
        assert!(a.activation().iter().any(|&u| u != -50.0));
        for &u in a.activation().iter() {
            assert!((u + 50.0).abs() <= bound + 1e-9);
        }
    }
}
