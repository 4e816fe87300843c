//! Simulation - the context object a UI drives
//!
//! Owns everything one running field needs: configuration, state, the
//! precomputed regimes, the active regime, the run mode, the noise source and
//! the subscribed observers. There is no process-wide state; two simulations
//! never interfere.

use std::sync::Arc;

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::FieldState;
use crate::integrator::FieldIntegrator;
use crate::kernel::InteractionKernel;
use crate::math::gaussian;
use crate::observer::{find_peaks, FieldEvent, FieldObserver, MonitoredRegion, Peak};
use crate::regime::{Regime, RegimeConfig, RegimeLibrary};
use crate::vector::FieldVector;

/// Spatial variance of stimuli shaped by [`Simulation::present_stimulus`].
pub const STIMULUS_VARIANCE: f64 = 8.0;

/// Activation above which a node counts as part of a peak.
pub const OUTPUT_THRESHOLD: f64 = 0.0;

/// Whether any input has been committed since start or the last restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Nothing committed yet.
    #[default]
    Beginning,
    /// At least one commit; further commits keep accumulating.
    Running,
}

/// A neural field together with its regimes, noise source and observers.
pub struct Simulation {
    config: FieldConfig,
    state: FieldState,
    regimes: RegimeLibrary,
    active: Regime,
    mode: RunMode,
    integrator: FieldIntegrator,
    tick_count: u64,
    regions: Vec<MonitoredRegion>,
    region_active: Vec<bool>,
    observers: Vec<Arc<dyn FieldObserver>>,
}

impl Simulation {
    /// Create a simulation at rest in the selective regime.
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        tracing::info!(
            nodes = config.sampling_points,
            kernel_size = config.kernel_size,
            seeded = config.seed.is_some(),
            "neural field created"
        );

        Ok(Self {
            state: FieldState::new(config.sampling_points, config.resting_level),
            regimes: RegimeLibrary::new(config.kernel_size),
            active: Regime::Selective,
            mode: RunMode::Beginning,
            integrator: FieldIntegrator::from_config(&config),
            tick_count: 0,
            regions: Vec::new(),
            region_active: Vec::new(),
            observers: Vec::new(),
            config,
        })
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    pub fn subscribe(&mut self, observer: Arc<dyn FieldObserver>) {
        self.observers.push(observer);
    }

    /// Watch a node range for threshold crossings after each tick.
    pub fn monitor_region(&mut self, region: MonitoredRegion) {
        self.regions.push(region);
        self.region_active.push(false);
    }

    fn emit(&self, event: FieldEvent) {
        for observer in &self.observers {
            observer.on_event(event.clone());
        }
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Replace the transient input. Must have one value per node.
    pub fn set_external_input(&mut self, values: &[f64]) -> Result<(), FieldError> {
        self.state.set_external_input(values)
    }

    /// Replace the transient input with a Gaussian bump at `center`.
    ///
    /// `center` is in node coordinates and may be fractional.
    pub fn present_stimulus(&mut self, center: f64, amplitude: f64) {
        let stimulus = gaussian(amplitude, center, STIMULUS_VARIANCE, self.state.dims());
        self.state.external_input_mut().copy_from(&stimulus);
    }

    pub fn clear_external_input(&mut self) {
        self.state.clear_external_input();
    }

    /// Freeze the current transient input into the persistent baseline.
    pub fn commit_input(&mut self) -> RunMode {
        self.state.commit_input();
        let first = self.mode == RunMode::Beginning;
        self.mode = RunMode::Running;
        tracing::debug!(first, tick = self.tick_count, "input committed");
        self.emit(FieldEvent::InputCommitted { first });
        self.mode
    }

    // =========================================================================
    // REGIMES
    // =========================================================================

    /// Activate a regime by name (`selective`, `multi_peak`, `working_memory`).
    ///
    /// Field state is left untouched.
    pub fn select_regime(&mut self, name: &str) -> Result<&RegimeConfig, FieldError> {
        let regime = name.parse()?;
        self.set_regime(regime);
        Ok(self.regimes.get(regime))
    }

    pub fn set_regime(&mut self, regime: Regime) {
        if regime == self.active {
            return;
        }
        tracing::debug!(from = %self.active, to = %regime, "regime selected");
        self.active = regime;
        self.emit(FieldEvent::RegimeSelected { regime });
    }

    // =========================================================================
    // TIME ADVANCEMENT
    // =========================================================================

    /// Integrate one step and notify observers of threshold crossings.
    pub fn tick(&mut self) {
        let regime = self.regimes.get(self.active);
        self.integrator.step(&mut self.state, &self.config, regime);
        self.tick_count += 1;
        self.check_regions();
    }

    /// Advance multiple ticks.
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn check_regions(&mut self) {
        if self.regions.is_empty() {
            return;
        }

        let mut events = Vec::new();
        let activation = self.state.activation().as_slice();
        for (region, active) in self.regions.iter().zip(self.region_active.iter_mut()) {
            let Some((peak, value)) = region.peak(activation) else {
                continue;
            };
            let next = region.next_state(*active, value);
            if next && !*active {
                events.push(FieldEvent::RegionActive {
                    name: region.name.clone(),
                    region: region.range.clone(),
                    peak,
                    activation: value,
                    tick: self.tick_count,
                });
            } else if !next && *active {
                events.push(FieldEvent::RegionQuiet {
                    name: region.name.clone(),
                    region: region.range.clone(),
                    activation: value,
                    tick: self.tick_count,
                });
            }
            *active = next;
        }

        for event in events {
            self.emit(event);
        }
    }

    /// Reset activation to rest, zero both inputs, and return to
    /// [`RunMode::Beginning`]. The active regime is kept.
    pub fn restart(&mut self) {
        self.state.reinitialize_activation(self.config.resting_level);
        self.state.reinitialize_input();
        self.mode = RunMode::Beginning;
        self.tick_count = 0;
        self.region_active.fill(false);
        tracing::info!(regime = %self.active, "field restarted");
        self.emit(FieldEvent::Restarted);
    }

    // =========================================================================
    // READING
    // =========================================================================

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn activation(&self) -> &FieldVector {
        self.state.activation()
    }

    pub fn external_input(&self) -> &FieldVector {
        self.state.external_input()
    }

    pub fn persistent_input(&self) -> &FieldVector {
        self.state.persistent_input()
    }

    pub fn active_regime(&self) -> &RegimeConfig {
        self.regimes.get(self.active)
    }

    /// Display name of the active regime.
    pub fn regime_label(&self) -> &'static str {
        self.active.label()
    }

    pub fn kernel(&self) -> &InteractionKernel {
        self.active_regime().kernel()
    }

    pub fn run_mode(&self) -> RunMode {
        self.mode
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Suprathreshold stretches of the current activation.
    pub fn peaks(&self, threshold: f64) -> Vec<Peak> {
        find_peaks(self.state.activation().as_slice(), threshold)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("mode", &self.mode)
            .field("tick_count", &self.tick_count)
            .field("regions", &self.regions)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
