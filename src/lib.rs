//! Neural Field - one-dimensional Amari dynamics
//!
//! A field of activation values `u(x, t)` over N nodes, driven by input and
//! shaped by lateral interaction:
//!
//! ```text
//! tau du/dt = -u + h + s(x) + p(x) + (w * f(u))(x) + g sum f(u) + noise
//! ```
//!
//! - `h` resting level, `s` transient input, `p` committed (persistent) input
//! - `w` interaction kernel, `f` sigmoid output function
//! - `g` global inhibition strength
//!
//! # Regimes
//!
//! Three calibrated kernel/inhibition pairs produce qualitatively different
//! behavior from the same equation:
//!
//! - **selective**: strong global inhibition, one peak wins
//! - **multi_peak**: local excitation with surround inhibition, peaks coexist
//! - **working_memory**: strong local excitation, peaks outlive their input
//!
//! # Architecture
//!
//! 1. **FieldState** - activation plus transient and persistent input
//! 2. **FieldIntegrator** - stochastic Euler step with simultaneous update
//! 3. **RegimeLibrary** - immutable kernel + inhibition pairs selected by name
//! 4. **Simulation** - the context a UI drives: input, commit, regime, restart
//! 5. **Observers** - threshold crossings are pushed, not polled
//!
//! # Example: a peak that outlives its input
//!
//! ```rust
//! use neural_field::{FieldConfig, Simulation};
//!
//! let config = FieldConfig::default().with_seed(7).with_noise_strength(0.0);
//! let mut sim = Simulation::new(config).unwrap();
//! sim.select_regime("working_memory").unwrap();
//!
//! // Hold a stimulus over node 60 until a peak forms
//! sim.present_stimulus(60.0, 80.0);
//! sim.tick_n(200);
//! assert_eq!(sim.peaks(0.0).len(), 1);
//!
//! // Remove it: the peak sustains itself
//! sim.clear_external_input();
//! sim.tick_n(200);
//! assert!(sim.activation()[60] > 0.0);
//! ```

mod config;
mod error;
mod field;
mod integrator;
mod kernel;
mod math;
mod observer;
mod regime;
mod simulation;
mod vector;

pub use config::FieldConfig;
pub use error::FieldError;
pub use field::FieldState;
pub use integrator::{lateral_interaction, FieldIntegrator};
pub use kernel::{build_kernel, InteractionKernel};
pub use math::{gaussian, sigmoid};
pub use observer::{
    find_peaks, ChannelObserver, FieldEvent, FieldObserver, FnObserver, MonitoredRegion, Peak,
    DEFAULT_HYSTERESIS_MARGIN,
};
pub use regime::{Regime, RegimeConfig, RegimeLibrary};
pub use simulation::{RunMode, Simulation, OUTPUT_THRESHOLD, STIMULUS_VARIANCE};
pub use vector::FieldVector;
