//! Observer pattern for neural fields - pub/sub instead of polling
//!
//! After every tick the simulation checks its monitored regions and notifies
//! observers when a region's peak activation crosses a threshold. Discrete
//! control events (commit, regime switch, restart) are published too.
//!
//! ## Hysteresis
//!
//! Activation hovers around the output threshold while a peak forms or
//! decays, and noise makes it chatter. Two thresholds control transitions:
//!
//! - **on_threshold** (higher): peak activation must exceed this to become active
//! - **off_threshold** (lower): peak activation must drop below this to become quiet
//!
//! Between the thresholds the previous state is kept.

use std::ops::Range;

use crate::regime::Regime;
use crate::vector::max_node;

/// Event emitted by a simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldEvent {
    /// A region's peak activation crossed on_threshold from below
    RegionActive {
        name: String,
        region: Range<usize>,
        /// Node holding the maximum activation
        peak: usize,
        activation: f64,
        tick: u64,
    },
    /// A region's peak activation dropped below off_threshold
    RegionQuiet {
        name: String,
        region: Range<usize>,
        activation: f64,
        tick: u64,
    },
    /// The transient input was frozen into the persistent baseline
    InputCommitted {
        /// True for the first commit since start or restart
        first: bool,
    },
    /// The active regime changed
    RegimeSelected { regime: Regime },
    /// Activation and inputs were reset
    Restarted,
}

/// Observer that receives field events
pub trait FieldObserver: Send + Sync {
    fn on_event(&self, event: FieldEvent);
}

/// Function-based observer for simple cases
pub struct FnObserver<F: Fn(FieldEvent) + Send + Sync>(pub F);

impl<F: Fn(FieldEvent) + Send + Sync> FieldObserver for FnObserver<F> {
    fn on_event(&self, event: FieldEvent) {
        (self.0)(event);
    }
}

/// Channel-based observer - sends events to a channel
pub struct ChannelObserver {
    sender: std::sync::mpsc::Sender<FieldEvent>,
}

impl ChannelObserver {
    pub fn new(sender: std::sync::mpsc::Sender<FieldEvent>) -> Self {
        Self { sender }
    }
}

impl FieldObserver for ChannelObserver {
    fn on_event(&self, event: FieldEvent) {
        // A dropped receiver just means nobody is listening anymore
        let _ = self.sender.send(event);
    }
}

/// Default distance between on and off thresholds, in activation units.
pub const DEFAULT_HYSTERESIS_MARGIN: f64 = 1.0;

/// A node range watched for suprathreshold activation.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitoredRegion {
    /// Name for identification
    pub name: String,
    /// Node range
    pub range: Range<usize>,
    /// Activation to exceed to become active (higher threshold)
    pub on_threshold: f64,
    /// Activation to fall below to become quiet (lower threshold)
    pub off_threshold: f64,
}

impl MonitoredRegion {
    /// Monitored region whose off_threshold sits
    /// [`DEFAULT_HYSTERESIS_MARGIN`] below `threshold`.
    pub fn new(name: impl Into<String>, range: Range<usize>, threshold: f64) -> Self {
        Self {
            name: name.into(),
            range,
            on_threshold: threshold,
            off_threshold: threshold - DEFAULT_HYSTERESIS_MARGIN,
        }
    }

    /// Monitored region with explicit thresholds.
    ///
    /// # Panics
    /// Debug-asserts that off_threshold <= on_threshold
    pub fn with_hysteresis(
        name: impl Into<String>,
        range: Range<usize>,
        on_threshold: f64,
        off_threshold: f64,
    ) -> Self {
        debug_assert!(
            off_threshold <= on_threshold,
            "off_threshold ({}) must be <= on_threshold ({})",
            off_threshold,
            on_threshold
        );
        Self {
            name: name.into(),
            range,
            on_threshold,
            off_threshold,
        }
    }

    /// Maximum activation inside the region (clipped to the field) and its node.
    pub fn peak(&self, activation: &[f64]) -> Option<(usize, f64)> {
        let end = self.range.end.min(activation.len());
        let start = self.range.start.min(end);
        max_node(&activation[start..end]).map(|(i, v)| (start + i, v))
    }

    /// Next active state given the previous one and the current peak value.
    pub fn next_state(&self, was_active: bool, peak: f64) -> bool {
        if was_active {
            peak >= self.off_threshold
        } else {
            peak > self.on_threshold
        }
    }
}

/// A contiguous suprathreshold stretch of the field, reported by its maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Node holding the maximum activation
    pub index: usize,
    pub activation: f64,
    /// Number of suprathreshold nodes in the stretch
    pub width: usize,
}

/// Find every contiguous run of nodes above `threshold`.
pub fn find_peaks(activation: &[f64], threshold: f64) -> Vec<Peak> {
    let mut peaks = Vec::new();
    let mut current: Option<Peak> = None;

    for (i, &u) in activation.iter().enumerate() {
        if u > threshold {
            let peak = current.get_or_insert(Peak {
                index: i,
                activation: u,
                width: 0,
            });
            peak.width += 1;
            if u > peak.activation {
                peak.index = i;
                peak.activation = u;
            }
        } else if let Some(peak) = current.take() {
            peaks.push(peak);
        }
    }
    peaks.extend(current);
    peaks
}
