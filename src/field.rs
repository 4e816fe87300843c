//! Field State - activation plus the two input channels

use crate::error::FieldError;
use crate::vector::FieldVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The mutable state of a neural field.
///
/// Three vectors of identical length:
/// - activation `u`, integrated every step
/// - external input, the transient stimulus replaced on every update
/// - persistent input, accumulated on every commit until restart
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldState {
    activation: FieldVector,
    external_input: FieldVector,
    persistent_input: FieldVector,
}

impl FieldState {
    /// Create a field of `dims` nodes at `resting_level` with no input.
    pub fn new(dims: usize, resting_level: f64) -> Self {
        Self {
            activation: FieldVector::filled(dims, resting_level),
            external_input: FieldVector::new(dims),
            persistent_input: FieldVector::new(dims),
        }
    }

    /// Create a field from an explicit activation vector.
    pub fn from_activation(activation: Vec<f64>) -> Self {
        let dims = activation.len();
        Self {
            activation: FieldVector::from_vec(activation),
            external_input: FieldVector::new(dims),
            persistent_input: FieldVector::new(dims),
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Put every node back at the resting level.
    pub fn reinitialize_activation(&mut self, resting_level: f64) {
        self.activation.fill(resting_level);
    }

    /// Zero both the transient and the persistent input.
    pub fn reinitialize_input(&mut self) {
        self.external_input.fill(0.0);
        self.persistent_input.fill(0.0);
    }

    // =========================================================================
    // WRITING
    // =========================================================================

    /// Replace the transient input wholesale.
    ///
    /// A vector of the wrong length is rejected and the state is left as is.
    pub fn set_external_input(&mut self, values: &[f64]) -> Result<(), FieldError> {
        if values.len() != self.dims() {
            return Err(FieldError::DimensionMismatch {
                expected: self.dims(),
                actual: values.len(),
            });
        }
        self.external_input.copy_from(values);
        Ok(())
    }

    /// Remove the transient input without touching the persistent baseline.
    pub fn clear_external_input(&mut self) {
        self.external_input.fill(0.0);
    }

    /// Freeze the current transient input into the persistent baseline.
    ///
    /// One-way: there is no way to subtract from the baseline short of
    /// [`reinitialize_input`](Self::reinitialize_input).
    pub fn commit_input(&mut self) {
        self.persistent_input.add(&self.external_input);
    }

    pub(crate) fn external_input_mut(&mut self) -> &mut FieldVector {
        &mut self.external_input
    }

    /// Split borrow used by the integrator: activation is written, inputs read.
    pub(crate) fn integration_parts(&mut self) -> (&mut [f64], &[f64], &[f64]) {
        (
            self.activation.as_mut_slice(),
            self.external_input.as_slice(),
            self.persistent_input.as_slice(),
        )
    }

    // =========================================================================
    // READING
    // =========================================================================

    pub fn activation(&self) -> &FieldVector {
        &self.activation
    }

    pub fn external_input(&self) -> &FieldVector {
        &self.external_input
    }

    pub fn persistent_input(&self) -> &FieldVector {
        &self.persistent_input
    }

    /// Persistent plus transient input, the total drive each node receives.
    pub fn total_input(&self) -> FieldVector {
        self.persistent_input.sum_with(&self.external_input)
    }

    /// Number of nodes.
    pub fn dims(&self) -> usize {
        self.activation.dims()
    }
}
