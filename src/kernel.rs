//! Lateral interaction kernels
//!
//! A kernel is an odd-length weight sequence centered on the node being
//! updated. Weight `k` couples node `i` to node `i + k - half_width`.

use crate::error::FieldError;
use crate::math::gaussian;
use crate::regime::Regime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spatial coupling weights as a function of signed node distance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionKernel {
    weights: Vec<f64>,
}

impl InteractionKernel {
    /// Wrap custom weights. The length must be odd so a center exists.
    pub fn new(weights: Vec<f64>) -> Result<Self, FieldError> {
        if weights.len() % 2 == 0 {
            return Err(FieldError::EvenKernelLength(weights.len()));
        }
        Ok(Self { weights })
    }

    /// Single Gaussian lobe centered in a kernel of `size` weights.
    pub fn gaussian(amplitude: f64, variance: f64, size: usize) -> Self {
        assert!(size % 2 == 1, "kernel size {} must be odd", size);
        Self {
            weights: gaussian(amplitude, (size / 2) as f64, variance, size),
        }
    }

    /// Element-wise sum of two kernels (e.g. excitation plus inhibition).
    ///
    /// # Panics
    /// Panics if the kernels differ in length.
    pub fn superpose(&self, other: &InteractionKernel) -> Self {
        assert_eq!(
            self.len(),
            other.len(),
            "cannot superpose kernels of different length"
        );
        Self {
            weights: self
                .weights
                .iter()
                .zip(other.weights.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Offset of the center weight, `floor(len / 2)`.
    #[inline]
    pub fn half_width(&self) -> usize {
        self.weights.len() / 2
    }

    /// Self-coupling weight.
    pub fn center_weight(&self) -> f64 {
        self.weights[self.half_width()]
    }
}

/// Build the kernel a regime runs with.
///
/// - selective: one excitatory lobe
/// - multi-peak: narrow excitation minus broad, weaker inhibition
/// - working memory: strong narrow excitation minus broad inhibition
pub fn build_kernel(regime: Regime, size: usize) -> InteractionKernel {
    match regime {
        Regime::Selective => InteractionKernel::gaussian(40.0, 3.0, size),
        Regime::MultiPeak => InteractionKernel::gaussian(20.0, 6.0, size)
            .superpose(&InteractionKernel::gaussian(-10.0, 60.0, size)),
        Regime::WorkingMemory => InteractionKernel::gaussian(60.0, 6.0, size)
            .superpose(&InteractionKernel::gaussian(-20.0, 60.0, size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_even_length() {
        assert_eq!(
            InteractionKernel::new(vec![1.0, 1.0]),
            Err(FieldError::EvenKernelLength(2))
        );
        assert_eq!(
            InteractionKernel::new(Vec::new()),
            Err(FieldError::EvenKernelLength(0))
        );
        let k = InteractionKernel::new(vec![1.0, 2.0, 1.0]).unwrap();
        assert_eq!(k.half_width(), 1);
        assert_eq!(k.center_weight(), 2.0);
    }

    #[test]
    fn test_selective_kernel() {
        let k = build_kernel(Regime::Selective, 15);
        assert_eq!(k.len(), 15);
        assert_eq!(k.half_width(), 7);
        assert!((k.center_weight() - 40.0).abs() < 1e-12);
        assert!(k.weights().iter().all(|&w| w > 0.0));
        // Symmetric around the center
        for d in 1..=7 {
            assert!((k.weights()[7 - d] - k.weights()[7 + d]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mexican_hat_kernels() {
        let multi = build_kernel(Regime::MultiPeak, 15);
        assert!((multi.center_weight() - 10.0).abs() < 1e-12);
        assert!(multi.weights()[0] < 0.0);

        let memory = build_kernel(Regime::WorkingMemory, 15);
        assert!((memory.center_weight() - 40.0).abs() < 1e-12);
        assert!(memory.weights()[0] < 0.0);
        assert!(memory.weights()[14] < 0.0);
    }

    #[test]
    #[should_panic(expected = "different length")]
    fn test_superpose_length_mismatch_panics() {
        let a = InteractionKernel::gaussian(1.0, 1.0, 5);
        let b = InteractionKernel::gaussian(1.0, 1.0, 7);
        let _ = a.superpose(&b);
    }
}
