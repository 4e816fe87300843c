//! Field Vector - one real value per spatial node
//!
//! Activation, transient input and persistent input all share this type so
//! their lengths can be checked against each other in one place.

use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Real-valued vector over the nodes of a field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldVector {
    values: Vec<f64>,
}

impl FieldVector {
    /// Create a new zero-initialized vector.
    pub fn new(dims: usize) -> Self {
        Self::filled(dims, 0.0)
    }

    /// Create a vector with every node set to `value`.
    pub fn filled(dims: usize, value: f64) -> Self {
        Self {
            values: vec![value; dims],
        }
    }

    /// Wrap existing values.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Get dimensions.
    #[inline]
    pub fn dims(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Set every node to `value`.
    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    /// Overwrite from a slice of the same length.
    pub fn copy_from(&mut self, values: &[f64]) {
        assert_eq!(self.dims(), values.len(), "field vector length mismatch");
        self.values.copy_from_slice(values);
    }

    /// Element-wise add another vector.
    pub fn add(&mut self, other: &FieldVector) {
        assert_eq!(self.dims(), other.dims(), "field vector length mismatch");
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
    }

    /// Element-wise sum into a new vector.
    pub fn sum_with(&self, other: &FieldVector) -> FieldVector {
        let mut result = self.clone();
        result.add(other);
        result
    }

    /// Check if all values are zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

impl Index<usize> for FieldVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.values[idx]
    }
}

/// Largest value in `values` and its index. Ties go to the first node.
pub(crate) fn max_node(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let v = FieldVector::new(120);
        assert!(v.is_zero());
        assert_eq!(v.dims(), 120);
    }

    #[test]
    fn test_add_accumulates() {
        let mut v = FieldVector::from_vec(vec![1.0, 2.0, 3.0]);
        v.add(&FieldVector::from_vec(vec![0.5, -2.0, 1.0]));
        assert_eq!(v.as_slice(), &[1.5, 0.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_add_rejects_mismatch() {
        let mut v = FieldVector::new(3);
        v.add(&FieldVector::new(4));
    }

    #[test]
    fn test_max_node_prefers_first() {
        assert_eq!(max_node(&[-3.0, 7.0, 7.0, 1.0]), Some((1, 7.0)));
        assert_eq!(max_node(&[-60.0, -50.0]), Some((1, -50.0)));
        assert_eq!(max_node(&[]), None);
    }

    #[test]
    fn test_fill() {
        let mut v = FieldVector::new(4);
        v.fill(-50.0);
        assert!(v.iter().all(|&x| x == -50.0));
        assert_eq!(v[3], -50.0);
    }
}
