//! Numeric primitives shared by kernels, stimuli and the integrator

/// Logistic output function `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sample an unnormalized Gaussian over `length` nodes.
///
/// Sample `i` is `amplitude * exp(-(i - center)^2 / (2 * variance))`. The
/// amplitude carries sign and strength directly; the area is not forced to 1.
/// `center` may fall between nodes.
pub fn gaussian(amplitude: f64, center: f64, variance: f64, length: usize) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let d = i as f64 - center;
            amplitude * (-(d * d) / (2.0 * variance)).exp()
        })
        .collect()
}
