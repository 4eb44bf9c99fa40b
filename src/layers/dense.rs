//! Kernels for one fully-connected transition `i -> i+1`.
//!
//! The weight matrix is flat row-major with `rows = L[i+1]` and
//! `cols = L[i] + 1` (the extra column multiplies the source bias unit).

use crate::activation::activation::{drelu, ActivationFunction};
use crate::math::matrix::Matrix;
use crate::optim::sgd::Sgd;

/// Writes `activation(W[j] · source)` into `destination[j]` for every
/// destination unit `j`. A trailing bias slot in `destination` is untouched.
pub fn feed_forward(
    weights: &Matrix,
    source: &[f64],
    destination: &mut [f64],
    activation: ActivationFunction,
) {
    debug_assert_eq!(source.len(), weights.cols);
    debug_assert!(destination.len() >= weights.rows);

    for (j, out) in destination.iter_mut().take(weights.rows).enumerate() {
        let sum: f64 = weights
            .row(j)
            .iter()
            .zip(source)
            .map(|(w, a)| w * a)
            .sum();
        *out = activation.function(sum);
    }
}

/// Backward sweep over one transition, updating `weights` in place.
///
/// For every source unit `j` (bias slot included):
/// - `tmp = Σ_k W[k*L + j] * delta[k]` with `L = cols - 1`
/// - if `previous_delta` is given and `j` is a neuron (not the bias slot),
///   `previous_delta[j] = drelu(source[j]) * tmp`
/// - then `W[k*L + j] += lr * source[j] * delta[k]` for every `k`.
///
/// The stride is `L`, not the forward pass's `L + 1`. Keep it that way:
/// trained weight files depend on which flat entry each update lands on.
pub fn back_propagate(
    weights: &mut Matrix,
    source: &[f64],
    delta: &[f64],
    mut previous_delta: Option<&mut [f64]>,
    optimizer: &Sgd,
) {
    let stride = weights.cols - 1;
    debug_assert_eq!(source.len(), weights.cols);
    debug_assert_eq!(delta.len(), weights.rows);

    let w = weights.as_mut_slice();
    for (j, &a) in source.iter().enumerate() {
        let tmp: f64 = delta
            .iter()
            .enumerate()
            .map(|(k, d)| w[k * stride + j] * d)
            .sum();

        if let Some(prev) = previous_delta.as_deref_mut() {
            if let Some(slot) = prev.get_mut(j) {
                *slot = drelu(a) * tmp;
            }
        }

        for (k, &d) in delta.iter().enumerate() {
            optimizer.step(&mut w[k * stride + j], a, d);
        }
    }
}
