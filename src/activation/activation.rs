/// Fixed guard added to the softmax denominator so it can never be zero.
pub const SOFTMAX_EPSILON: f64 = 0.0001;

/// Element-wise activation applied when a dense transition stores its sums.
///
/// Hidden layers use `ReLU`; the output layer stores raw logits (`Identity`)
/// and the caller applies [`softmax`] to the whole vector afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    ReLU,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => relu(x),
            ActivationFunction::Identity => x,
        }
    }

    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => drelu(x),
            ActivationFunction::Identity => 1.0,
        }
    }
}

pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// Derivative of ReLU. The non-differentiable point `x == 0` maps to `0.0`.
pub fn drelu(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

/// In-place numerically stabilised softmax:
///   y_i = exp(v_i - max(v)) / (SOFTMAX_EPSILON + Σ exp(v_j - max(v)))
///
/// Because of the epsilon the outputs sum to slightly less than 1.
pub fn softmax(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut sum = SOFTMAX_EPSILON;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}
