/// Categorical cross-entropy over a softmax output, plus the output-layer
/// error signal used to seed the backward sweep.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// L = -Σ target[k] * ln(predicted[k])
    ///
    /// No epsilon inside the log: `predicted` comes out of [`softmax`], which
    /// never yields an exact zero for finite logits within range.
    ///
    /// [`softmax`]: crate::activation::softmax
    pub fn loss(predicted: &[f64], target: &[f64]) -> f64 {
        -predicted
            .iter()
            .zip(target)
            .filter(|(_, t)| **t != 0.0)
            .map(|(p, t)| t * p.ln())
            .sum::<f64>()
    }

    /// Output delta: `y * (1 - y) * (target - y)`.
    ///
    /// This is the sigmoid/squared-error form, not the `y - target` that
    /// softmax + cross-entropy reduces to. Trained weights depend on it.
    pub fn output_delta(predicted: &[f64], target: &[f64], delta: &mut [f64]) {
        for ((d, &y), &t) in delta.iter_mut().zip(predicted).zip(target) {
            *d = y * (1.0 - y) * (t - y);
        }
    }
}

/// Rebuilds `target` as the one-hot encoding of `label`.
pub fn one_hot_into(label: usize, target: &mut [f64]) {
    for (k, t) in target.iter_mut().enumerate() {
        *t = if k == label { 1.0 } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_picks_the_labelled_probability() {
        let loss = CrossEntropyLoss::loss(&[0.25, 0.75], &[0.0, 1.0]);
        assert!((loss - -(0.75f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn zero_target_entries_do_not_touch_the_log() {
        // ln(0) * 0 would be NaN.
        let loss = CrossEntropyLoss::loss(&[0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(loss, 0.0);
    }

    #[test]
    fn output_delta_uses_the_sigmoid_form() {
        let mut delta = [0.0; 2];
        CrossEntropyLoss::output_delta(&[0.5, 0.5], &[1.0, 0.0], &mut delta);
        assert_eq!(delta, [0.125, -0.125]);
    }

    #[test]
    fn one_hot_overwrites_previous_target() {
        let mut t = vec![1.0, 1.0, 1.0];
        one_hot_into(2, &mut t);
        assert_eq!(t, vec![0.0, 0.0, 1.0]);
        one_hot_into(0, &mut t);
        assert_eq!(t, vec![1.0, 0.0, 0.0]);
    }
}
