/// Plain per-sample gradient step with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one additive update: `w += lr * activation * delta`.
    ///
    /// Deltas are signed as `(target - prediction)`, so adding moves the
    /// weight downhill on the loss.
    #[inline]
    pub fn step(&self, weight: &mut f64, activation: f64, delta: f64) {
        *weight += self.learning_rate * activation * delta;
    }
}
