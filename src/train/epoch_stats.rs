use serde::Serialize;

/// Summary of one `run_training_epoch` call.
#[derive(Debug, Clone, Serialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Samples visited in this epoch.
    pub samples: usize,
    /// Cross-entropy of the last sample. The loss is overwritten per sample,
    /// not averaged.
    pub last_loss: f64,
    /// Wall-clock duration of the epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of one `run_inference` pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceReport {
    pub correct: usize,
    pub total: usize,
    /// `correct / total`, or 0.0 for an empty set.
    pub accuracy: f64,
}

impl InferenceReport {
    pub fn new(correct: usize, total: usize) -> InferenceReport {
        let accuracy = if total == 0 { 0.0 } else { correct as f64 / total as f64 };
        InferenceReport { correct, total, accuracy }
    }
}
