use crate::config::{MlpConfig, DEFAULT_PROGRESS_EVERY};
use crate::optim::sgd::Sgd;

/// Settings shared by the training and inference drivers.
///
/// - `optimizer`      — carries the fixed learning rate
/// - `progress_every` — an `info!` progress event is logged every this many
///                      samples (sample 0 included)
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub optimizer: Sgd,
    pub progress_every: usize,
}

impl TrainConfig {
    pub fn new(learning_rate: f64) -> Self {
        TrainConfig {
            optimizer: Sgd::new(learning_rate),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    pub fn from_config(config: &MlpConfig) -> Self {
        TrainConfig {
            optimizer: Sgd::new(config.learning_rate),
            progress_every: config.progress_every.max(1),
        }
    }
}
