pub mod epoch_stats;
pub mod inference;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, InferenceReport};
pub use inference::run_inference;
pub use train_config::TrainConfig;
pub use trainer::run_training_epoch;
