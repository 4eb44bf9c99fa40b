pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::{drelu, relu, softmax, ActivationFunction};
pub use network::{Activations, Network, Topology};
pub use loss::cross_entropy::CrossEntropyLoss;
pub use optim::sgd::Sgd;
pub use train::{run_inference, run_training_epoch, EpochStats, InferenceReport, TrainConfig};
pub use data::idx::Dataset;
pub use config::{MlpConfig, WeightSource};
pub use error::{MlpError, Result};
