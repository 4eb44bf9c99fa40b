pub mod activation;

pub use activation::{drelu, relu, softmax, ActivationFunction, SOFTMAX_EPSILON};
