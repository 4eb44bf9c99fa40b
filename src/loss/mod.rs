pub mod accuracy;
pub mod cross_entropy;

pub use accuracy::argmax;
pub use cross_entropy::{one_hot_into, CrossEntropyLoss};
