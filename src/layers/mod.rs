pub mod dense;

pub use dense::{back_propagate, feed_forward};
