pub mod activations;
pub mod network;
pub mod topology;
pub mod weights_io;

pub use activations::Activations;
pub use network::Network;
pub use topology::Topology;
