use std::path::Path;

use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{MlpError, Result};
use crate::layers::dense::{back_propagate, feed_forward};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::activations::Activations;
use crate::network::topology::Topology;
use crate::network::weights_io;
use crate::optim::sgd::Sgd;

/// Standard deviation of the random initialiser: N(0, 0.01) in variance terms.
pub const INIT_STD_DEV: f64 = 0.1;

/// Parameter store: one weight matrix per transition and one delta vector
/// per non-input layer, all sized once from the [`Topology`].
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    weights: Vec<Matrix>,
    deltas: Vec<Vec<f64>>,
}

impl Network {
    /// Draws every weight independently from N(0, 0.01).
    pub fn with_random_weights<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Network {
        let weights = (0..topology.num_transitions())
            .map(|i| {
                let (rows, cols) = topology.weight_shape(i);
                Matrix::random_normal(rows, cols, INIT_STD_DEV, rng)
            })
            .collect();
        Network::assemble(topology, weights)
    }

    /// Builds a network from existing matrices, checking every shape.
    pub fn from_weights(topology: Topology, weights: Vec<Matrix>) -> Result<Network> {
        if weights.len() != topology.num_transitions() {
            return Err(MlpError::ShapeMismatch {
                expected: topology.num_transitions(),
                actual: weights.len(),
            });
        }
        for (i, m) in weights.iter().enumerate() {
            let (rows, cols) = topology.weight_shape(i);
            if m.rows != rows || m.cols != cols || m.len() != rows * cols {
                return Err(MlpError::ShapeMismatch {
                    expected: rows * cols,
                    actual: m.len(),
                });
            }
        }
        Ok(Network::assemble(topology, weights))
    }

    /// Reads a plain-text weight file laid out for `topology`.
    pub fn load_weights(topology: Topology, path: impl AsRef<Path>) -> Result<Network> {
        let weights = weights_io::load_weights(path, &topology)?;
        Network::from_weights(topology, weights)
    }

    pub fn save_weights(&self, path: impl AsRef<Path>) -> Result<()> {
        weights_io::save_weights(path, &self.weights)
    }

    fn assemble(topology: Topology, weights: Vec<Matrix>) -> Network {
        let deltas = topology.sizes()[1..].iter().map(|&n| vec![0.0; n]).collect();
        Network { topology, weights, deltas }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [Matrix] {
        &mut self.weights
    }

    /// Delta vector of non-input layer `layer` (1-based layer index).
    pub fn delta(&self, layer: usize) -> &[f64] {
        &self.deltas[layer - 1]
    }

    /// Propagates the input layer of `acts` through every transition.
    ///
    /// Hidden layers store `relu(sum)`; the output layer stores raw logits.
    /// Softmax is left to the caller.
    pub fn forward(&self, acts: &mut Activations) {
        let last = self.topology.num_transitions() - 1;
        for (i, weights) in self.weights.iter().enumerate() {
            let activation = if i == last {
                ActivationFunction::Identity
            } else {
                ActivationFunction::ReLU
            };
            let (source, destination) = acts.transition_mut(i);
            feed_forward(weights, source, destination, activation);
        }
    }

    /// One backward sweep from the output layer toward the input, updating
    /// the weights in place.
    ///
    /// `acts` must hold the forward activations with the softmax already
    /// applied to the output layer; `target` is the one-hot label.
    pub fn backward(&mut self, acts: &Activations, target: &[f64], optimizer: &Sgd) {
        let transitions = self.topology.num_transitions();
        CrossEntropyLoss::output_delta(acts.output(), target, &mut self.deltas[transitions - 1]);

        for l in (0..transitions).rev() {
            let (earlier, current) = self.deltas.split_at_mut(l);
            let previous = earlier.last_mut().map(|d| d.as_mut_slice());
            back_propagate(
                &mut self.weights[l],
                acts.layer(l),
                &current[0],
                previous,
                optimizer,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn scenario_network() -> Network {
        // L = [4, 3, 2]; every weight 0.1 except bias columns 0.0.
        let t = Topology::from_sizes(vec![4, 3, 2]).unwrap();
        let weights = (0..t.num_transitions())
            .map(|i| {
                let (rows, cols) = t.weight_shape(i);
                let mut m = Matrix::zeros(rows, cols);
                for j in 0..rows {
                    for k in 0..cols - 1 {
                        m.data[j * cols + k] = 0.1;
                    }
                }
                m
            })
            .collect();
        Network::from_weights(t, weights).unwrap()
    }

    #[test]
    fn random_weights_match_topology() {
        let t = Topology::from_sizes(vec![6, 4, 3]).unwrap();
        let net = Network::with_random_weights(t, &mut StdRng::seed_from_u64(1));
        assert_eq!(net.weights()[0].len(), 7 * 4);
        assert_eq!(net.weights()[1].len(), 5 * 3);
        assert_eq!(net.delta(1).len(), 4);
        assert_eq!(net.delta(2).len(), 3);
    }

    #[test]
    fn from_weights_rejects_bad_shapes() {
        let t = Topology::from_sizes(vec![2, 2]).unwrap();
        assert!(Network::from_weights(t.clone(), vec![]).is_err());
        assert!(Network::from_weights(t, vec![Matrix::zeros(2, 2)]).is_err());
    }

    #[test]
    fn forward_matches_hand_computation() {
        let net = scenario_network();
        let mut acts = Activations::new(net.topology());
        acts.load_input(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        acts.set_bias();
        net.forward(&mut acts);

        for &h in &acts.layer(1)[..3] {
            assert!((h - 0.4).abs() < 1e-12);
        }
        for &o in acts.output() {
            assert!((o - 0.12).abs() < 1e-12);
        }
    }

    #[test]
    fn forward_without_set_bias_uses_the_initial_half() {
        let t = Topology::from_sizes(vec![1, 1]).unwrap();
        let net = Network::from_weights(t, vec![Matrix::from_data(1, 2, vec![0.0, 2.0]).unwrap()]).unwrap();
        let mut acts = Activations::new(net.topology());
        acts.load_input(&[5.0]).unwrap();
        net.forward(&mut acts);
        assert_eq!(acts.output(), &[1.0]);
    }

    #[test]
    fn backward_seeds_output_delta() {
        let mut net = scenario_network();
        let mut acts = Activations::new(net.topology());
        acts.load_input(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        acts.set_bias();
        net.forward(&mut acts);
        crate::activation::softmax(acts.output_mut());

        net.backward(&acts, &[1.0, 0.0], &Sgd::new(0.0));
        let d = net.delta(2);
        assert!((d[0] - 0.125).abs() < 1e-4);
        assert!((d[1] + 0.125).abs() < 1e-4);
    }

    #[test]
    fn zero_learning_rate_leaves_weights_alone() {
        let mut net = scenario_network();
        let before = net.weights().to_vec();
        let mut acts = Activations::new(net.topology());
        acts.load_input(&[0.3, 0.1, 0.0, 2.0]).unwrap();
        acts.set_bias();
        net.forward(&mut acts);
        crate::activation::softmax(acts.output_mut());
        net.backward(&acts, &[0.0, 1.0], &Sgd::new(0.0));
        assert_eq!(net.weights(), before.as_slice());
    }
}
