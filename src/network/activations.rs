use crate::error::{MlpError, Result};
use crate::network::topology::Topology;

/// Value written into every bias slot when the buffers are first allocated.
/// The drivers overwrite it with [`BIAS_VALUE`] before each forward pass.
pub const INITIAL_BIAS_VALUE: f64 = 0.5;

/// Value held by the bias unit during a forward pass.
pub const BIAS_VALUE: f64 = 1.0;

/// Per-layer activation vectors for one sample.
///
/// Owned by the driver loop and overwritten every sample. Non-output layers
/// carry a trailing bias slot; the output layer does not.
#[derive(Debug, Clone)]
pub struct Activations {
    layers: Vec<Vec<f64>>,
}

impl Activations {
    pub fn new(topology: &Topology) -> Activations {
        let mut layers: Vec<Vec<f64>> = (0..topology.num_layers())
            .map(|i| vec![0.0; topology.activation_len(i)])
            .collect();
        for (i, layer) in layers.iter_mut().enumerate().take(topology.num_transitions()) {
            layer[topology.layer_size(i)] = INITIAL_BIAS_VALUE;
        }
        Activations { layers }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> &[f64] {
        &self.layers[index]
    }

    pub fn output(&self) -> &[f64] {
        &self.layers[self.layers.len() - 1]
    }

    pub fn output_mut(&mut self) -> &mut [f64] {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Copies a sample into the input layer, leaving its bias slot alone.
    pub fn load_input(&mut self, sample: &[f64]) -> Result<()> {
        let input = &mut self.layers[0];
        let width = input.len() - 1;
        if sample.len() != width {
            return Err(MlpError::ShapeMismatch { expected: width, actual: sample.len() });
        }
        input[..width].copy_from_slice(sample);
        Ok(())
    }

    /// Zeroes every neuron slot; bias slots keep their value.
    pub fn clear(&mut self) {
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let neurons = if i == last { layer.len() } else { layer.len() - 1 };
            layer[..neurons].fill(0.0);
        }
    }

    /// Sets every non-output layer's bias slot to [`BIAS_VALUE`].
    pub fn set_bias(&mut self) {
        let last = self.layers.len() - 1;
        for layer in &mut self.layers[..last] {
            if let Some(bias) = layer.last_mut() {
                *bias = BIAS_VALUE;
            }
        }
    }

    /// Source layer `i` (shared) and destination layer `i + 1` (mutable).
    pub(crate) fn transition_mut(&mut self, i: usize) -> (&[f64], &mut [f64]) {
        let (before, after) = self.layers.split_at_mut(i + 1);
        (&before[i][..], &mut after[0][..])
    }
}
