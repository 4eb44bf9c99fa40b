use crate::error::{MlpError, Result};

/// Ordered per-layer neuron counts `L[0..n]`, input first, output last.
///
/// Every other buffer in the crate is sized from this: activation vectors
/// carry one trailing bias slot on every non-output layer, weight matrix `i`
/// holds `(L[i] + 1) * L[i+1]` entries, and each non-input layer gets a delta
/// vector of `L[i]` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    /// Builds the topology from the configured image dimensions (which must
    /// have rank exactly 2 and are multiplied into the input width), the
    /// hidden-layer widths, and the number of output classes.
    pub fn new(image_size: &[usize], hidden: &[usize], output: usize) -> Result<Topology> {
        if image_size.len() != 2 {
            return Err(MlpError::InvalidSetting {
                key: "image_size",
                message: format!("must be defined as [width, length], got {} values", image_size.len()),
            });
        }
        let input = image_size[0]
            .checked_mul(image_size[1])
            .ok_or_else(|| MlpError::InvalidSetting {
                key: "image_size",
                message: format!("{} * {} overflows", image_size[0], image_size[1]),
            })?;

        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(input);
        sizes.extend_from_slice(hidden);
        sizes.push(output);
        Topology::from_sizes(sizes)
    }

    /// Builds a topology directly from `L[0..n]`.
    pub fn from_sizes(sizes: Vec<usize>) -> Result<Topology> {
        if sizes.len() < 2 {
            return Err(MlpError::InvalidSetting {
                key: "topology",
                message: format!("needs at least an input and an output layer, got {} layers", sizes.len()),
            });
        }
        if let Some(i) = sizes.iter().position(|&s| s == 0) {
            return Err(MlpError::InvalidSetting {
                key: "topology",
                message: format!("layer {i} has zero neurons"),
            });
        }
        Ok(Topology { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    /// Number of weight matrices (adjacent layer pairs).
    pub fn num_transitions(&self) -> usize {
        self.sizes.len() - 1
    }

    pub fn output_index(&self) -> usize {
        self.sizes.len() - 1
    }

    pub fn layer_size(&self, layer: usize) -> usize {
        self.sizes[layer]
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.output_index()]
    }

    /// Length of the activation vector for `layer`, bias slot included.
    pub fn activation_len(&self, layer: usize) -> usize {
        if layer == self.output_index() {
            self.sizes[layer]
        } else {
            self.sizes[layer] + 1
        }
    }

    /// `(rows, cols)` of weight matrix `transition`: `(L[i+1], L[i] + 1)`.
    pub fn weight_shape(&self, transition: usize) -> (usize, usize) {
        (self.sizes[transition + 1], self.sizes[transition] + 1)
    }

    pub fn weight_count(&self, transition: usize) -> usize {
        let (rows, cols) = self.weight_shape(transition);
        rows * cols
    }

    pub fn total_weights(&self) -> usize {
        (0..self.num_transitions()).map(|i| self.weight_count(i)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_input_hidden_output() {
        let t = Topology::new(&[28, 28], &[100, 50], 10).unwrap();
        assert_eq!(t.sizes(), &[784, 100, 50, 10]);
        assert_eq!(t.num_layers(), 4);
        assert_eq!(t.num_transitions(), 3);
        assert_eq!(t.input_size(), 784);
        assert_eq!(t.output_size(), 10);
    }

    #[test]
    fn no_hidden_layers_is_valid() {
        let t = Topology::new(&[2, 2], &[], 3).unwrap();
        assert_eq!(t.sizes(), &[4, 3]);
    }

    #[test]
    fn image_size_must_have_rank_two() {
        assert!(matches!(
            Topology::new(&[784], &[10], 10),
            Err(MlpError::InvalidSetting { key: "image_size", .. })
        ));
        assert!(Topology::new(&[2, 2, 2], &[10], 10).is_err());
    }

    #[test]
    fn zero_sized_layers_are_rejected() {
        assert!(Topology::new(&[2, 2], &[0], 3).is_err());
        assert!(Topology::new(&[2, 2], &[4], 0).is_err());
        assert!(Topology::from_sizes(vec![5]).is_err());
    }

    #[test]
    fn buffer_sizes_follow_the_bias_convention() {
        let t = Topology::from_sizes(vec![4, 3, 2]).unwrap();
        assert_eq!(t.activation_len(0), 5);
        assert_eq!(t.activation_len(1), 4);
        assert_eq!(t.activation_len(2), 2);
        assert_eq!(t.weight_shape(0), (3, 5));
        assert_eq!(t.weight_shape(1), (2, 4));
        assert_eq!(t.total_weights(), 15 + 8);
    }
}
