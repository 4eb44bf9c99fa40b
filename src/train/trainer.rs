use std::time::Instant;

use tracing::{debug, info};

use crate::activation::activation::softmax;
use crate::data::idx::Dataset;
use crate::error::{MlpError, Result};
use crate::loss::cross_entropy::{one_hot_into, CrossEntropyLoss};
use crate::network::activations::Activations;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// One online-SGD pass over every sample of `dataset`.
///
/// Per sample: zero the neuron slots, load the input, set the bias slots to
/// 1.0, forward, softmax, rebuild the one-hot target, compute the loss, and
/// run the backward sweep. The loss is overwritten each sample; the returned
/// stats carry the last one.
pub fn run_training_epoch(
    network: &mut Network,
    dataset: &Dataset,
    config: &TrainConfig,
    epoch: usize,
) -> Result<EpochStats> {
    let t_start = Instant::now();
    let classes = network.topology().output_size();
    let mut acts = Activations::new(network.topology());
    let mut target = vec![0.0; classes];
    let mut loss = 0.0;

    for (i, (sample, label)) in dataset.iter().enumerate() {
        if label >= classes {
            return Err(MlpError::LabelOutOfRange { index: i, label, classes });
        }

        acts.clear();
        acts.load_input(sample)?;
        acts.set_bias();

        network.forward(&mut acts);
        softmax(acts.output_mut());

        one_hot_into(label, &mut target);
        loss = CrossEntropyLoss::loss(acts.output(), &target);

        network.backward(&acts, &target, &config.optimizer);

        if i % config.progress_every == 0 {
            info!(epoch, sample = i, loss, "training");
        }
    }

    let stats = EpochStats {
        epoch,
        samples: dataset.len(),
        last_loss: loss,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    };
    debug!(?stats, "epoch finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::topology::Topology;
    use rand::{rngs::StdRng, SeedableRng};

    fn toy_dataset() -> Dataset {
        // Two linearly separable classes in 2D.
        let features = vec![
            1.0, 0.0, //
            0.9, 0.1, //
            0.0, 1.0, //
            0.1, 0.9,
        ];
        Dataset::new(2, features, vec![0, 0, 1, 1]).unwrap()
    }

    #[test]
    fn epoch_visits_every_sample_and_changes_weights() {
        let t = Topology::from_sizes(vec![2, 4, 2]).unwrap();
        let mut net = Network::with_random_weights(t, &mut StdRng::seed_from_u64(3));
        let before = net.weights().to_vec();

        let stats = run_training_epoch(&mut net, &toy_dataset(), &TrainConfig::new(0.5), 1).unwrap();
        assert_eq!(stats.epoch, 1);
        assert_eq!(stats.samples, 4);
        assert!(stats.last_loss.is_finite() && stats.last_loss > 0.0);
        assert_ne!(net.weights(), before.as_slice());
    }

    #[test]
    fn out_of_range_label_is_an_error() {
        let t = Topology::from_sizes(vec![2, 2]).unwrap();
        let mut net = Network::with_random_weights(t, &mut StdRng::seed_from_u64(0));
        let ds = Dataset::new(2, vec![1.0, 1.0], vec![2]).unwrap();
        assert!(matches!(
            run_training_epoch(&mut net, &ds, &TrainConfig::new(0.1), 1),
            Err(MlpError::LabelOutOfRange { label: 2, .. })
        ));
    }

    #[test]
    fn input_width_mismatch_is_an_error() {
        let t = Topology::from_sizes(vec![3, 2]).unwrap();
        let mut net = Network::with_random_weights(t, &mut StdRng::seed_from_u64(0));
        assert!(matches!(
            run_training_epoch(&mut net, &toy_dataset(), &TrainConfig::new(0.1), 1),
            Err(MlpError::ShapeMismatch { expected: 3, actual: 2 })
        ));
    }
}
