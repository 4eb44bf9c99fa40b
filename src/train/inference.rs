use tracing::info;

use crate::activation::activation::softmax;
use crate::data::idx::Dataset;
use crate::error::Result;
use crate::loss::accuracy::argmax;
use crate::network::activations::Activations;
use crate::network::network::Network;
use crate::train::epoch_stats::InferenceReport;
use crate::train::train_config::TrainConfig;

/// Classifies every sample of `dataset` and counts argmax hits.
pub fn run_inference(network: &Network, dataset: &Dataset, config: &TrainConfig) -> Result<InferenceReport> {
    let mut acts = Activations::new(network.topology());
    let mut correct = 0usize;

    for (i, (sample, label)) in dataset.iter().enumerate() {
        if i % config.progress_every == 0 {
            info!(sample = i, "inference");
        }

        acts.load_input(sample)?;
        acts.set_bias();
        network.forward(&mut acts);
        softmax(acts.output_mut());

        if argmax(acts.output()) == label {
            correct += 1;
        }
    }

    Ok(InferenceReport::new(correct, dataset.len()))
}
