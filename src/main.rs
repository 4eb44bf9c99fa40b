//! ferrite-mlp: train and/or evaluate a multi-layer perceptron described by
//! a JSON configuration file.
//!
//! Run with:
//!   cargo run --release -- -config configs/mnist.json

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ferrite_mlp::{
    run_inference, run_training_epoch, Dataset, MlpConfig, Network, TrainConfig, WeightSource,
};

#[derive(Parser)]
#[command(name = "ferrite-mlp")]
#[command(about = "Multi-layer perceptron classifier with online SGD training", long_about = None)]
struct Cli {
    /// MLP configuration file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Rewrites the single-dash `-config` flag (any case) to `--config`.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if s.eq_ignore_ascii_case("-config") => OsString::from("--config"),
            _ => arg,
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = MlpConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    let topology = config.topology()?;
    info!(layers = ?topology.sizes(), "topology built");

    let train_config = TrainConfig::from_config(&config);

    let mut network = match &config.weight_source {
        WeightSource::Pretrained { weight } => {
            info!(path = %weight.display(), "loading weights");
            Network::load_weights(topology, weight).context("failed to load weights")?
        }
        WeightSource::Train { .. } => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            info!(seed = ?config.seed, "initialising weights");
            Network::with_random_weights(topology, &mut rng)
        }
    };

    let n_features = network.topology().input_size();
    let n_classes = network.topology().output_size();

    let test_set = Dataset::read(&config.test_img, &config.test_label, config.test_set_size, n_features)
        .context("failed to read test set")?;
    test_set.check_labels(n_classes)?;

    if let WeightSource::Train { train_img, train_label } = &config.weight_source {
        let train_set = Dataset::read(train_img, train_label, config.train_set_size, n_features)
            .context("failed to read training set")?;
        train_set.check_labels(n_classes)?;

        for epoch in 1..=config.epochs {
            let stats = run_training_epoch(&mut network, &train_set, &train_config, epoch)?;
            info!(
                epoch = stats.epoch,
                samples = stats.samples,
                loss = stats.last_loss,
                elapsed_ms = stats.elapsed_ms,
                "epoch complete"
            );
        }

        if let Some(path) = &config.save_weight {
            network.save_weights(path).context("failed to save weights")?;
            info!(path = %path.display(), "weights saved");
        }
    } else if config.save_weight.is_some() {
        warn!("save_weight ignored: no training was run");
    }

    let report = run_inference(&network, &test_set, &train_config)?;
    info!(correct = report.correct, total = report.total, accuracy = report.accuracy, "inference complete");
    println!("{}", report.accuracy);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn single_dash_config_is_accepted_in_any_case() {
        for flag in ["-config", "-CONFIG", "--config", "-c"] {
            let cli = Cli::try_parse_from(normalize_args(args(&["ferrite-mlp", flag, "mlp.json"]))).unwrap();
            assert_eq!(cli.config, PathBuf::from("mlp.json"));
        }
    }

    #[test]
    fn unknown_option_is_rejected() {
        let parsed = Cli::try_parse_from(normalize_args(args(&["ferrite-mlp", "-config", "a.json", "-weight", "w"])));
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_config_is_rejected() {
        assert!(Cli::try_parse_from(args(&["ferrite-mlp"])).is_err());
    }
}
