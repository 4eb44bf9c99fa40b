//! JSON run configuration.
//!
//! ```json
//! {
//!   "test_img": "data/t10k-images-idx3-ubyte",
//!   "test_label": "data/t10k-labels-idx1-ubyte",
//!   "train_img": "data/train-images-idx3-ubyte",
//!   "train_label": "data/train-labels-idx1-ubyte",
//!   "num_neurons_in_hidden_layer": [128],
//!   "image_size": [28, 28],
//!   "num_neurons_in_output_layer": 10,
//!   "test_set_size": 10000,
//!   "train_set_size": 60000,
//!   "learning_rate": 0.01
//! }
//! ```
//!
//! Either `weight` (a pre-trained weight file) or both `train_img` and
//! `train_label` must be given. When both are present `weight` wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{MlpError, Result};
use crate::network::topology::Topology;

pub const DEFAULT_EPOCHS: usize = 1;
pub const DEFAULT_PROGRESS_EVERY: usize = 1000;

/// Where the initial weights come from.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSource {
    /// Load a plain-text weight file; no training.
    Pretrained { weight: PathBuf },
    /// Random initialisation followed by training on these files.
    Train { train_img: PathBuf, train_label: PathBuf },
}

/// Validated configuration. Every required key was present and well typed.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpConfig {
    pub test_img: PathBuf,
    pub test_label: PathBuf,
    pub weight_source: WeightSource,
    pub num_neurons_in_hidden_layer: Vec<usize>,
    pub image_size: Vec<usize>,
    pub num_neurons_in_output_layer: usize,
    pub test_set_size: usize,
    pub train_set_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    pub seed: Option<u64>,
    pub save_weight: Option<PathBuf>,
    pub progress_every: usize,
}

/// On-disk shape; everything optional so absence is reported by key name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    test_img: Option<PathBuf>,
    test_label: Option<PathBuf>,
    train_img: Option<PathBuf>,
    train_label: Option<PathBuf>,
    weight: Option<PathBuf>,
    num_neurons_in_hidden_layer: Option<Vec<usize>>,
    image_size: Option<Vec<usize>>,
    num_neurons_in_output_layer: Option<usize>,
    test_set_size: Option<usize>,
    train_set_size: Option<usize>,
    learning_rate: Option<f64>,
    epochs: Option<usize>,
    seed: Option<u64>,
    save_weight: Option<PathBuf>,
    progress_every: Option<usize>,
}

fn required<T>(value: Option<T>, key: &'static str) -> Result<T> {
    value.ok_or(MlpError::MissingSetting { key })
}

fn positive(value: usize, key: &'static str) -> Result<usize> {
    if value == 0 {
        return Err(MlpError::InvalidSetting {
            key,
            message: "must be a positive integer".to_owned(),
        });
    }
    Ok(value)
}

impl MlpConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<MlpConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MlpError::io(path, e))?;
        MlpConfig::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<MlpConfig> {
        let raw: RawConfig = serde_json::from_str(text)?;
        MlpConfig::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<MlpConfig> {
        let test_img = required(raw.test_img, "test_img")?;
        let test_label = required(raw.test_label, "test_label")?;

        let weight_source = match raw.weight {
            Some(weight) => {
                if raw.train_img.is_some() || raw.train_label.is_some() {
                    warn!("train_img and train_label will be ignored");
                }
                WeightSource::Pretrained { weight }
            }
            None => WeightSource::Train {
                train_img: required(raw.train_img, "train_img")?,
                train_label: required(raw.train_label, "train_label")?,
            },
        };

        let num_neurons_in_hidden_layer =
            required(raw.num_neurons_in_hidden_layer, "num_neurons_in_hidden_layer")?;
        if num_neurons_in_hidden_layer.contains(&0) {
            return Err(MlpError::InvalidSetting {
                key: "num_neurons_in_hidden_layer",
                message: "every hidden layer needs at least one neuron".to_owned(),
            });
        }

        let image_size = required(raw.image_size, "image_size")?;
        if image_size.len() != 2 || image_size.contains(&0) {
            return Err(MlpError::InvalidSetting {
                key: "image_size",
                message: format!("must be defined as [width, length] of positive integers, got {image_size:?}"),
            });
        }

        let num_neurons_in_output_layer = positive(
            required(raw.num_neurons_in_output_layer, "num_neurons_in_output_layer")?,
            "num_neurons_in_output_layer",
        )?;
        let test_set_size = positive(required(raw.test_set_size, "test_set_size")?, "test_set_size")?;
        let train_set_size = positive(required(raw.train_set_size, "train_set_size")?, "train_set_size")?;

        let learning_rate = required(raw.learning_rate, "learning_rate")?;
        if !learning_rate.is_finite() {
            return Err(MlpError::InvalidSetting {
                key: "learning_rate",
                message: format!("must be finite, got {learning_rate}"),
            });
        }

        let epochs = positive(raw.epochs.unwrap_or(DEFAULT_EPOCHS), "epochs")?;
        let progress_every = positive(raw.progress_every.unwrap_or(DEFAULT_PROGRESS_EVERY), "progress_every")?;

        Ok(MlpConfig {
            test_img,
            test_label,
            weight_source,
            num_neurons_in_hidden_layer,
            image_size,
            num_neurons_in_output_layer,
            test_set_size,
            train_set_size,
            learning_rate,
            epochs,
            seed: raw.seed,
            save_weight: raw.save_weight,
            progress_every,
        })
    }

    pub fn topology(&self) -> Result<Topology> {
        Topology::new(
            &self.image_size,
            &self.num_neurons_in_hidden_layer,
            self.num_neurons_in_output_layer,
        )
    }

    pub fn requires_training(&self) -> bool {
        matches!(self.weight_source, WeightSource::Train { .. })
    }
}
