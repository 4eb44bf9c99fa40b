//! Reader for MNIST-style image/label files.
//!
//! Image files start with four 32-bit header words, label files with two.
//! The header values (magic number, counts, dimensions) are skipped without
//! being checked; the sample count and width come from the configuration.
//! After the header every byte is one feature (images) or one label, widened
//! to `f64` without rescaling.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{MlpError, Result};

pub const IMAGE_HEADER_BYTES: usize = 4 * 4;
pub const LABEL_HEADER_BYTES: usize = 2 * 4;

/// Flat samples plus their integer labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    n_features: usize,
    features: Vec<f64>,
    labels: Vec<usize>,
}

impl Dataset {
    /// `features` is row-major, `labels.len()` samples of `n_features` each.
    pub fn new(n_features: usize, features: Vec<f64>, labels: Vec<usize>) -> Result<Dataset> {
        let expected = n_features * labels.len();
        if features.len() != expected {
            return Err(MlpError::ShapeMismatch { expected, actual: features.len() });
        }
        Ok(Dataset { n_features, features, labels })
    }

    /// Reads `set_size` samples of `n_features` bytes from `image_path` and
    /// `set_size` labels from `label_path`.
    pub fn read(
        image_path: impl AsRef<Path>,
        label_path: impl AsRef<Path>,
        set_size: usize,
        n_features: usize,
    ) -> Result<Dataset> {
        let features = read_images(image_path, set_size, n_features)?;
        let labels = read_labels(label_path, set_size)?;
        Dataset::new(n_features, features, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn sample(&self, index: usize) -> (&[f64], usize) {
        let start = index * self.n_features;
        (&self.features[start..start + self.n_features], self.labels[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], usize)> + '_ {
        (0..self.len()).map(move |i| self.sample(i))
    }

    /// Fails on the first label outside `[0, n_classes)`.
    pub fn check_labels(&self, n_classes: usize) -> Result<()> {
        match self.labels.iter().position(|&l| l >= n_classes) {
            Some(index) => Err(MlpError::LabelOutOfRange {
                index,
                label: self.labels[index],
                classes: n_classes,
            }),
            None => Ok(()),
        }
    }
}

fn read_body(path: &Path, header: usize, len: usize) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| MlpError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut skipped = vec![0u8; header];
    reader.read_exact(&mut skipped).map_err(|e| MlpError::io(path, e))?;

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).map_err(|e| MlpError::io(path, e))?;
    debug!(path = %path.display(), bytes = len, "read dataset body");
    Ok(body)
}

pub fn read_images(path: impl AsRef<Path>, set_size: usize, n_features: usize) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let len = set_size.checked_mul(n_features).ok_or_else(|| MlpError::InvalidSetting {
        key: "set_size",
        message: format!("{set_size} samples of {n_features} features overflows"),
    })?;
    let body = read_body(path, IMAGE_HEADER_BYTES, len)?;
    Ok(body.into_iter().map(f64::from).collect())
}

pub fn read_labels(path: impl AsRef<Path>, set_size: usize) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let body = read_body(path, LABEL_HEADER_BYTES, set_size)?;
    Ok(body.into_iter().map(usize::from).collect())
}
