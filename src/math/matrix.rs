use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Dense row-major matrix backed by one contiguous buffer.
///
/// For a weight matrix between layers `i` and `i+1`, `rows = L[i+1]` and
/// `cols = L[i] + 1`, so element `(j, k)` sits at `data[j * cols + k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Samples every entry independently from N(0, std_dev²).
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| {
                let z: f64 = StandardNormal.sample(rng);
                z * std_dev
            })
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row `j`: every source weight feeding destination unit `j`.
    pub fn row(&self, j: usize) -> &[f64] {
        &self.data[j * self.cols..(j + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
