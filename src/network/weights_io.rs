//! Plain-text weight files.
//!
//! Values are whitespace separated and ordered
//! `for i in transitions: for j in 0..L[i+1]: for k in 0..L[i]+1`,
//! which is exactly the flat row-major order of each [`Matrix`].

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{MlpError, Result};
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Parses weight text into one matrix per transition of `topology`.
///
/// `path` is only used in error messages.
pub fn parse_weights(text: &str, topology: &Topology, path: &Path) -> Result<Vec<Matrix>> {
    let expected = topology.total_weights();
    let mut tokens = text.split_whitespace();
    let mut values = Vec::with_capacity(expected);

    for index in 0..expected {
        let token = tokens.next().ok_or_else(|| MlpError::WeightCount {
            path: path.to_path_buf(),
            expected,
            found: index,
        })?;
        let value = token.parse::<f64>().map_err(|_| MlpError::WeightParse {
            path: path.to_path_buf(),
            index,
            token: token.to_owned(),
        })?;
        values.push(value);
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!(path = %path.display(), extra, "ignoring trailing values in weight file");
    }

    let mut matrices = Vec::with_capacity(topology.num_transitions());
    let mut rest = values.as_slice();
    for i in 0..topology.num_transitions() {
        let (rows, cols) = topology.weight_shape(i);
        let (head, tail) = rest.split_at(rows * cols);
        matrices.push(Matrix {
            rows,
            cols,
            data: head.to_vec(),
        });
        rest = tail;
    }
    Ok(matrices)
}

pub fn load_weights(path: impl AsRef<Path>, topology: &Topology) -> Result<Vec<Matrix>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| MlpError::io(path, e))?;
    parse_weights(&text, topology, path)
}

/// Writes one value per line in loader order. `{}` formatting of `f64` is
/// shortest-round-trip, so reloading yields bit-identical weights.
pub fn write_weights<W: Write>(writer: &mut W, weights: &[Matrix]) -> std::io::Result<()> {
    for matrix in weights {
        for w in matrix.as_slice() {
            writeln!(writer, "{w}")?;
        }
    }
    writer.flush()
}

pub fn save_weights(path: impl AsRef<Path>, weights: &[Matrix]) -> Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| MlpError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_weights(&mut writer, weights).map_err(|e| MlpError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        Topology::from_sizes(vec![2, 1]).unwrap()
    }

    #[test]
    fn parses_in_row_major_order() {
        let t = Topology::from_sizes(vec![1, 2, 1]).unwrap();
        let m = parse_weights("1 2\n3 4\n5 6 7", &t, Path::new("w.txt")).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!((m[0].rows, m[0].cols), (2, 2));
        assert_eq!(m[0].data, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m[1].data, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn short_file_is_rejected() {
        let err = parse_weights("0.1 0.2", &topology(), Path::new("w.txt")).unwrap_err();
        assert!(matches!(err, MlpError::WeightCount { expected: 3, found: 2, .. }));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = parse_weights("0.1 abc 0.3", &topology(), Path::new("w.txt")).unwrap_err();
        assert!(matches!(err, MlpError::WeightParse { index: 1, .. }));
    }

    #[test]
    fn trailing_values_are_ignored() {
        let m = parse_weights("1 2 3 4 5", &topology(), Path::new("w.txt")).unwrap();
        assert_eq!(m[0].data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn written_text_parses_back_exactly() {
        let weights = vec![Matrix::from_data(1, 3, vec![0.1, -1e-17, 123456.789]).unwrap()];
        let mut buf = Vec::new();
        write_weights(&mut buf, &weights).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let back = parse_weights(&text, &topology(), Path::new("w.txt")).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_weights("/definitely/not/here.txt", &topology()).unwrap_err();
        assert!(matches!(err, MlpError::Io { .. }));
    }
}
