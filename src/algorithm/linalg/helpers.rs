//! Validation helpers shared by linear algebra backends

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Validate matrix is 2D, returning `(rows, cols)`
pub fn validate_matrix_2d(shape: &[usize]) -> Result<(usize, usize)> {
    match *shape {
        [m, n] => Ok((m, n)),
        _ => Err(Error::invalid_argument(
            "matrix",
            format!(
                "expected 2D matrix, got {}D tensor with shape {:?}",
                shape.len(),
                shape
            ),
        )),
    }
}

/// Validate matrix is square, returning its order
pub fn validate_square_matrix(shape: &[usize]) -> Result<usize> {
    let (m, n) = validate_matrix_2d(shape)?;
    if m != n {
        return Err(Error::ShapeMismatch {
            expected: vec![m, m],
            got: vec![m, n],
        });
    }
    Ok(n)
}

/// Linear algebra runs on floating point data only
pub fn validate_linalg_dtype(dtype: DType) -> Result<()> {
    if dtype.is_float() {
        Ok(())
    } else {
        Err(Error::UnsupportedDType {
            dtype,
            op: "linear algebra",
        })
    }
}
