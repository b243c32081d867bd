//! ndarray integration for decoded tensors
//!
//! Converts decoded tensors into ndarray's dynamic-dimension arrays and back
//! into writer input.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{DType, Element, Tensor, TensorData};
use ndarray::{ArrayD, IxDyn};

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdarrayError {
    /// DType mismatch between requested and decoded
    DTypeMismatch { expected: DType, actual: DType },
    /// Shape doesn't match the number of elements
    ShapeMismatch { shape: Vec<u64>, len: usize },
    /// Array is not in standard (contiguous row-major) layout
    NotContiguous,
}

impl std::fmt::Display for NdarrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdarrayError::DTypeMismatch { expected, actual } => {
                write!(f, "DType mismatch: expected {}, got {}", expected, actual)
            }
            NdarrayError::ShapeMismatch { shape, len } => {
                write!(f, "Shape {:?} doesn't match {} elements", shape, len)
            }
            NdarrayError::NotContiguous => {
                write!(
                    f,
                    "Array is not contiguous; call .as_standard_layout().into_owned() first"
                )
            }
        }
    }
}

impl std::error::Error for NdarrayError {}

impl Tensor {
    /// Convert to an ndarray ArrayD with the declared shape
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, NdarrayError> {
        let elements = self
            .as_slice::<T>()
            .ok_or_else(|| NdarrayError::DTypeMismatch {
                expected: T::DTYPE,
                actual: self.dtype(),
            })?;

        let shape_mismatch = || NdarrayError::ShapeMismatch {
            shape: self.shape.clone(),
            len: elements.len(),
        };
        let shape = self
            .shape
            .iter()
            .map(|&d| usize::try_from(d).map_err(|_| shape_mismatch()))
            .collect::<Result<Vec<usize>, _>>()?;

        ArrayD::from_shape_vec(IxDyn(&shape), elements.to_vec()).map_err(|_| shape_mismatch())
    }
}

impl TensorData {
    /// Split a contiguous ndarray into writer input: `(shape, data)`
    pub fn from_ndarray<T: Element>(arr: ArrayD<T>) -> Result<(Vec<u64>, Self), NdarrayError> {
        if !arr.is_standard_layout() {
            return Err(NdarrayError::NotContiguous);
        }
        let shape: Vec<u64> = arr.shape().iter().map(|&d| d as u64).collect();
        let (vec, offset) = arr.into_raw_vec_and_offset();
        if offset.unwrap_or(0) != 0 {
            return Err(NdarrayError::NotContiguous);
        }
        Ok((shape, T::wrap(vec)))
    }
}
