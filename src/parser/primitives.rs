//! Little-endian element decoding

use crate::types::{DType, Element, TensorData};

/// Decode `bytes` as consecutive little-endian `T`s
///
/// `bytes.len()` must be a multiple of `T`'s width; a trailing partial element
/// is ignored.
pub fn read_le<T: Element>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::DTYPE.element_size())
        .map(T::from_le)
        .collect()
}

/// Decode `bytes` into the variant matching `dtype`
pub fn decode_elements(dtype: DType, bytes: &[u8]) -> TensorData {
    match dtype {
        DType::Bool => TensorData::Bool(read_le(bytes)),
        DType::U8 => TensorData::U8(bytes.to_vec()),
        DType::U16 => TensorData::U16(read_le(bytes)),
        DType::U32 => TensorData::U32(read_le(bytes)),
        DType::U64 => TensorData::U64(read_le(bytes)),
        DType::I8 => TensorData::I8(read_le(bytes)),
        DType::I16 => TensorData::I16(read_le(bytes)),
        DType::I32 => TensorData::I32(read_le(bytes)),
        DType::I64 => TensorData::I64(read_le(bytes)),
        DType::F16 => TensorData::F16(read_le(bytes)),
        DType::BF16 => TensorData::BF16(read_le(bytes)),
        DType::F32 => TensorData::F32(read_le(bytes)),
        DType::F64 => TensorData::F64(read_le(bytes)),
    }
}
