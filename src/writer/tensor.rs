//! Tensor payload serialization

use crate::types::{Element, TensorData};

fn write_all<T: Element>(values: &[T], out: &mut Vec<u8>) {
    out.reserve(values.len() * T::DTYPE.element_size());
    for &v in values {
        v.write_le(out);
    }
}

/// Append the little-endian encoding of every element
pub fn write_elements(data: &TensorData, out: &mut Vec<u8>) {
    match data {
        TensorData::Bool(v) => write_all(v, out),
        TensorData::U8(v) => out.extend_from_slice(v),
        TensorData::U16(v) => write_all(v, out),
        TensorData::U32(v) => write_all(v, out),
        TensorData::U64(v) => write_all(v, out),
        TensorData::I8(v) => write_all(v, out),
        TensorData::I16(v) => write_all(v, out),
        TensorData::I32(v) => write_all(v, out),
        TensorData::I64(v) => write_all(v, out),
        TensorData::F16(v) => write_all(v, out),
        TensorData::BF16(v) => write_all(v, out),
        TensorData::F32(v) => write_all(v, out),
        TensorData::F64(v) => write_all(v, out),
    }
}
