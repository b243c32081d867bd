//! Decoded tensor types

use super::DType;
use super::metadata::element_count;
use half::{bf16, f16};
use serde_json::Value;

/// Decoded elements, one variant per supported dtype
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    Bool(Vec<bool>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F16(Vec<f16>),
    BF16(Vec<bf16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl TensorData {
    pub fn dtype(&self) -> DType {
        match self {
            TensorData::Bool(_) => DType::Bool,
            TensorData::U8(_) => DType::U8,
            TensorData::U16(_) => DType::U16,
            TensorData::U32(_) => DType::U32,
            TensorData::U64(_) => DType::U64,
            TensorData::I8(_) => DType::I8,
            TensorData::I16(_) => DType::I16,
            TensorData::I32(_) => DType::I32,
            TensorData::I64(_) => DType::I64,
            TensorData::F16(_) => DType::F16,
            TensorData::BF16(_) => DType::BF16,
            TensorData::F32(_) => DType::F32,
            TensorData::F64(_) => DType::F64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            TensorData::Bool(v) => v.len(),
            TensorData::U8(v) => v.len(),
            TensorData::U16(v) => v.len(),
            TensorData::U32(v) => v.len(),
            TensorData::U64(v) => v.len(),
            TensorData::I8(v) => v.len(),
            TensorData::I16(v) => v.len(),
            TensorData::I32(v) => v.len(),
            TensorData::I64(v) => v.len(),
            TensorData::F16(v) => v.len(),
            TensorData::BF16(v) => v.len(),
            TensorData::F32(v) => v.len(),
            TensorData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the elements as `T`, `None` if the dtype differs
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Render the elements as a JSON array
    ///
    /// Half floats are widened to f32; non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        fn float(v: f64) -> Value {
            Value::from(v)
        }

        let items: Vec<Value> = match self {
            TensorData::Bool(v) => v.iter().map(|&x| Value::Bool(x)).collect(),
            TensorData::U8(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::U16(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::U32(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::U64(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::I8(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::I16(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::I32(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::I64(v) => v.iter().map(|&x| Value::from(x)).collect(),
            TensorData::F16(v) => v.iter().map(|x| float(f64::from(x.to_f32()))).collect(),
            TensorData::BF16(v) => v.iter().map(|x| float(f64::from(x.to_f32()))).collect(),
            TensorData::F32(v) => v.iter().map(|&x| float(f64::from(x))).collect(),
            TensorData::F64(v) => v.iter().map(|&x| float(x)).collect(),
        };
        Value::Array(items)
    }
}

/// A decoded output tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub name: String,
    pub shape: Vec<u64>,
    pub data: TensorData,
}

impl Tensor {
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Total number of elements according to the shape, saturating on overflow
    pub fn num_elements(&self) -> u64 {
        element_count(&self.shape).unwrap_or(u64::MAX)
    }

    /// Borrow the elements as `T`, `None` if the dtype differs
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    /// Take the elements as `Vec<T>`, `None` if the dtype differs
    pub fn into_vec<T: Element>(self) -> Option<Vec<T>> {
        T::take(self.data)
    }
}

/// Rust element type of a binary payload
pub trait Element: Sized + Copy + 'static {
    const DTYPE: DType;

    /// Decode one element from exactly `DTYPE.element_size()` little-endian bytes
    fn from_le(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding of `self`
    fn write_le(self, out: &mut Vec<u8>);

    fn slice(data: &TensorData) -> Option<&[Self]>;

    fn take(data: TensorData) -> Option<Vec<Self>>;

    fn wrap(values: Vec<Self>) -> TensorData;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            fn from_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                <$t>::from_le_bytes(raw)
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn slice(data: &TensorData) -> Option<&[Self]> {
                match data {
                    TensorData::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn take(data: TensorData) -> Option<Vec<Self>> {
                match data {
                    TensorData::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn wrap(values: Vec<Self>) -> TensorData {
                TensorData::$variant(values)
            }
        }
    };
}

impl_element!(u8, U8);
impl_element!(u16, U16);
impl_element!(u32, U32);
impl_element!(u64, U64);
impl_element!(i8, I8);
impl_element!(i16, I16);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(f16, F16);
impl_element!(bf16, BF16);
impl_element!(f32, F32);
impl_element!(f64, F64);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    fn from_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }

    fn slice(data: &TensorData) -> Option<&[Self]> {
        match data {
            TensorData::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn take(data: TensorData) -> Option<Vec<Self>> {
        match data {
            TensorData::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn wrap(values: Vec<Self>) -> TensorData {
        TensorData::Bool(values)
    }
}

impl<T: Element> From<Vec<T>> for TensorData {
    fn from(values: Vec<T>) -> Self {
        T::wrap(values)
    }
}
