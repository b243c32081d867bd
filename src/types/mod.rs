//! Core types for the binary+JSON response format

mod dtype;
mod header;
mod index;
mod metadata;
mod tensor;

pub use dtype::DType;
pub use header::{
    BINARY_DATA, BINARY_DATA_SIZE, CONTENT_TYPE_MARKER, HEADER_SIZE_KEY,
    INFERENCE_HEADER_CONTENT_LENGTH, content_type,
};
pub use index::{BinaryIndex, ByteRange};
pub use metadata::{OutputDescriptor, ResponseMetadata, element_count};
pub use tensor::{Element, Tensor, TensorData};
