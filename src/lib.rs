//! tritonbin - Decoder for binary+JSON inference responses
//!
//! Triton-style inference servers can return output tensors as raw binary
//! instead of JSON arrays. The response body is then a JSON header describing
//! each output, immediately followed by the tensor payloads back-to-back in the
//! order the outputs are listed. The header length travels out-of-band in the
//! content type (`...;json-header-size=<N>`).
//!
//! # Features
//!
//! - Zero-copy parsing: a [`Response`] borrows the body
//! - Typed decoding of BOOL, (U)INT8-64, FP16, BF16, FP32, FP64 payloads
//! - Each output decodes independently; one bad tensor doesn't poison the rest
//! - A [`writer`] producing the same format, for tests and fixtures
//! - Optional ndarray conversion (`ndarray` feature)
//!
//! # Example
//!
//! ```rust
//! use tritonbin::{Response, writer::ResponseWriter};
//!
//! let encoded = ResponseWriter::new()
//!     .binary_output("SENT_EMBED", vec![4], vec![1.0f32, -2.5, 0.0, 3.25])
//!     .to_bytes()
//!     .unwrap();
//!
//! let response = Response::parse(&encoded.body, &encoded.content_type).unwrap();
//! let embedding = response.decode("SENT_EMBED").unwrap();
//! assert_eq!(embedding.as_slice::<f32>(), Some(&[1.0, -2.5, 0.0, 3.25][..]));
//! ```
//!
//! The payload order in the binary region is assumed to match the order of the
//! `outputs` array; nothing in the body allows verifying it.

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{DecodeError, Missing};
pub use parser::{Response, decode, header_length};
pub use types::{
    BinaryIndex, ByteRange, DType, Element, OutputDescriptor, ResponseMetadata, Tensor,
    TensorData,
};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
