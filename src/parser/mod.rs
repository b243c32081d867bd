//! Parser for binary+JSON inference responses
//!
//! Zero-copy: a [`Response`] borrows the body and decodes tensors on demand.

mod content_type;
mod index;
mod metadata;
mod primitives;
mod take;
mod tensor;

pub use content_type::{header_length, parse_header_length_value};
pub use index::build_index;
pub use metadata::parse_metadata;
pub use primitives::{decode_elements, read_le};

use crate::error::DecodeError;
use crate::types::{BinaryIndex, ResponseMetadata, Tensor};
use serde_json::Value;

/// Decode one output from a full response body
///
/// `metadata` must be the parsed header of `buffer`. Each call is independent;
/// decode every output you need with its own call.
pub fn decode(
    output_name: &str,
    buffer: &[u8],
    content_type: &str,
    metadata: &ResponseMetadata,
) -> Result<Tensor, DecodeError> {
    let header_length = header_length(content_type)?;
    let index = build_index(&metadata.outputs);
    tensor::decode_output(output_name, buffer, header_length, metadata, &index)
}

/// A parsed response borrowing its body
#[derive(Debug, Clone)]
pub struct Response<'a> {
    body: &'a [u8],
    header_length: usize,
    metadata: ResponseMetadata,
    index: BinaryIndex,
}

impl<'a> Response<'a> {
    /// Parse a body using the header length carried in `content_type`
    pub fn parse(body: &'a [u8], content_type: &str) -> Result<Self, DecodeError> {
        let header_length = header_length(content_type)?;
        Self::with_header_length(body, header_length)
    }

    /// Parse a body whose header length arrived out-of-band
    /// (`Inference-Header-Content-Length` on native Triton endpoints)
    pub fn with_header_length(body: &'a [u8], header_length: usize) -> Result<Self, DecodeError> {
        let header = take::take(body, 0, header_length as u64, None)?;
        let metadata = parse_metadata(header)?;
        let index = build_index(&metadata.outputs);

        let response = Self {
            body,
            header_length,
            metadata,
            index,
        };
        if let Err(e) = response.check_layout() {
            tracing::warn!(error = %e, "binary outputs overrun the response body");
        }
        tracing::debug!(
            header_length,
            outputs = response.metadata.outputs.len(),
            binary_outputs = response.index.len(),
            "parsed response header"
        );
        Ok(response)
    }

    pub fn header_length(&self) -> usize {
        self.header_length
    }

    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    pub fn index(&self) -> &BinaryIndex {
        &self.index
    }

    /// Everything after the JSON header
    pub fn binary_region(&self) -> &'a [u8] {
        &self.body[self.header_length..]
    }

    /// Verify the indexed payloads fit in the binary region
    pub fn check_layout(&self) -> Result<(), DecodeError> {
        let available = self.binary_region().len() as u64;
        let total = self.index.total_len();
        if total > available {
            return Err(DecodeError::underrun(None, total, available));
        }
        if total < available {
            tracing::debug!(total, available, "binary region has trailing bytes");
        }
        Ok(())
    }

    /// Raw bytes of the declared payload of `name` (zero-copy)
    pub fn binary(&self, name: &str) -> Result<&'a [u8], DecodeError> {
        tensor::binary_slice(name, self.body, self.header_length, &self.index)
    }

    /// Inline JSON payload of a non-binary output
    pub fn inline_data(&self, name: &str) -> Option<&Value> {
        self.metadata.output(name).and_then(|o| o.data.as_ref())
    }

    /// Decode the binary payload of `name`
    pub fn decode(&self, name: &str) -> Result<Tensor, DecodeError> {
        tensor::decode_output(
            name,
            self.body,
            self.header_length,
            &self.metadata,
            &self.index,
        )
    }

    /// Decode every binary output independently, in declaration order
    pub fn tensors(&self) -> impl Iterator<Item = (&str, Result<Tensor, DecodeError>)> + '_ {
        self.metadata
            .binary_outputs()
            .map(|o| (o.name.as_str(), self.decode(&o.name)))
    }
}
