//! Serialization of binary+JSON responses
//!
//! Produces a JSON header with `binary_data_size` parameters followed by the
//! concatenated payloads, plus the matching content type.

mod tensor;

pub use tensor::write_elements;

use crate::types::{
    BINARY_DATA_SIZE, OutputDescriptor, ResponseMetadata, TensorData, content_type,
    element_count,
};
use serde_json::{Map, Value};
use std::io::{self, Write};

/// An encoded response body and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResponse {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug)]
enum Payload {
    Binary(TensorData),
    Inline { datatype: String, data: Value },
}

#[derive(Debug)]
struct PendingOutput {
    name: String,
    shape: Vec<u64>,
    payload: Payload,
}

/// Builder for a response body
#[derive(Debug, Default)]
pub struct ResponseWriter {
    model_name: Option<String>,
    model_version: Option<String>,
    id: Option<String>,
    outputs: Vec<PendingOutput>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self.model_version = Some(version.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an output whose elements go in the binary region
    pub fn binary_output(
        mut self,
        name: impl Into<String>,
        shape: Vec<u64>,
        data: impl Into<TensorData>,
    ) -> Self {
        self.outputs.push(PendingOutput {
            name: name.into(),
            shape,
            payload: Payload::Binary(data.into()),
        });
        self
    }

    /// Add an output carried inline in the header JSON
    pub fn json_output(
        mut self,
        name: impl Into<String>,
        shape: Vec<u64>,
        datatype: impl Into<String>,
        data: Value,
    ) -> Self {
        self.outputs.push(PendingOutput {
            name: name.into(),
            shape,
            payload: Payload::Inline {
                datatype: datatype.into(),
                data,
            },
        });
        self
    }

    /// Write the body and return its content type
    pub fn write<W: Write>(self, writer: &mut W) -> io::Result<String> {
        let mut outputs = Vec::with_capacity(self.outputs.len());
        let mut binary = Vec::new();

        for output in self.outputs {
            if output.shape.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("output '{}' has an empty shape", output.name),
                ));
            }
            let descriptor = match output.payload {
                Payload::Binary(data) => {
                    let count = element_count(&output.shape);
                    if count != Some(data.len() as u64) {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!(
                                "output '{}' has shape {:?} but {} elements",
                                output.name,
                                output.shape,
                                data.len()
                            ),
                        ));
                    }
                    let start = binary.len();
                    write_elements(&data, &mut binary);

                    let mut parameters = Map::new();
                    parameters.insert(
                        BINARY_DATA_SIZE.to_string(),
                        Value::from((binary.len() - start) as u64),
                    );
                    OutputDescriptor {
                        name: output.name,
                        shape: output.shape,
                        datatype: data.dtype().tag().to_string(),
                        parameters: Some(parameters),
                        data: None,
                    }
                }
                Payload::Inline { datatype, data } => OutputDescriptor {
                    name: output.name,
                    shape: output.shape,
                    datatype,
                    parameters: None,
                    data: Some(data),
                },
            };
            outputs.push(descriptor);
        }

        let metadata = ResponseMetadata {
            model_name: self.model_name,
            model_version: self.model_version,
            id: self.id,
            parameters: None,
            outputs,
            extra: Map::new(),
        };
        let header = serde_json::to_vec(&metadata)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writer.write_all(&header)?;
        writer.write_all(&binary)?;

        Ok(content_type(header.len()))
    }

    /// Write the body to bytes
    pub fn to_bytes(self) -> io::Result<EncodedResponse> {
        let mut body = Vec::new();
        let content_type = self.write(&mut body)?;
        Ok(EncodedResponse { body, content_type })
    }
}
