//! Header document types

use super::DType;
use super::header::{BINARY_DATA, BINARY_DATA_SIZE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One output tensor as described in the header JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub name: String,
    pub shape: Vec<u64>,
    pub datatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// Inline payload for outputs returned as JSON rather than binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl OutputDescriptor {
    /// Declared byte size of the binary payload, if this output has one
    pub fn binary_data_size(&self) -> Option<u64> {
        self.parameter(BINARY_DATA_SIZE).and_then(Value::as_u64)
    }

    /// Whether the producer flagged this output as binary
    pub fn binary_data(&self) -> bool {
        self.parameter(BINARY_DATA)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }

    /// Resolve the datatype tag, `None` for `BYTES` and unknown tags
    pub fn dtype(&self) -> Option<DType> {
        DType::from_tag(&self.datatype)
    }

    /// Total number of elements, `None` if the product overflows
    pub fn element_count(&self) -> Option<u64> {
        element_count(&self.shape)
    }
}

/// Product of all dimensions, `None` on overflow
pub fn element_count(shape: &[u64]) -> Option<u64> {
    shape.iter().try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
}

/// Parsed header JSON of an inference response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// Declaration order is the binary layout order
    pub outputs: Vec<OutputDescriptor>,
    /// Top-level fields not used for decoding
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseMetadata {
    /// First output with the given name
    pub fn output(&self, name: &str) -> Option<&OutputDescriptor> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Outputs carrying a binary payload, in declaration order
    pub fn binary_outputs(&self) -> impl Iterator<Item = &OutputDescriptor> {
        self.outputs
            .iter()
            .filter(|o| o.binary_data_size().is_some())
    }
}
