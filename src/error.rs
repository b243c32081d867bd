//! Error types for tritonbin

use std::error::Error;
use std::fmt;

/// What was missing when an output lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// No output with this name in the header
    Descriptor,
    /// Output exists but carries no `binary_data_size` (its value is inline JSON)
    BinaryData,
}

/// Decode error
#[derive(Debug)]
pub enum DecodeError {
    /// Content type is not `<marker>json-header-size=<N>`
    MalformedContentType {
        content_type: String,
        reason: &'static str,
    },
    /// Header JSON could not be parsed into output descriptors
    InvalidMetadata {
        message: String,
        source: Option<serde_json::Error>,
    },
    /// Requested output has no descriptor or no binary payload
    OutputNotFound { name: String, missing: Missing },
    /// A byte span reaches past what is available
    BufferUnderrun {
        name: Option<String>,
        expected: u64,
        available: u64,
    },
    /// Datatype outside the numeric family
    UnsupportedDatatype { name: String, datatype: String },
}

impl DecodeError {
    pub(crate) fn invalid_metadata(message: impl Into<String>) -> Self {
        DecodeError::InvalidMetadata {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn underrun(name: Option<&str>, expected: u64, available: u64) -> Self {
        DecodeError::BufferUnderrun {
            name: name.map(str::to_string),
            expected,
            available,
        }
    }

    /// Name of the output the error refers to, if any
    pub fn output_name(&self) -> Option<&str> {
        match self {
            DecodeError::OutputNotFound { name, .. }
            | DecodeError::UnsupportedDatatype { name, .. } => Some(name),
            DecodeError::BufferUnderrun { name, .. } => name.as_deref(),
            DecodeError::MalformedContentType { .. } | DecodeError::InvalidMetadata { .. } => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedContentType {
                content_type,
                reason,
            } => write!(f, "Malformed content type {:?}: {}", content_type, reason),
            DecodeError::InvalidMetadata { message, source } => match source {
                Some(e) => write!(f, "Invalid response metadata: {}: {}", message, e),
                None => write!(f, "Invalid response metadata: {}", message),
            },
            DecodeError::OutputNotFound { name, missing } => match missing {
                Missing::Descriptor => write!(f, "Output '{}' not found in response", name),
                Missing::BinaryData => {
                    write!(f, "Output '{}' has no binary data in response", name)
                }
            },
            DecodeError::BufferUnderrun {
                name,
                expected,
                available,
            } => {
                write!(
                    f,
                    "Buffer underrun: expected {} bytes, {} available",
                    expected, available
                )?;
                if let Some(name) = name {
                    write!(f, " (output: {})", name)?;
                }
                Ok(())
            }
            DecodeError::UnsupportedDatatype { name, datatype } => write!(
                f,
                "Unsupported datatype {:?} for output '{}'",
                datatype, name
            ),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::InvalidMetadata {
                source: Some(e), ..
            } => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::InvalidMetadata {
            message: "failed to parse header JSON".into(),
            source: Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underrun_message_names_output() {
        let err = DecodeError::underrun(Some("SENT_EMBED"), 66, 60);
        let msg = err.to_string();
        assert!(msg.contains("66"));
        assert!(msg.contains("60"));
        assert!(msg.contains("SENT_EMBED"));
        assert_eq!(err.output_name(), Some("SENT_EMBED"));
    }

    #[test]
    fn json_error_is_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DecodeError::from(json_err);
        assert!(err.source().is_some());
        assert!(err.output_name().is_none());
    }

    #[test]
    fn not_found_distinguishes_reason() {
        let a = DecodeError::OutputNotFound {
            name: "X".into(),
            missing: Missing::Descriptor,
        };
        let b = DecodeError::OutputNotFound {
            name: "X".into(),
            missing: Missing::BinaryData,
        };
        assert_ne!(a.to_string(), b.to_string());
    }
}
