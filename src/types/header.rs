//! Content-type and parameter constants

/// Marker identifying the binary+JSON response scheme
pub const CONTENT_TYPE_MARKER: &str = "application/vnd.sagemaker-triton.binary+json;";

/// Assignment carrying the JSON header length, follows the marker
pub const HEADER_SIZE_KEY: &str = "json-header-size=";

/// HTTP header used by native Triton endpoints to carry the JSON header length
pub const INFERENCE_HEADER_CONTENT_LENGTH: &str = "Inference-Header-Content-Length";

/// Output parameter holding the byte size of the binary payload
pub const BINARY_DATA_SIZE: &str = "binary_data_size";

/// Output parameter flagging that binary data was requested
pub const BINARY_DATA: &str = "binary_data";

/// Build the content type for a header of `header_length` bytes
pub fn content_type(header_length: usize) -> String {
    format!("{CONTENT_TYPE_MARKER}{HEADER_SIZE_KEY}{header_length}")
}
