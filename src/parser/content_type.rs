//! JSON header length extraction

use crate::error::DecodeError;
use crate::types::{CONTENT_TYPE_MARKER, HEADER_SIZE_KEY};

/// Extract the JSON header length from a binary+JSON content type
///
/// The content type must be exactly `<marker>json-header-size=<N>` with `N`
/// a base-10 non-negative integer.
pub fn header_length(content_type: &str) -> Result<usize, DecodeError> {
    let malformed = |reason| DecodeError::MalformedContentType {
        content_type: content_type.to_string(),
        reason,
    };

    let rest = content_type
        .strip_prefix(CONTENT_TYPE_MARKER)
        .ok_or_else(|| malformed("missing binary+json marker"))?;
    let value = rest
        .strip_prefix(HEADER_SIZE_KEY)
        .ok_or_else(|| malformed("missing json-header-size assignment"))?;

    parse_digits(value).ok_or_else(|| malformed("json-header-size is not a non-negative integer"))
}

/// Validate a header length received out-of-band, e.g. from the
/// `Inference-Header-Content-Length` HTTP header
pub fn parse_header_length_value(value: &str) -> Result<usize, DecodeError> {
    parse_digits(value).ok_or_else(|| DecodeError::MalformedContentType {
        content_type: value.to_string(),
        reason: "header length is not a non-negative integer",
    })
}

// `usize::from_str` accepts a leading '+', the wire format does not.
fn parse_digits(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::content_type;

    const PREFIX: &str = "application/vnd.sagemaker-triton.binary+json;json-header-size=";

    #[test]
    fn extracts_length() {
        assert_eq!(header_length(&format!("{PREFIX}50")).unwrap(), 50);
        assert_eq!(header_length(&format!("{PREFIX}0")).unwrap(), 0);
        assert_eq!(header_length(&format!("{PREFIX}007")).unwrap(), 7);
    }

    #[test]
    fn built_content_type_roundtrips() {
        for n in [0usize, 1, 123, 65536] {
            assert_eq!(header_length(&content_type(n)).unwrap(), n);
        }
    }

    #[test]
    fn rejects_missing_marker() {
        assert!(header_length("application/json").is_err());
        assert!(header_length("json-header-size=50").is_err());
        assert!(header_length("application/vnd.sagemaker-triton.binary+json;").is_err());
    }

    #[test]
    fn rejects_bad_values() {
        for bad in ["", "abc", "+5", "-5", " 5", "5 ", "5.0", "99999999999999999999999"] {
            let err = header_length(&format!("{PREFIX}{bad}")).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedContentType { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn raw_header_value() {
        assert_eq!(parse_header_length_value("128").unwrap(), 128);
        assert!(parse_header_length_value("").is_err());
        assert!(parse_header_length_value("12a").is_err());
    }
}
