//! Header JSON parsing

use crate::error::DecodeError;
use crate::types::{BINARY_DATA_SIZE, ResponseMetadata};

/// Parse the header region into response metadata
///
/// Output order is preserved as it appears in the `outputs` array.
pub fn parse_metadata(header: &[u8]) -> Result<ResponseMetadata, DecodeError> {
    let metadata: ResponseMetadata = serde_json::from_slice(header)?;

    for output in &metadata.outputs {
        if output.shape.is_empty() {
            return Err(DecodeError::invalid_metadata(format!(
                "output '{}' has an empty shape",
                output.name
            )));
        }
        if let Some(size) = output.parameter(BINARY_DATA_SIZE) {
            if size.as_u64().is_none() {
                return Err(DecodeError::invalid_metadata(format!(
                    "output '{}' has invalid {}: {}",
                    output.name, BINARY_DATA_SIZE, size
                )));
            }
        }
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ResponseMetadata, DecodeError> {
        parse_metadata(json.as_bytes())
    }

    #[test]
    fn parses_outputs_in_order() {
        let meta = parse(
            r#"{"model_name":"e2e","model_version":"1","outputs":[
                {"name":"B","shape":[2],"datatype":"INT32","parameters":{"binary_data_size":8}},
                {"name":"A","shape":[1],"datatype":"INT32","parameters":{"binary_data_size":4}}
            ]}"#,
        )
        .unwrap();
        let names: Vec<&str> = meta.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(meta.model_version.as_deref(), Some("1"));
    }

    #[test]
    fn missing_required_fields() {
        for json in [
            r#"{}"#,
            r#"{"outputs":[{"shape":[1],"datatype":"FP32"}]}"#,
            r#"{"outputs":[{"name":"X","datatype":"FP32"}]}"#,
            r#"{"outputs":[{"name":"X","shape":[1]}]}"#,
        ] {
            let err = parse(json).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidMetadata { .. }), "{json}");
        }
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            parse("{\"outputs\": [").unwrap_err(),
            DecodeError::InvalidMetadata { .. }
        ));
        assert!(matches!(
            parse_metadata(&[0xFF, 0xFE]).unwrap_err(),
            DecodeError::InvalidMetadata { .. }
        ));
    }

    #[test]
    fn rejects_negative_dims_and_empty_shape() {
        assert!(parse(r#"{"outputs":[{"name":"X","shape":[-1],"datatype":"FP32"}]}"#).is_err());
        assert!(parse(r#"{"outputs":[{"name":"X","shape":[],"datatype":"FP32"}]}"#).is_err());
    }

    #[test]
    fn rejects_bad_binary_size() {
        for size in ["-4", "4.5", "\"16\"", "true"] {
            let json = format!(
                r#"{{"outputs":[{{"name":"X","shape":[1],"datatype":"FP32","parameters":{{"binary_data_size":{size}}}}}]}}"#
            );
            assert!(parse(&json).is_err(), "{size}");
        }
    }

    #[test]
    fn unknown_parameters_ignored() {
        let meta = parse(
            r#"{"outputs":[{"name":"X","shape":[1],"datatype":"BYTES","parameters":{"binary_data":false,"foo":"bar"},"data":["hi"]}]}"#,
        )
        .unwrap();
        let out = meta.output("X").unwrap();
        assert_eq!(out.binary_data_size(), None);
        assert!(out.data.is_some());
    }
}
