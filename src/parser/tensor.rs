//! Tensor decoding from the binary region

use super::primitives::decode_elements;
use super::take::take;
use crate::error::{DecodeError, Missing};
use crate::types::{BinaryIndex, ByteRange, DType, ResponseMetadata, Tensor};

fn binary_range(name: &str, index: &BinaryIndex) -> Result<ByteRange, DecodeError> {
    index.get(name).ok_or_else(|| DecodeError::OutputNotFound {
        name: name.to_string(),
        missing: Missing::BinaryData,
    })
}

fn range_slice<'a>(
    name: &str,
    body: &'a [u8],
    header_length: usize,
    range: ByteRange,
) -> Result<&'a [u8], DecodeError> {
    let start = (header_length as u64).saturating_add(range.start);
    take(body, start, range.length, Some(name))
}

/// Borrow the declared binary payload of `name`
pub(crate) fn binary_slice<'a>(
    name: &str,
    body: &'a [u8],
    header_length: usize,
    index: &BinaryIndex,
) -> Result<&'a [u8], DecodeError> {
    let range = binary_range(name, index)?;
    range_slice(name, body, header_length, range)
}

/// Decode the binary payload of output `name`
///
/// Checks run in a fixed order: descriptor, binary range, datatype, element
/// count, range bounds, then declared size against the shape.
pub(crate) fn decode_output(
    name: &str,
    body: &[u8],
    header_length: usize,
    metadata: &ResponseMetadata,
    index: &BinaryIndex,
) -> Result<Tensor, DecodeError> {
    let descriptor = metadata
        .output(name)
        .ok_or_else(|| DecodeError::OutputNotFound {
            name: name.to_string(),
            missing: Missing::Descriptor,
        })?;
    let range = binary_range(name, index)?;

    let dtype = DType::from_tag(&descriptor.datatype).ok_or_else(|| {
        DecodeError::UnsupportedDatatype {
            name: name.to_string(),
            datatype: descriptor.datatype.clone(),
        }
    })?;

    let required = descriptor
        .element_count()
        .and_then(|count| count.checked_mul(dtype.element_size() as u64))
        .unwrap_or(u64::MAX);
    let payload = range_slice(name, body, header_length, range)?;
    let declared = payload.len() as u64;
    if required > declared {
        return Err(DecodeError::underrun(Some(name), required, declared));
    }
    if required < declared {
        tracing::debug!(
            name,
            required,
            declared,
            "declared binary size exceeds shape, trailing bytes ignored"
        );
    }

    // required <= payload.len()
    let data = decode_elements(dtype, &payload[..required as usize]);
    tracing::debug!(name, dtype = %dtype, elements = data.len(), "decoded output");

    Ok(Tensor {
        name: descriptor.name.clone(),
        shape: descriptor.shape.clone(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{build_index, parse_metadata};
    use crate::types::TensorData;

    fn fixture(outputs: &str, payload: &[u8]) -> (Vec<u8>, usize, ResponseMetadata, BinaryIndex) {
        let header = format!(r#"{{"outputs":{outputs}}}"#);
        let metadata = parse_metadata(header.as_bytes()).unwrap();
        let index = build_index(&metadata.outputs);
        let mut body = header.into_bytes();
        let h = body.len();
        body.extend_from_slice(payload);
        (body, h, metadata, index)
    }

    #[test]
    fn decodes_int32_pair() {
        let mut payload = Vec::new();
        for v in [7i32, -3, 42] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let (body, h, meta, index) = fixture(
            r#"[{"name":"A","shape":[2],"datatype":"INT32","parameters":{"binary_data_size":8}},
               {"name":"B","shape":[1],"datatype":"INT32","parameters":{"binary_data_size":4}}]"#,
            &payload,
        );
        let a = decode_output("A", &body, h, &meta, &index).unwrap();
        let b = decode_output("B", &body, h, &meta, &index).unwrap();
        assert_eq!(a.data, TensorData::I32(vec![7, -3]));
        assert_eq!(b.data, TensorData::I32(vec![42]));
    }

    #[test]
    fn zero_element_shape_is_empty() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"E","shape":[3,0],"datatype":"FP64","parameters":{"binary_data_size":0}}]"#,
            &[],
        );
        let tensor = decode_output("E", &body, h, &meta, &index).unwrap();
        assert!(tensor.data.is_empty());
        assert_eq!(tensor.shape, vec![3, 0]);
    }

    #[test]
    fn inline_output_has_no_binary_data() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"S","shape":[1],"datatype":"BYTES","data":["hi"]}]"#,
            &[],
        );
        let err = decode_output("S", &body, h, &meta, &index).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutputNotFound {
                missing: Missing::BinaryData,
                ..
            }
        ));
    }

    #[test]
    fn binary_bytes_output_unsupported() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"S","shape":[1],"datatype":"BYTES","parameters":{"binary_data_size":6}}]"#,
            &[2, 0, 0, 0, b'h', b'i'],
        );
        let err = decode_output("S", &body, h, &meta, &index).unwrap_err();
        match err {
            DecodeError::UnsupportedDatatype { name, datatype } => {
                assert_eq!(name, "S");
                assert_eq!(datatype, "BYTES");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn datatype_checked_before_range_bounds() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"S","shape":[1],"datatype":"BYTES","parameters":{"binary_data_size":64}}]"#,
            &[1, 0, 0, 0, b'x'],
        );
        let err = decode_output("S", &body, h, &meta, &index).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedDatatype { .. }));

        // The same range with a numeric type reaches the bounds check
        let (body, h, meta, index) = fixture(
            r#"[{"name":"S","shape":[1],"datatype":"UINT8","parameters":{"binary_data_size":64}}]"#,
            &[1, 0, 0, 0, b'x'],
        );
        let err = decode_output("S", &body, h, &meta, &index).unwrap_err();
        assert!(matches!(err, DecodeError::BufferUnderrun { .. }));
    }

    #[test]
    fn missing_range_checked_before_datatype() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"S","shape":[1],"datatype":"STRING_LIST"}]"#,
            &[],
        );
        let err = decode_output("S", &body, h, &meta, &index).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutputNotFound {
                missing: Missing::BinaryData,
                ..
            }
        ));
    }

    #[test]
    fn shape_larger_than_declared_size() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"X","shape":[4],"datatype":"FP32","parameters":{"binary_data_size":8}}]"#,
            &[0u8; 8],
        );
        let err = decode_output("X", &body, h, &meta, &index).unwrap_err();
        match err {
            DecodeError::BufferUnderrun {
                expected, available, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(available, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn declared_range_past_buffer_end() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"X","shape":[4],"datatype":"FP32","parameters":{"binary_data_size":16}}]"#,
            &[0u8; 10],
        );
        let err = decode_output("X", &body, h, &meta, &index).unwrap_err();
        match err {
            DecodeError::BufferUnderrun {
                name,
                expected,
                available,
            } => {
                assert_eq!(name.as_deref(), Some("X"));
                assert_eq!(expected, h as u64 + 16);
                assert_eq!(available, h as u64 + 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overflowing_shape_is_underrun() {
        let (body, h, meta, index) = fixture(
            r#"[{"name":"X","shape":[18446744073709551615,4],"datatype":"FP32","parameters":{"binary_data_size":4}}]"#,
            &[0u8; 4],
        );
        assert!(matches!(
            decode_output("X", &body, h, &meta, &index).unwrap_err(),
            DecodeError::BufferUnderrun { .. }
        ));
    }
}
