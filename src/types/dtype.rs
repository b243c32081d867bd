//! Data types for binary tensor payloads

/// Element type of a binary tensor payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F16,
    BF16,
    F32,
    F64,
}

/// Datatype tags as they appear in the header JSON
const TAGS: [(&str, DType); 13] = [
    ("BOOL", DType::Bool),
    ("UINT8", DType::U8),
    ("UINT16", DType::U16),
    ("UINT32", DType::U32),
    ("UINT64", DType::U64),
    ("INT8", DType::I8),
    ("INT16", DType::I16),
    ("INT32", DType::I32),
    ("INT64", DType::I64),
    ("FP16", DType::F16),
    ("BF16", DType::BF16),
    ("FP32", DType::F32),
    ("FP64", DType::F64),
];

impl DType {
    /// All supported dtypes, in tag table order
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F16,
        DType::BF16,
        DType::F32,
        DType::F64,
    ];

    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::Bool | DType::U8 | DType::I8 => 1,
            DType::U16 | DType::I16 | DType::F16 | DType::BF16 => 2,
            DType::U32 | DType::I32 | DType::F32 => 4,
            DType::U64 | DType::I64 | DType::F64 => 8,
        }
    }

    /// Look up a datatype tag (`"FP32"`, `"INT64"`, ...)
    ///
    /// Returns `None` for `"BYTES"` and anything unknown.
    pub fn from_tag(tag: &str) -> Option<Self> {
        TAGS.iter().find(|(t, _)| *t == tag).map(|(_, d)| *d)
    }

    /// The header JSON tag for this dtype
    pub fn tag(self) -> &'static str {
        match TAGS.iter().find(|(_, d)| *d == self) {
            Some((t, _)) => t,
            None => unreachable!("every DType has a tag"),
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for dtype in DType::ALL {
            assert_eq!(DType::from_tag(dtype.tag()), Some(dtype));
        }
    }

    #[test]
    fn bytes_is_not_a_dtype() {
        assert_eq!(DType::from_tag("BYTES"), None);
        assert_eq!(DType::from_tag("fp32"), None);
        assert_eq!(DType::from_tag(""), None);
    }

    #[test]
    fn widths() {
        assert_eq!(DType::Bool.element_size(), 1);
        assert_eq!(DType::F16.element_size(), 2);
        assert_eq!(DType::BF16.element_size(), 2);
        assert_eq!(DType::F32.element_size(), 4);
        assert_eq!(DType::I32.element_size(), 4);
        assert_eq!(DType::U64.element_size(), 8);
        assert_eq!(DType::F64.element_size(), 8);
    }
}
