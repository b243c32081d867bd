//! Binary region index construction

use crate::types::{BinaryIndex, ByteRange, OutputDescriptor};
use std::collections::HashMap;

/// Compute each binary output's byte range within the binary region
///
/// Payloads are laid out back-to-back in declaration order. Outputs without a
/// `binary_data_size` parameter take no space and are left out of the index.
pub fn build_index(outputs: &[OutputDescriptor]) -> BinaryIndex {
    let mut entries = Vec::new();
    let mut by_name = HashMap::new();
    let mut shadowed = Vec::new();
    let mut offset = 0u64;

    for output in outputs {
        let Some(size) = output.binary_data_size() else {
            continue;
        };
        let range = ByteRange::new(offset, size);
        tracing::debug!(name = %output.name, start = range.start, length = range.length, "indexed binary output");

        if by_name.insert(output.name.clone(), range).is_some() {
            tracing::warn!(name = %output.name, "duplicate output name, later payload shadows earlier one");
            shadowed.push(output.name.clone());
        }
        entries.push((output.name.clone(), range));
        offset = offset.saturating_add(size);
    }

    BinaryIndex {
        entries,
        by_name,
        shadowed,
    }
}
