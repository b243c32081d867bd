//! Binary region index types

use std::collections::HashMap;

/// Byte span within the binary region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Offset relative to the start of the binary region
    pub start: u64,
    pub length: u64,
}

impl ByteRange {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }
}

/// Output name to byte range within the binary region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryIndex {
    pub(crate) entries: Vec<(String, ByteRange)>,
    pub(crate) by_name: HashMap<String, ByteRange>,
    pub(crate) shadowed: Vec<String>,
}

impl BinaryIndex {
    /// Range for `name`; for duplicated names the last declaration wins
    pub fn get(&self, name: &str) -> Option<ByteRange> {
        self.by_name.get(name).copied()
    }

    /// Entries in declaration order, duplicates included
    pub fn entries(&self) -> &[(String, ByteRange)] {
        &self.entries
    }

    /// Names declared more than once with binary data
    pub fn shadowed_names(&self) -> &[String] {
        &self.shadowed
    }

    /// Sum of all range lengths
    pub fn total_len(&self) -> u64 {
        self.entries.last().map_or(0, |(_, r)| r.end())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
