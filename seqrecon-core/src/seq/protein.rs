use crate::seq::bytes::{self, IntoNeedle};

/// Amino-acid string produced by translation. Stop and unknown codons carry
/// the symbols of the codon table that produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProteinSeq {
    bytes: Vec<u8>,
}

impl ProteinSeq {
    #[inline]
    pub(crate) fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Translation output is always ASCII.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn find<'a, N>(&self, sub: N) -> Option<usize>
    where
        N: IntoNeedle<'a>,
    {
        bytes::find(self.as_bytes(), sub.into_needle(), 0, self.bytes.len())
    }
}
