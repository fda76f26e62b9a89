use crate::alphabets::dna;
use crate::error::{BioError, BioResult};
use crate::seq::traits::SeqBytes;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DnaSeq {
    bytes: Vec<u8>,
}

impl DnaSeq {
    /// Accepts the IUPAC nucleotide alphabet; strand operations are stricter.
    pub fn new(bytes: Vec<u8>) -> BioResult<Self> {
        if let Some((pos, b)) = dna::iupac_alphabet().first_invalid(&bytes) {
            return Err(BioError::InvalidChar { ch: b as char, pos });
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn reverse_complement(&self) -> BioResult<Self> {
        let out = dna::reverse_complement(self.as_bytes())?;
        Ok(Self { bytes: out })
    }

    /// `len` bases from `start`, clipped to the end of the sequence.
    pub fn slice_clipped(&self, start: usize, len: usize) -> &[u8] {
        let start = start.min(self.bytes.len());
        let end = start.saturating_add(len).min(self.bytes.len());
        &self.bytes[start..end]
    }
}

impl SeqBytes for DnaSeq {
    fn as_bytes(&self) -> &[u8] {
        DnaSeq::as_bytes(self)
    }

    fn from_bytes(bytes: Vec<u8>) -> BioResult<Self> {
        DnaSeq::new(bytes)
    }
}
