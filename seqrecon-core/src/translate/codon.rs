use crate::error::{BioError, BioResult};
use std::sync::LazyLock;

/// Emitted for codons the table marks as stops.
pub const STOP_SYMBOL: u8 = b'X';
/// Emitted for triplets containing anything other than A/C/G/T(U).
pub const UNKNOWN_SYMBOL: u8 = b'?';

pub const STANDARD_TABLE_ID: u8 = 1;

// Codon order AAA, AAC, AAG, AAT, ACA, ... TTT (A=0, C=1, G=2, T=3).
// '*' marks stop codons inside the tables only.
const TABLE_1: [u8; 64] = *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";
const TABLE_2: [u8; 64] = *b"KNKNTTTT*S*SMIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSSWCWCLFLF";
const TABLE_3: [u8; 64] = *b"KNKNTTTTRSRSMIMIQHQHPPPPRRRRTTTTEDEDAAAAGGGGVVVV*Y*YSSSSWCWCLFLF";
const TABLE_4: [u8; 64] = *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSSWCWCLFLF";
const TABLE_5: [u8; 64] = *b"KNKNTTTTSSSSMIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSSWCWCLFLF";
const TABLE_6: [u8; 64] = *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVVQYQYSSSS*CWCLFLF";

const TABLE_STOP: u8 = b'*';
const BASES: [u8; 4] = *b"ACGT";

static BASE_INDEX: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [255u8; 256];
    for (i, &b) in BASES.iter().enumerate() {
        map[b as usize] = i as u8;
        map[b.to_ascii_lowercase() as usize] = i as u8;
    }
    map[b'U' as usize] = 3;
    map[b'u' as usize] = 3;
    map
});

#[inline]
fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let i1 = BASE_INDEX[codon[0] as usize];
    let i2 = BASE_INDEX[codon[1] as usize];
    let i3 = BASE_INDEX[codon[2] as usize];
    if i1 < 4 && i2 < 4 && i3 < 4 {
        Some(((i1 as usize) << 4) | ((i2 as usize) << 2) | (i3 as usize))
    } else {
        None
    }
}

fn index_to_codon(idx: usize) -> [u8; 3] {
    [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]]
}

/// NCBI genetic code, immutable once built.
///
/// Supported ids: 1 (standard), 2 (vertebrate mitochondrial), 3 (yeast
/// mitochondrial), 4 (mycoplasma/spiroplasma), 5 (invertebrate
/// mitochondrial), 6 (ciliate nuclear) and 11 (bacterial/plastid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonTable {
    id: u8,
    amino: [u8; 64],
}

impl CodonTable {
    pub fn new(id: u8) -> BioResult<Self> {
        let amino = match id {
            1 | 11 => TABLE_1,
            2 => TABLE_2,
            3 => TABLE_3,
            4 => TABLE_4,
            5 => TABLE_5,
            6 => TABLE_6,
            _ => return Err(BioError::UnknownCodonTable { id }),
        };
        Ok(Self { id, amino })
    }

    pub fn standard() -> Self {
        Self {
            id: STANDARD_TABLE_ID,
            amino: TABLE_1,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// Never fails: stops give [`STOP_SYMBOL`], ambiguous triplets
    /// [`UNKNOWN_SYMBOL`].
    #[inline]
    pub fn translate_triplet(&self, codon: &[u8]) -> u8 {
        match codon_index(codon) {
            Some(idx) if self.amino[idx] == TABLE_STOP => STOP_SYMBOL,
            Some(idx) => self.amino[idx],
            None => UNKNOWN_SYMBOL,
        }
    }

    #[inline]
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        codon_index(codon).is_some_and(|idx| self.amino[idx] == TABLE_STOP)
    }

    /// Stop triplets of this table, upper-case DNA, in codon order.
    pub fn stop_codons(&self) -> Vec<[u8; 3]> {
        self.amino
            .iter()
            .enumerate()
            .filter(|(_, &aa)| aa == TABLE_STOP)
            .map(|(idx, _)| index_to_codon(idx))
            .collect()
    }

    /// Translate non-overlapping triplets; a trailing partial codon is dropped.
    pub fn translate(&self, bases: &[u8]) -> Vec<u8> {
        bases
            .chunks_exact(3)
            .map(|codon| self.translate_triplet(codon))
            .collect()
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::standard()
    }
}
