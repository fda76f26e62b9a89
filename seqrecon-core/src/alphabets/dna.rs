use crate::alphabets::Alphabet;
use crate::error::{BioError, BioResult};
use std::sync::LazyLock;

pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ACGTRYSWKMBDHVNZacgtryswkmbdhvnz")
}

// 0 marks bytes with no complement.
static COMPLEMENT: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut comp = [0u8; 256];
    b"ACGT".iter().zip(b"TGCA".iter()).for_each(|(&a, &b)| {
        comp[a as usize] = b;
        comp[a as usize + 32] = b + 32;
    });
    comp
});

#[inline]
pub fn complement(a: u8) -> Option<u8> {
    match COMPLEMENT[a as usize] {
        0 => None,
        c => Some(c),
    }
}

/// Reverse complement over the strict A/C/G/T alphabet (either case).
///
/// Any other byte is reported with its position in `text`; ambiguity codes
/// are not silently carried onto the opposite strand.
pub fn reverse_complement(text: &[u8]) -> BioResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for (pos, &a) in text.iter().enumerate().rev() {
        match complement(a) {
            Some(c) => out.push(c),
            None => {
                return Err(BioError::InvalidChar {
                    ch: a as char,
                    pos,
                })
            }
        }
    }
    Ok(out)
}
