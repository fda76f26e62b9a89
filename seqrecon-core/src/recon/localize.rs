//! Maps a peptide found in one translated frame back onto nucleotides.

use crate::seq::dna::DnaSeq;
use crate::seq::{Frame, Strand};
use crate::translate::frames::{SixFrames, TranslatedFrame};

/// Nucleotide offset for a peptide found at `idx` in a translated frame.
///
/// `0` stays `0`; every other index maps to `idx * 3 + 1`. The frame's own
/// offset is not added. Downstream output depends on this exact rule.
#[inline]
pub const fn nucleotide_offset(idx: usize) -> usize {
    if idx == 0 {
        0
    } else {
        idx * 3 + 1
    }
}

/// A fragment recovered from one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Localized {
    pub frame: Frame,
    /// Half-open span on the forward strand of the original sequence.
    pub start: usize,
    pub end: usize,
    pub seq: Vec<u8>,
}

impl Localized {
    pub fn strand(&self) -> Strand {
        self.frame.strand()
    }
}

/// Locate `peptide` in `translated` and cut `alignment_length * 3` bases at
/// the matching offset.
///
/// Forward frames cut from `seq`. Reverse frames cut from `reverse_complement`
/// and then reverse the cut (it is already complemented). Cuts are clipped at
/// the sequence end; an empty cut yields `None`.
pub fn localize(
    peptide: &[u8],
    translated: &TranslatedFrame,
    seq: &DnaSeq,
    reverse_complement: &DnaSeq,
    alignment_length: usize,
) -> Option<Localized> {
    let idx = translated.protein.find(peptide)?;
    let offset = nucleotide_offset(idx);
    let span_len = alignment_length.saturating_mul(3);
    let total = seq.len();

    let (start, end, out) = match translated.strand() {
        Strand::Forward => {
            let cut = seq.slice_clipped(offset, span_len);
            let start = offset.min(total);
            (start, start + cut.len(), cut.to_vec())
        }
        Strand::Reverse => {
            let cut = reverse_complement.slice_clipped(offset, span_len);
            let rc_start = offset.min(total);
            let rc_end = rc_start + cut.len();
            let mut out = cut.to_vec();
            out.reverse();
            (total - rc_end, total - rc_start, out)
        }
    };

    if out.is_empty() {
        return None;
    }
    Some(Localized {
        frame: translated.frame,
        start,
        end,
        seq: out,
    })
}

/// Every frame in which `peptide` localizes, forward frames first.
pub fn localize_all(
    peptide: &[u8],
    frames: &SixFrames,
    seq: &DnaSeq,
    alignment_length: usize,
) -> Vec<Localized> {
    frames
        .iter()
        .filter_map(|tf| {
            localize(
                peptide,
                tf,
                seq,
                frames.reverse_complement(),
                alignment_length,
            )
        })
        .collect()
}
