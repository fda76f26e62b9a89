use crate::error::BioResult;
use crate::seq::dna::DnaSeq;
use crate::seq::protein::ProteinSeq;
use crate::seq::record::SeqRecord;
use crate::seq::{Frame, Strand};
use crate::translate::codon::CodonTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatedFrame {
    pub frame: Frame,
    pub protein: ProteinSeq,
}

impl TranslatedFrame {
    pub fn strand(&self) -> Strand {
        self.frame.strand()
    }
}

/// The six translations of one nucleotide sequence, in [`Frame::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SixFrames {
    frames: [TranslatedFrame; 6],
    reverse_complement: DnaSeq,
}

impl SixFrames {
    pub fn get(&self, frame: Frame) -> &TranslatedFrame {
        &self.frames[frame.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslatedFrame> {
        self.frames.iter()
    }

    pub fn forward(&self) -> &[TranslatedFrame] {
        &self.frames[..3]
    }

    pub fn reverse(&self) -> &[TranslatedFrame] {
        &self.frames[3..]
    }

    /// Reverse complement the reverse frames were read from.
    pub fn reverse_complement(&self) -> &DnaSeq {
        &self.reverse_complement
    }

    pub fn into_strings(self) -> [String; 6] {
        self.frames.map(|f| f.protein.as_str().to_string())
    }
}

/// Translate `bases` from `offset` in non-overlapping triplets.
pub fn translate_frame(bases: &[u8], offset: usize, table: &CodonTable) -> ProteinSeq {
    if bases.len() <= offset {
        return ProteinSeq::default();
    }
    ProteinSeq::from_bytes_unchecked(table.translate(&bases[offset..]))
}

/// Forward frames 0..3 of `seq`, then frames 0..3 of its reverse complement.
///
/// Fails only when the reverse complement meets a base outside A/C/G/T.
pub fn translate_six_frames(seq: &DnaSeq, table: &CodonTable) -> BioResult<SixFrames> {
    let rc = seq.reverse_complement()?;
    let frames = Frame::ALL.map(|frame| {
        let source = match frame.strand() {
            Strand::Forward => seq.as_bytes(),
            Strand::Reverse => rc.as_bytes(),
        };
        TranslatedFrame {
            frame,
            protein: translate_frame(source, frame.offset(), table),
        }
    });
    Ok(SixFrames {
        frames,
        reverse_complement: rc,
    })
}

/// Six-frame translation of every record; parallel with the `parallel` feature.
pub fn translate_records(
    records: &[SeqRecord<DnaSeq>],
    table: &CodonTable,
) -> BioResult<Vec<SixFrames>> {
    par_try_map!(records, |record: &SeqRecord<DnaSeq>| {
        translate_six_frames(record.seq(), table)
    })
}
