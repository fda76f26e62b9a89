use crate::error::BioError;
use crate::seq::ReadingFrame;
use crate::translate::codon::CodonTable;
use std::fmt;
use std::str::FromStr;

fn stops_in_frame<'a>(
    bases: &'a [u8],
    skip: usize,
    table: &'a CodonTable,
) -> impl Iterator<Item = usize> + 'a {
    let start = skip.min(bases.len());
    bases[start..]
        .chunks_exact(3)
        .enumerate()
        .filter(move |(_, codon)| table.is_stop(codon))
        .map(move |(i, _)| start + i * 3)
}

/// Frame with the fewest in-frame stop codons; ties go to the lower frame.
pub fn most_open_frame(bases: &[u8], table: &CodonTable) -> ReadingFrame {
    let mut best_skip = 0usize;
    let mut best_count = usize::MAX;
    for skip in 0..3 {
        let count = stops_in_frame(bases, skip, table).count();
        if count < best_count {
            best_count = count;
            best_skip = skip;
        }
    }
    ReadingFrame::from_skip(best_skip).unwrap_or(ReadingFrame::One)
}

/// Index of the first in-frame stop codon, relative to the start of `bases`.
///
/// `frame` skips `n - 1` leading bases; `ReadingFrame::Auto` scans the frame
/// picked by [`most_open_frame`]. Returns `None` when no complete stop triplet
/// exists in that frame.
pub fn find_stop_codon(bases: &[u8], table: &CodonTable, frame: ReadingFrame) -> Option<usize> {
    let skip = match frame.skip() {
        Some(skip) => skip,
        None => most_open_frame(bases, table).skip().unwrap_or(0),
    };
    stops_in_frame(bases, skip, table).next()
}

/// What to do with a sequence that carries a premature stop codon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopPolicy {
    #[default]
    Keep,
    /// Cut the sequence just before the first in-frame stop.
    Trim,
    /// Drop the sequence entirely.
    Discard,
}

impl FromStr for StopPolicy {
    type Err = BioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(StopPolicy::Keep),
            "trim" => Ok(StopPolicy::Trim),
            "discard" => Ok(StopPolicy::Discard),
            other => Err(BioError::InvalidStopPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopPolicy::Keep => "keep",
            StopPolicy::Trim => "trim",
            StopPolicy::Discard => "discard",
        };
        write!(f, "{s}")
    }
}

/// Apply `policy` to `bases`; `None` means the sequence was discarded.
pub fn apply_stop_policy<'a>(
    bases: &'a [u8],
    table: &CodonTable,
    frame: ReadingFrame,
    policy: StopPolicy,
) -> Option<&'a [u8]> {
    if policy == StopPolicy::Keep {
        return Some(bases);
    }
    match (find_stop_codon(bases, table, frame), policy) {
        (None, _) => Some(bases),
        (Some(pos), StopPolicy::Trim) => Some(&bases[..pos]),
        (Some(_), _) => None,
    }
}

/// A stop policy bound to the table and frame it scans with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopFilter {
    pub table: CodonTable,
    pub frame: ReadingFrame,
    pub policy: StopPolicy,
}

impl StopFilter {
    pub fn new(table: CodonTable, frame: ReadingFrame, policy: StopPolicy) -> Self {
        Self {
            table,
            frame,
            policy,
        }
    }

    pub fn apply<'a>(&self, bases: &'a [u8]) -> Option<&'a [u8]> {
        apply_stop_policy(bases, &self.table, self.frame, self.policy)
    }
}
