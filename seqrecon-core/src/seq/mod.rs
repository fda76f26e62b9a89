pub mod bytes;
pub mod dna;
pub mod protein;
pub mod record;
pub mod traits;

pub use record::SeqRecord;

use crate::error::{BioError, BioResult};
use std::fmt;
use std::str::FromStr;

/// Declared forward reading frame, 1-based, or `Auto` to let the caller pick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadingFrame {
    #[default]
    One,
    Two,
    Three,
    Auto,
}

impl ReadingFrame {
    /// Number of leading bases skipped before the first codon.
    pub fn skip(self) -> Option<usize> {
        match self {
            ReadingFrame::One => Some(0),
            ReadingFrame::Two => Some(1),
            ReadingFrame::Three => Some(2),
            ReadingFrame::Auto => None,
        }
    }

    pub fn from_skip(skip: usize) -> BioResult<Self> {
        match skip {
            0 => Ok(ReadingFrame::One),
            1 => Ok(ReadingFrame::Two),
            2 => Ok(ReadingFrame::Three),
            other => Err(BioError::InvalidFrame {
                frame: (other + 1).to_string(),
            }),
        }
    }
}

impl FromStr for ReadingFrame {
    type Err = BioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" => Ok(ReadingFrame::One),
            "2" => Ok(ReadingFrame::Two),
            "3" => Ok(ReadingFrame::Three),
            "auto" => Ok(ReadingFrame::Auto),
            other => Err(BioError::InvalidFrame {
                frame: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingFrame::One => write!(f, "1"),
            ReadingFrame::Two => write!(f, "2"),
            ReadingFrame::Three => write!(f, "3"),
            ReadingFrame::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

/// One of the six translation frames of a nucleotide sequence.
///
/// Reverse frames are read from the reverse complement of the whole sequence,
/// starting `offset()` bases into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    Forward0,
    Forward1,
    Forward2,
    Reverse0,
    Reverse1,
    Reverse2,
}

impl Frame {
    pub const ALL: [Frame; 6] = [
        Frame::Forward0,
        Frame::Forward1,
        Frame::Forward2,
        Frame::Reverse0,
        Frame::Reverse1,
        Frame::Reverse2,
    ];

    pub fn strand(self) -> Strand {
        match self {
            Frame::Forward0 | Frame::Forward1 | Frame::Forward2 => Strand::Forward,
            Frame::Reverse0 | Frame::Reverse1 | Frame::Reverse2 => Strand::Reverse,
        }
    }

    /// Position in [`Frame::ALL`].
    pub fn index(self) -> usize {
        match self.strand() {
            Strand::Forward => self.offset(),
            Strand::Reverse => 3 + self.offset(),
        }
    }

    pub fn offset(self) -> usize {
        match self {
            Frame::Forward0 | Frame::Reverse0 => 0,
            Frame::Forward1 | Frame::Reverse1 => 1,
            Frame::Forward2 | Frame::Reverse2 => 2,
        }
    }

    /// Map an aligner frame indicator (`1..=3`, `-1..=-3`) onto a frame.
    pub fn from_blast(frame: i8) -> Option<Frame> {
        match frame {
            1 => Some(Frame::Forward0),
            2 => Some(Frame::Forward1),
            3 => Some(Frame::Forward2),
            -1 => Some(Frame::Reverse0),
            -2 => Some(Frame::Reverse1),
            -3 => Some(Frame::Reverse2),
            _ => None,
        }
    }

    pub fn to_blast(self) -> i8 {
        let n = self.offset() as i8 + 1;
        match self.strand() {
            Strand::Forward => n,
            Strand::Reverse => -n,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.to_blast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_blast_indicator_roundtrip() {
        for frame in Frame::ALL {
            assert_eq!(Frame::from_blast(frame.to_blast()), Some(frame));
        }
        assert_eq!(Frame::from_blast(0), None);
        assert_eq!(Frame::from_blast(4), None);
    }

    #[test]
    fn frame_index_matches_all_order() {
        for (i, frame) in Frame::ALL.iter().enumerate() {
            assert_eq!(frame.index(), i);
        }
    }

    #[test]
    fn frame_display_is_signed() {
        assert_eq!(Frame::Forward1.to_string(), "+2");
        assert_eq!(Frame::Reverse0.to_string(), "-1");
    }

    #[test]
    fn reading_frame_parse() {
        assert_eq!("1".parse::<ReadingFrame>().unwrap(), ReadingFrame::One);
        assert_eq!(" AUTO ".parse::<ReadingFrame>().unwrap(), ReadingFrame::Auto);
        assert!("4".parse::<ReadingFrame>().is_err());
        assert!(ReadingFrame::from_skip(3).is_err());
    }
}
