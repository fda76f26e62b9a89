use crate::error::{BioError, BioResult};
use crate::seq::Frame;
use std::fmt;
use std::str::FromStr;

/// Column layout of the aligner's tabular output.
///
/// | layout        | columns                                              |
/// |---------------|------------------------------------------------------|
/// | `Blastx`      | length, pident, qseqid, sseqid, sseq, qframe, sframe |
/// | `Blastn`      | length, pident, qseqid, sseqid, sseq                 |
/// | `Museoscript` | qseqid, sseqid, sacc, stitle, pident, qseq           |
///
/// Extra trailing columns are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordLayout {
    Blastx,
    Blastn,
    Museoscript,
}

impl RecordLayout {
    pub fn min_fields(self) -> usize {
        match self {
            RecordLayout::Blastx => 7,
            RecordLayout::Blastn => 5,
            RecordLayout::Museoscript => 6,
        }
    }

    /// Build a record from one line already split on tabs.
    pub fn parse(self, line: usize, fields: &[&str]) -> BioResult<AlignmentRecord> {
        if fields.len() < self.min_fields() {
            return Err(BioError::MalformedRecord {
                line,
                msg: format!(
                    "{self} record needs at least {} columns, found {}",
                    self.min_fields(),
                    fields.len()
                ),
            });
        }

        match self {
            RecordLayout::Blastx | RecordLayout::Blastn => {
                let query_frame = match self {
                    RecordLayout::Blastx => parse_frame(line, fields[5])?,
                    _ => None,
                };
                Ok(AlignmentRecord {
                    line,
                    length: Some(parse_num(line, "length", fields[0])?),
                    pident: parse_pident(line, fields[1])?,
                    query_id: required(line, "qseqid", fields[2])?,
                    target_id: required(line, "sseqid", fields[3])?,
                    fragment: required(line, "sseq", fields[4])?,
                    query_frame,
                })
            }
            RecordLayout::Museoscript => Ok(AlignmentRecord {
                line,
                length: None,
                pident: parse_pident(line, fields[4])?,
                query_id: required(line, "qseqid", fields[0])?,
                target_id: required(line, "sseqid", fields[1])?,
                fragment: required(line, "qseq", fields[5])?,
                query_frame: None,
            }),
        }
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordLayout::Blastx => "blastx",
            RecordLayout::Blastn => "blastn",
            RecordLayout::Museoscript => "museoscript",
        };
        write!(f, "{s}")
    }
}

/// One parsed line of aligner output. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentRecord {
    /// 1-based line in the source file.
    pub line: usize,
    pub query_id: Box<str>,
    pub target_id: Box<str>,
    pub pident: f64,
    /// Alignment length; absent in the museoscript layout.
    pub length: Option<usize>,
    pub query_frame: Option<Frame>,
    /// Aligned fragment: a peptide for blastx, nucleotides otherwise.
    pub fragment: Box<str>,
}

impl AlignmentRecord {
    pub fn length_or_zero(&self) -> usize {
        self.length.unwrap_or(0)
    }
}

fn required(line: usize, column: &str, value: &str) -> BioResult<Box<str>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BioError::MalformedRecord {
            line,
            msg: format!("empty {column} column"),
        });
    }
    Ok(value.into())
}

fn parse_num<T: FromStr>(line: usize, column: &str, value: &str) -> BioResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| BioError::MalformedRecord {
            line,
            msg: format!("{column} column is not a number: {value:?}"),
        })
}

fn parse_pident(line: usize, value: &str) -> BioResult<f64> {
    let pident: f64 = parse_num(line, "pident", value)?;
    if !(0.0..=100.0).contains(&pident) {
        return Err(BioError::MalformedRecord {
            line,
            msg: format!("pident {pident} outside 0-100"),
        });
    }
    Ok(pident)
}

fn parse_frame(line: usize, value: &str) -> BioResult<Option<Frame>> {
    let raw: i8 = parse_num(line, "qframe", value)?;
    Ok(Frame::from_blast(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_blastx() {
        let fields = ["120", "87.5", "q1", "sp|P1|X", "MKVL", "-2", "0"];
        let rec = RecordLayout::Blastx.parse(3, &fields).unwrap();
        assert_eq!(rec.line, 3);
        assert_eq!(rec.length, Some(120));
        assert_eq!(rec.pident, 87.5);
        assert_eq!(&*rec.query_id, "q1");
        assert_eq!(&*rec.target_id, "sp|P1|X");
        assert_eq!(&*rec.fragment, "MKVL");
        assert_eq!(rec.query_frame, Some(Frame::Reverse1));
    }

    #[test]
    fn parse_blastn_ignores_extra_columns() {
        let fields = ["50", "99.000", "q1", "t1", "ACGT", "1e-20", "extra"];
        let rec = RecordLayout::Blastn.parse(1, &fields).unwrap();
        assert_eq!(rec.length, Some(50));
        assert_eq!(rec.query_frame, None);
        assert_eq!(&*rec.fragment, "ACGT");
    }

    #[test]
    fn parse_museoscript() {
        let fields = ["read7", "t9", "ACC9", "some title", "91.2", "ACGTAC"];
        let rec = RecordLayout::Museoscript.parse(1, &fields).unwrap();
        assert_eq!(&*rec.query_id, "read7");
        assert_eq!(&*rec.target_id, "t9");
        assert_eq!(rec.pident, 91.2);
        assert_eq!(rec.length, None);
        assert_eq!(rec.length_or_zero(), 0);
        assert_eq!(&*rec.fragment, "ACGTAC");
    }

    #[test]
    fn too_few_columns_names_the_line() {
        let err = RecordLayout::Blastx
            .parse(12, &["100", "90", "q", "t", "MK"])
            .unwrap_err();
        match err {
            BioError::MalformedRecord { line, msg } => {
                assert_eq!(line, 12);
                assert!(msg.contains("at least 7"));
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn bad_numbers_are_malformed() {
        let err = RecordLayout::Blastn
            .parse(2, &["abc", "90", "q", "t", "AC"])
            .unwrap_err();
        assert!(matches!(err, BioError::MalformedRecord { line: 2, .. }));

        let err = RecordLayout::Blastn
            .parse(2, &["10", "190", "q", "t", "AC"])
            .unwrap_err();
        assert!(matches!(err, BioError::MalformedRecord { .. }));

        let err = RecordLayout::Blastx
            .parse(2, &["10", "90", "q", "t", "MK", "plus", "0"])
            .unwrap_err();
        assert!(matches!(err, BioError::MalformedRecord { .. }));
    }

    #[test]
    fn empty_target_is_malformed() {
        let err = RecordLayout::Blastn
            .parse(4, &["10", "90", "q", " ", "AC"])
            .unwrap_err();
        assert!(matches!(err, BioError::MalformedRecord { line: 4, .. }));
    }
}
