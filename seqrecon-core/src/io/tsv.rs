use crate::error::{BioError, BioResult};
use crate::recon::record::{AlignmentRecord, RecordLayout};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streams typed records out of tab-separated aligner output.
///
/// Lines starting with `#` are treated as aligner comments and skipped.
/// Short or unparsable lines come back as [`BioError::MalformedRecord`];
/// I/O failures as [`BioError::TsvParse`].
pub struct AlignmentRecords<R> {
    inner: StringRecordsIntoIter<R>,
    layout: RecordLayout,
    path: String,
}

fn is_comment(record: &StringRecord) -> bool {
    record.get(0).is_some_and(|first| first.starts_with('#'))
}

impl<R: Read> Iterator for AlignmentRecords<R> {
    type Item = BioResult<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        // csv's own comment handling misreports the position of the record
        // that follows a comment block, so comments are dropped here.
        let record = loop {
            match self.inner.next()? {
                Ok(record) if is_comment(&record) => continue,
                Ok(record) => break record,
                Err(err) if err.is_io_error() => {
                    return Some(Err(BioError::TsvParse {
                        path: self.path.clone(),
                        source: err,
                    }))
                }
                Err(err) => {
                    let line = err.position().map_or(0, |p| p.line() as usize);
                    return Some(Err(BioError::MalformedRecord {
                        line,
                        msg: err.to_string(),
                    }));
                }
            }
        };

        let line = record.position().map_or(0, |p| p.line() as usize);
        let fields: Vec<&str> = record.iter().collect();
        Some(self.layout.parse(line, &fields))
    }
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

pub fn alignment_records_from_reader<R: Read>(
    reader: R,
    layout: RecordLayout,
) -> AlignmentRecords<R> {
    AlignmentRecords {
        inner: builder().from_reader(reader).into_records(),
        layout,
        path: "<reader>".to_string(),
    }
}

pub fn alignment_records_from_path(
    path: impl AsRef<Path>,
    layout: RecordLayout,
) -> BioResult<AlignmentRecords<File>> {
    let path_ref = path.as_ref();
    let path_str = path_ref.display().to_string();
    let reader = builder()
        .from_path(path_ref)
        .map_err(|e| BioError::TsvParse {
            path: path_str.clone(),
            source: e,
        })?;
    Ok(AlignmentRecords {
        inner: reader.into_records(),
        layout,
        path: path_str,
    })
}

pub fn alignment_records_from_bytes(
    data: &[u8],
    layout: RecordLayout,
) -> AlignmentRecords<&[u8]> {
    alignment_records_from_reader(data, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_records_with_line_numbers() {
        let data = b"# BLASTX 2.15\n120\t88.0\tq1\tt1\tMKV\t1\t0\n130\t91.0\tq1\tt2\tMKL\t-1\t0\n";
        let records: Vec<_> = alignment_records_from_bytes(data, RecordLayout::Blastx)
            .collect::<BioResult<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&*records[1].target_id, "t2");
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn malformed_line_after_comment_block_names_its_own_line() {
        let data = b"# c1\n# c2\n10\t90\tq\n10\t90\tq\tt\tACGT\n";
        let out: Vec<_> = alignment_records_from_bytes(data, RecordLayout::Blastn).collect();
        assert_eq!(out.len(), 2);
        match &out[0] {
            Err(BioError::MalformedRecord { line, .. }) => assert_eq!(*line, 3),
            other => panic!("expected malformed record, got {other:?}"),
        }
        assert_eq!(out[1].as_ref().unwrap().line, 4);
    }

    #[test]
    fn comments_between_records_keep_physical_lines() {
        let data = b"10\t90\tq\tt1\tACGT\n# mid-file comment\n12\t91\tq\tt2\tACGTAC\n";
        let records: Vec<_> = alignment_records_from_bytes(data, RecordLayout::Blastn)
            .collect::<BioResult<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn short_line_is_reported_not_dropped() {
        let data = b"10\t90\tq\tt\tACGT\n10\t90\tq\n11\t95\tq\tt\tACGTA\n";
        let out: Vec<_> = alignment_records_from_bytes(data, RecordLayout::Blastn).collect();
        assert_eq!(out.len(), 3);
        assert!(out[0].is_ok());
        match &out[1] {
            Err(BioError::MalformedRecord { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected malformed record, got {other:?}"),
        }
        assert!(out[2].is_ok());
    }

    #[test]
    fn quotes_are_literal() {
        let data = b"q\tt\tacc\t\"quoted\" title\t99.0\tACGT\n";
        let rec = alignment_records_from_bytes(data, RecordLayout::Museoscript)
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(&*rec.fragment, "ACGT");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = alignment_records_from_path("/nonexistent/hits.tsv", RecordLayout::Blastn)
            .err()
            .unwrap();
        assert!(err.is_fatal());
        assert!(matches!(err, BioError::TsvParse { .. }));
    }
}
