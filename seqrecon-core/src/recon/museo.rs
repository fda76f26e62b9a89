//! Identity-threshold filter over museoscript-style records.

use crate::error::BioResult;
use crate::io::fasta::FastaWriter;
use crate::io::{OnError, SkippedRecord};
use crate::recon::dedup::format_pident;
use crate::recon::engine::{RunSummary, Tally};
use crate::recon::lookup::SequenceLookup;
use crate::recon::record::AlignmentRecord;
use log::{info, warn};
use std::fmt;
use std::io::Write;

/// Where the emitted sequence comes from.
#[derive(Clone, Copy)]
pub enum ReadSource<'a> {
    /// The matched fragment reported by the aligner.
    Fragment,
    /// The full query read, looked up by query id.
    Original(&'a dyn SequenceLookup),
}

impl fmt::Debug for ReadSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadSource::Fragment => f.write_str("Fragment"),
            ReadSource::Original(_) => f.write_str("Original(..)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MuseoHit {
    pub header: String,
    pub seq: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct MuseoReport {
    pub hits: Vec<MuseoHit>,
    pub summary: RunSummary,
    pub skipped: Vec<SkippedRecord>,
}

impl MuseoReport {
    pub fn write_fasta<W: Write>(&self, writer: &mut FastaWriter<W>) -> BioResult<usize> {
        for hit in &self.hits {
            writer.write(&hit.header, &hit.seq)?;
        }
        Ok(self.hits.len())
    }
}

/// `{query}_{target}_{pident}` with pident at three decimals.
pub fn museo_header(record: &AlignmentRecord) -> String {
    format!(
        "{}_{}_{}",
        record.query_id,
        record.target_id,
        format_pident(record.pident)
    )
}

/// Keep every record with `pident >= threshold`, in input order. Repeated
/// query/target pairs are all kept.
pub fn museoscript<I>(
    records: I,
    threshold: f64,
    source: ReadSource<'_>,
    on_error: OnError,
) -> BioResult<MuseoReport>
where
    I: IntoIterator<Item = BioResult<AlignmentRecord>>,
{
    let mut tally = Tally::new(on_error);
    let mut hits = Vec::new();

    for item in records {
        let Some(record) = tally.accept(item)? else {
            continue;
        };
        if record.pident < threshold {
            tally.skip();
            continue;
        }

        let seq = match source {
            ReadSource::Fragment => record.fragment.as_bytes().to_vec(),
            ReadSource::Original(reads) => match reads.find(&record.query_id) {
                Some(read) => read.seq().as_bytes().to_vec(),
                None => {
                    warn!(
                        "line {}: no read matching {}",
                        record.line, record.query_id
                    );
                    tally.skip();
                    continue;
                }
            },
        };

        hits.push(MuseoHit {
            header: museo_header(&record),
            seq,
        });
        tally.processed();
    }

    info!(
        "museoscript: {} hits at pident >= {threshold} ({})",
        hits.len(),
        tally.summary
    );
    Ok(MuseoReport {
        hits,
        summary: tally.summary,
        skipped: tally.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recon::lookup::LinearLookup;

    #[test]
    fn read_source_debug() {
        let reads = LinearLookup::new(Vec::new());
        assert_eq!(format!("{:?}", ReadSource::Fragment), "Fragment");
        assert_eq!(format!("{:?}", ReadSource::Original(&reads)), "Original(..)");
    }
}
