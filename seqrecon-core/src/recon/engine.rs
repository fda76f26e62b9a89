use crate::error::BioResult;
use crate::io::fasta::FastaWriter;
use crate::io::tsv::alignment_records_from_path;
use crate::io::{OnError, SkippedRecord};
use crate::recon::dedup::{header_key, DedupMap, Offer, ReconciledHit};
use crate::recon::localize::localize_all;
use crate::recon::lookup::SequenceLookup;
use crate::recon::record::{AlignmentRecord, RecordLayout};
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use crate::seq::Strand;
use crate::translate::codon::CodonTable;
use crate::translate::frames::{translate_six_frames, SixFrames};
use crate::translate::stop::StopFilter;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use log::{debug, info, warn};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Blastx records below this percent identity are ignored.
pub const MIN_BLASTX_PIDENT: f64 = 70.0;
/// Blastx records shorter than this alignment length are ignored.
pub const MIN_BLASTX_LENGTH: usize = 100;

/// Per-run record counts.
///
/// `processed` records contributed at least one candidate hit, `skipped`
/// records parsed but yielded nothing (threshold, lookup miss, no match),
/// `failed` records could not be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} skipped={} failed={}",
            self.processed, self.skipped, self.failed
        )
    }
}

/// Applies the error policy to a record stream and keeps the counts.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    on_error: OnError,
    pub(crate) summary: RunSummary,
    pub(crate) skipped: Vec<SkippedRecord>,
}

impl Tally {
    pub(crate) fn new(on_error: OnError) -> Self {
        Self {
            on_error,
            ..Self::default()
        }
    }

    /// `Ok(None)` means the record failed and was recorded.
    pub(crate) fn accept(
        &mut self,
        item: BioResult<AlignmentRecord>,
    ) -> BioResult<Option<AlignmentRecord>> {
        match item {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_fatal() || self.on_error == OnError::Raise => Err(err),
            Err(err) => {
                warn!("skipping record: {err}");
                self.skipped.push(SkippedRecord::from_error(&err));
                self.summary.failed += 1;
                Ok(None)
            }
        }
    }

    pub(crate) fn processed(&mut self) {
        self.summary.processed += 1;
    }

    pub(crate) fn skip(&mut self) {
        self.summary.skipped += 1;
    }
}

/// Result of one reconciliation run.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    pub forward: DedupMap,
    /// Always empty for blastn runs.
    pub reverse: DedupMap,
    pub summary: RunSummary,
    pub skipped: Vec<SkippedRecord>,
}

impl Reconciliation {
    /// Forward hits then reverse hits, each in first-seen order.
    pub fn hits(&self) -> impl Iterator<Item = &ReconciledHit> {
        self.forward.iter().chain(self.reverse.iter())
    }

    pub fn len(&self) -> usize {
        self.forward.len() + self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `queries` unchanged, then every hit that survives `stops`.
    /// Returns the number of hits written.
    pub fn write_fasta<W: Write, S: SeqBytes>(
        &self,
        writer: &mut FastaWriter<W>,
        queries: &[SeqRecord<S>],
        stops: &StopFilter,
    ) -> BioResult<usize> {
        for query in queries {
            writer.write_record(query)?;
        }
        let mut written = 0;
        for hit in self.hits() {
            match stops.apply(&hit.seq) {
                Some(seq) if !seq.is_empty() => {
                    writer.write(&hit.header(), seq)?;
                    written += 1;
                }
                _ => debug!("{}: dropped by stop policy {}", hit.key, stops.policy),
            }
        }
        Ok(written)
    }
}

/// Runs reconciliation for one database name.
#[derive(Clone, Debug)]
pub struct Reconciler {
    db_name: Box<str>,
    on_error: OnError,
}

impl Reconciler {
    pub fn new(db_name: &str) -> Self {
        Self {
            db_name: db_name.into(),
            on_error: OnError::default(),
        }
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn on_error(&self) -> OnError {
        self.on_error
    }

    /// Protein-vs-nucleotide reconciliation.
    ///
    /// Each accepted record's peptide is searched in all six frames of the
    /// nucleotide sequence `lookup` returns for its target; forward and
    /// reverse hits are deduplicated in separate maps. A base the reverse
    /// complement cannot handle aborts the run.
    pub fn blastx<I, L>(
        &self,
        records: I,
        table: &CodonTable,
        lookup: &L,
    ) -> BioResult<Reconciliation>
    where
        I: IntoIterator<Item = BioResult<AlignmentRecord>>,
        L: SequenceLookup + ?Sized,
    {
        let mut tally = Tally::new(self.on_error);
        let mut forward = DedupMap::new();
        let mut reverse = DedupMap::new();
        let mut frames_by_target: HashMap<Box<str>, SixFrames> = HashMap::new();

        for item in records {
            let Some(record) = tally.accept(item)? else {
                continue;
            };

            let length = record.length_or_zero();
            if record.pident < MIN_BLASTX_PIDENT || length < MIN_BLASTX_LENGTH {
                debug!(
                    "line {}: {} below threshold (pident {}, length {})",
                    record.line, record.target_id, record.pident, length
                );
                tally.skip();
                continue;
            }

            let Some(nucleotides) = lookup.find(&record.target_id) else {
                warn!(
                    "line {}: no nucleotide sequence for {}",
                    record.line, record.target_id
                );
                tally.skip();
                continue;
            };

            let frames = match frames_by_target.entry(record.target_id.clone()) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(translate_six_frames(nucleotides.seq(), table)?),
            };

            let found = localize_all(
                record.fragment.as_bytes(),
                frames,
                nucleotides.seq(),
                length,
            );
            if found.is_empty() {
                debug!(
                    "line {}: peptide not found in any frame of {}",
                    record.line, record.target_id
                );
                tally.skip();
                continue;
            }

            let key = header_key(&self.db_name, &record.target_id);
            for loc in found {
                let strand = loc.strand();
                let hit = ReconciledHit {
                    key: key.clone(),
                    target_id: record.target_id.clone(),
                    pident: record.pident,
                    span: Some((loc.start, loc.end)),
                    strand,
                    frame: Some(loc.frame),
                    seq: loc.seq,
                };
                let map = match strand {
                    Strand::Forward => &mut forward,
                    Strand::Reverse => &mut reverse,
                };
                log_offer(record.line, &key, map.offer(hit));
            }
            tally.processed();
        }

        info!(
            "blastx {}: {} forward and {} reverse hits ({})",
            self.db_name,
            forward.len(),
            reverse.len(),
            tally.summary
        );
        Ok(Reconciliation {
            forward,
            reverse,
            summary: tally.summary,
            skipped: tally.skipped,
        })
    }

    /// Nucleotide-vs-nucleotide reconciliation; fragments are used as-is
    /// and all hits share one map.
    pub fn blastn<I>(&self, records: I) -> BioResult<Reconciliation>
    where
        I: IntoIterator<Item = BioResult<AlignmentRecord>>,
    {
        let mut tally = Tally::new(self.on_error);
        let mut hits = DedupMap::new();

        for item in records {
            let Some(record) = tally.accept(item)? else {
                continue;
            };
            let key = header_key(&self.db_name, &record.target_id);
            let hit = ReconciledHit {
                key: key.clone(),
                target_id: record.target_id.clone(),
                pident: record.pident,
                span: None,
                strand: Strand::Forward,
                frame: None,
                seq: record.fragment.as_bytes().to_vec(),
            };
            log_offer(record.line, &key, hits.offer(hit));
            tally.processed();
        }

        info!("blastn {}: {} hits ({})", self.db_name, hits.len(), tally.summary);
        Ok(Reconciliation {
            forward: hits,
            reverse: DedupMap::new(),
            summary: tally.summary,
            skipped: tally.skipped,
        })
    }

    /// One independent blastx run per hits file, on the thread pool when the
    /// `parallel` feature is on. Results keep the order of `hit_files`.
    pub fn blastx_batch<P, L>(
        &self,
        hit_files: &[P],
        table: &CodonTable,
        lookup: &L,
    ) -> BioResult<Vec<Reconciliation>>
    where
        P: AsRef<Path> + Sync,
        L: SequenceLookup + Sync + ?Sized,
    {
        par_try_map!(hit_files, |path: &P| {
            let records = alignment_records_from_path(path, RecordLayout::Blastx)?;
            self.blastx(records, table, lookup)
        })
    }
}

fn log_offer(line: usize, key: &str, offer: Offer) {
    match offer {
        Offer::Inserted => debug!("line {line}: new hit {key}"),
        Offer::Replaced => {}
        Offer::Kept => debug!("line {line}: kept existing hit {key}"),
    }
}
