use super::*;
use crate::error::{BioError, BioResult};
use crate::io::fasta::FastaWriter;
use crate::io::tsv::alignment_records_from_bytes;
use crate::io::OnError;
use crate::seq::dna::DnaSeq;
use crate::seq::record::SeqRecord;
use crate::seq::{Frame, ReadingFrame, Strand};
use crate::translate::codon::CodonTable;
use crate::translate::stop::{StopFilter, StopPolicy};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn nucleotides(entries: &[(&str, &str)]) -> Vec<SeqRecord<DnaSeq>> {
    entries
        .iter()
        .map(|(id, seq)| SeqRecord::new(*id, DnaSeq::new(seq.as_bytes().to_vec()).unwrap()))
        .collect()
}

fn blastx_rows(data: &str) -> Vec<BioResult<AlignmentRecord>> {
    alignment_records_from_bytes(data.as_bytes(), RecordLayout::Blastx).collect()
}

fn blastn_rows(data: &str) -> Vec<BioResult<AlignmentRecord>> {
    alignment_records_from_bytes(data.as_bytes(), RecordLayout::Blastn).collect()
}

fn write_temp_tsv(tag: &str, contents: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("seqrecon_{tag}_{nanos}.tsv"));
    fs::write(&path, contents).unwrap();
    path
}

// ─── blastx ─────────────────────────────────────────────────

#[test]
fn blastx_forward_hit_is_cut_from_original() {
    let lookup = LinearLookup::new(nucleotides(&[("t1", "ATGAAATAG")]));
    let rows = blastx_rows("100\t90.0\tq1\tt1\tMK\t1\t0\n");
    let out = Reconciler::new("nr")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();

    assert_eq!(out.forward.len(), 1);
    assert!(out.reverse.is_empty());
    let hit = out.forward.get("nr_t1").unwrap();
    // 300 bases requested, clipped to the 9 available
    assert_eq!(hit.seq, b"ATGAAATAG");
    assert_eq!(hit.span, Some((0, 9)));
    assert_eq!(hit.frame, Some(Frame::Forward0));
    assert_eq!(hit.header(), "nr_t1_pident_90.000");
    assert_eq!(out.summary.processed, 1);
}

#[test]
fn blastx_reverse_hit_goes_to_reverse_map() {
    // reverse complement CTATTTCAT translates to L F H
    let lookup = LinearLookup::new(nucleotides(&[("t1", "ATGAAATAG")]));
    let rows = blastx_rows("100\t80.0\tq1\tt1\tLF\t-1\t0\n");
    let out = Reconciler::new("nr")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();

    assert!(out.forward.is_empty());
    let hit = out.reverse.get("nr_t1").unwrap();
    assert_eq!(hit.strand, Strand::Reverse);
    assert_eq!(hit.seq, b"TACTTTATC");
}

#[test]
fn blastx_equal_length_higher_identity_wins() {
    let lookup = IndexedLookup::new(nucleotides(&[("t1", "ATGAAATAG")]));
    let rows = blastx_rows("100\t90.0\tq1\tt1\tMK\t1\t0\n100\t95.0\tq1\tt1\tMK\t1\t0\n");
    let out = Reconciler::new("nr")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();
    assert_eq!(out.forward.len(), 1);
    assert_eq!(out.forward.get("nr_t1").unwrap().pident, 95.0);
    assert_eq!(out.summary.processed, 2);
}

#[test]
fn blastx_thresholds_are_inclusive() {
    let lookup = LinearLookup::new(nucleotides(&[
        ("t1", "ATGAAATAG"),
        ("t2", "ATGAAATAG"),
        ("t3", "ATGAAATAG"),
    ]));
    let rows = blastx_rows(
        "100\t69.9\tq1\tt1\tMK\t1\t0\n\
         99\t99.0\tq1\tt2\tMK\t1\t0\n\
         100\t70.0\tq1\tt3\tMK\t1\t0\n",
    );
    let out = Reconciler::new("nr")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();
    let keys: Vec<&str> = out.hits().map(|h| &*h.key).collect();
    assert_eq!(keys, vec!["nr_t3"]);
    assert_eq!(out.summary.skipped, 2);
    assert_eq!(MIN_BLASTX_PIDENT, 70.0);
    assert_eq!(MIN_BLASTX_LENGTH, 100);
}

#[test]
fn blastx_lookup_miss_is_skipped() {
    let lookup = LinearLookup::new(nucleotides(&[("t1", "ATGAAATAG")]));
    let rows = blastx_rows("100\t90.0\tq1\tother\tMK\t1\t0\n100\t90.0\tq1\tt1\tWW\t1\t0\n");
    let out = Reconciler::new("nr")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(
        out.summary,
        RunSummary {
            processed: 0,
            skipped: 2,
            failed: 0
        }
    );
}

#[test]
fn blastx_invalid_base_aborts_even_when_skipping() {
    let lookup = LinearLookup::new(nucleotides(&[("t1", "ATGNAATAG")]));
    let rows = blastx_rows("100\t90.0\tq1\tt1\tMK\t1\t0\n");
    let err = Reconciler::new("nr")
        .with_on_error(OnError::Skip)
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap_err();
    assert!(matches!(err, BioError::InvalidChar { ch: 'N', pos: 3 }));
}

#[test]
fn blastx_output_is_forward_then_reverse() {
    let lookup = LinearLookup::new(nucleotides(&[("t1", "ATGAAATAG"), ("t2", "ATGAAATAG")]));
    let rows = blastx_rows("100\t80.0\tq1\tt2\tLF\t-1\t0\n100\t90.0\tq1\tt1\tMK\t1\t0\n");
    let out = Reconciler::new("db")
        .blastx(rows, &CodonTable::standard(), &lookup)
        .unwrap();
    let headers: Vec<String> = out.hits().map(|h| h.header()).collect();
    assert_eq!(headers, vec!["db_t1_pident_90.000", "db_t2_pident_80.000"]);
}

// ─── error policy ───────────────────────────────────────────

#[test]
fn malformed_rows_are_counted_when_skipping() {
    let rows = blastn_rows("10\t90\tq\tt1\tACGT\nbad\t90\tq\tt2\tAC\n10\t90\tq\n");
    let out = Reconciler::new("db").blastn(rows).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.summary.failed, 2);
    assert_eq!(out.skipped.len(), 2);
    assert_eq!(out.skipped[0].row, 2);
    assert_eq!(out.summary.total(), 3);
}

#[test]
fn malformed_rows_abort_when_raising() {
    let rows = blastn_rows("10\t90\tq\tt1\tACGT\nbad\t90\tq\tt2\tAC\n");
    let err = Reconciler::new("db")
        .with_on_error(OnError::Raise)
        .blastn(rows)
        .unwrap_err();
    assert!(matches!(err, BioError::MalformedRecord { line: 2, .. }));
}

// ─── blastn ─────────────────────────────────────────────────

#[test]
fn blastn_uses_fragment_and_tie_breaks() {
    let rows = blastn_rows(
        "9\t90\tq1\tt1\tATGAAATAG\n\
         9\t95\tq1\tt1\tATGAAATAG\n\
         5\t99\tq1\tt2\tACGTA\n\
         6\t50\tq1\tt2\tACGTAC\n\
         5\t99\tq1\tt2\tTTTTT\n",
    );
    let out = Reconciler::new("db").blastn(rows).unwrap();
    assert!(out.reverse.is_empty());
    assert_eq!(out.forward.get("db_t1").unwrap().pident, 95.0);
    let t2 = out.forward.get("db_t2").unwrap();
    assert_eq!(t2.seq, b"ACGTAC");
    assert_eq!(t2.span, None);
    assert_eq!(out.summary.processed, 5);
}

#[test]
fn write_fasta_puts_queries_first_and_applies_stop_policy() {
    let rows = blastn_rows("9\t95\tq1\tt1\tATGAAATAG\n6\t90\tq1\tt2\tCCCAAA\n");
    let out = Reconciler::new("db").blastn(rows).unwrap();
    let queries = nucleotides(&[("q1", "ACGT")]);

    let mut writer = FastaWriter::new(Vec::new());
    let filter = StopFilter::new(CodonTable::standard(), ReadingFrame::One, StopPolicy::Trim);
    assert_eq!(out.write_fasta(&mut writer, &queries, &filter).unwrap(), 2);
    let text = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(
        text,
        ">q1\nACGT\n>db_t1_pident_95.000\nATGAAA\n>db_t2_pident_90.000\nCCCAAA\n"
    );

    let mut writer = FastaWriter::new(Vec::new());
    let filter = StopFilter::new(CodonTable::standard(), ReadingFrame::One, StopPolicy::Discard);
    assert_eq!(out.write_fasta(&mut writer, &queries, &filter).unwrap(), 1);
}

// ─── batch ──────────────────────────────────────────────────

#[test]
fn batch_keeps_file_order() {
    let a = write_temp_tsv("batch_a", "100\t90.0\tq1\tt1\tMK\t1\t0\n");
    let b = write_temp_tsv("batch_b", "100\t80.0\tq2\tt1\tLF\t-1\t0\n");
    let lookup = IndexedLookup::new(nucleotides(&[("t1", "ATGAAATAG")]));
    let runs = Reconciler::new("nr")
        .blastx_batch(&[a.clone(), b.clone()], &CodonTable::standard(), &lookup)
        .unwrap();
    fs::remove_file(a).ok();
    fs::remove_file(b).ok();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].forward.len(), 1);
    assert_eq!(runs[1].reverse.len(), 1);
}

#[test]
fn batch_missing_file_fails() {
    let lookup = IndexedLookup::new(Vec::new());
    let err = Reconciler::new("nr")
        .blastx_batch(&["/nonexistent/seqrecon.tsv"], &CodonTable::standard(), &lookup)
        .unwrap_err();
    assert!(err.is_fatal());
}

// ─── museoscript ────────────────────────────────────────────

fn museo_rows(data: &str) -> Vec<BioResult<AlignmentRecord>> {
    alignment_records_from_bytes(data.as_bytes(), RecordLayout::Museoscript).collect()
}

#[test]
fn museo_threshold_keeps_input_order() {
    let rows = museo_rows(
        "r1\tt1\ta\ttitle\t60\tAAA\n\
         r2\tt1\ta\ttitle\t85\tCCC\n\
         r3\tt2\ta\ttitle\t99\tGGG\n",
    );
    let report = museoscript(rows, 80.0, ReadSource::Fragment, OnError::Skip).unwrap();
    let headers: Vec<&str> = report.hits.iter().map(|h| h.header.as_str()).collect();
    assert_eq!(headers, vec!["r2_t1_85.000", "r3_t2_99.000"]);
    assert_eq!(report.hits[0].seq, b"CCC");
    assert_eq!(report.summary.skipped, 1);
}

#[test]
fn museo_does_not_deduplicate() {
    let rows = museo_rows("r1\tt1\ta\tt\t90\tAAA\nr1\tt1\ta\tt\t90\tAAA\n");
    let report = museoscript(rows, 80.0, ReadSource::Fragment, OnError::Skip).unwrap();
    assert_eq!(report.hits.len(), 2);
}

#[test]
fn museo_retrieves_original_reads() {
    let reads = LinearLookup::new(nucleotides(&[("r1", "ACGTACGTAA"), ("r2", "TTTT")]));
    let rows = museo_rows("r2\tt1\ta\tt\t90\tTT\nr9\tt1\ta\tt\t90\tAA\n");
    let report = museoscript(rows, 80.0, ReadSource::Original(&reads), OnError::Skip).unwrap();
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].seq, b"TTTT");
    assert_eq!(report.summary.skipped, 1);

    let mut writer = FastaWriter::new(Vec::new());
    report.write_fasta(&mut writer).unwrap();
    assert_eq!(writer.finish().unwrap(), b">r2_t1_90.000\nTTTT\n");
}
