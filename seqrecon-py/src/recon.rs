#![allow(clippy::too_many_arguments)]

use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::report::RunSummary;
use crate::utils::{codon_table, map_bio_err, parse_frame, parse_on_error, parse_stop_policy};
use seqrecon_core::error::BioResult;
use seqrecon_core::io::fasta::{create_fasta_writer, read_fasta_records_from_path};
use seqrecon_core::io::tsv::alignment_records_from_path;
use seqrecon_core::recon::{
    museoscript as run_museoscript, IndexedLookup, LinearLookup, ReadSource, Reconciler,
    Reconciliation, RecordLayout, SequenceLookup,
};
use seqrecon_core::seq::dna::DnaSeq;
use seqrecon_core::seq::record::SeqRecord;
use seqrecon_core::seq::ReadingFrame;
use seqrecon_core::translate::stop::StopFilter;

fn read_queries(path: Option<&str>) -> BioResult<Vec<SeqRecord<DnaSeq>>> {
    match path {
        Some(path) => read_fasta_records_from_path(path),
        None => Ok(Vec::new()),
    }
}

fn write_reconciliation(
    out: Reconciliation,
    output: &str,
    queries: &[SeqRecord<DnaSeq>],
    stops: &StopFilter,
) -> BioResult<RunSummary> {
    let mut writer = create_fasta_writer(output)?;
    let written = out.write_fasta(&mut writer, queries, stops)?;
    writer.finish()?;
    Ok(RunSummary::new(out.summary, written, out.skipped))
}

/// Reconcile blastx hits against their nucleotide sequences and write FASTA.
#[pyfunction]
#[pyo3(signature = (
    hits,
    nucleotides,
    output,
    *,
    query=None,
    db_name="db",
    table=1,
    on_error="skip",
    indexed=false,
    stops="keep",
    stop_frame=None
))]
fn reconcile_blastx(
    py: Python<'_>,
    hits: &str,
    nucleotides: &str,
    output: &str,
    query: Option<&str>,
    db_name: &str,
    table: u8,
    on_error: &str,
    indexed: bool,
    stops: &str,
    stop_frame: Option<&Bound<'_, PyAny>>,
) -> PyResult<RunSummary> {
    let table = codon_table(table)?;
    let on_error = parse_on_error(on_error)?;
    let frame = match stop_frame {
        Some(obj) => parse_frame(obj)?,
        None => ReadingFrame::default(),
    };
    let stops = StopFilter::new(table.clone(), frame, parse_stop_policy(stops)?);
    let reconciler = Reconciler::new(db_name).with_on_error(on_error);

    py.allow_threads(|| {
        let records = read_fasta_records_from_path::<DnaSeq>(nucleotides)?;
        let lookup: Box<dyn SequenceLookup> = if indexed {
            Box::new(IndexedLookup::new(records))
        } else {
            Box::new(LinearLookup::new(records))
        };
        let rows = alignment_records_from_path(hits, RecordLayout::Blastx)?;
        let out = reconciler.blastx(rows, &table, lookup.as_ref())?;
        let queries = read_queries(query)?;
        write_reconciliation(out, output, &queries, &stops)
    })
    .map_err(map_bio_err)
}

/// Reconcile blastn hits; fragments are written as reported.
#[pyfunction]
#[pyo3(signature = (
    hits,
    output,
    *,
    query=None,
    db_name="db",
    on_error="skip",
    stops="keep",
    table=1,
    stop_frame=None
))]
fn reconcile_blastn(
    py: Python<'_>,
    hits: &str,
    output: &str,
    query: Option<&str>,
    db_name: &str,
    on_error: &str,
    stops: &str,
    table: u8,
    stop_frame: Option<&Bound<'_, PyAny>>,
) -> PyResult<RunSummary> {
    let on_error = parse_on_error(on_error)?;
    let frame = match stop_frame {
        Some(obj) => parse_frame(obj)?,
        None => ReadingFrame::default(),
    };
    let stops = StopFilter::new(codon_table(table)?, frame, parse_stop_policy(stops)?);
    let reconciler = Reconciler::new(db_name).with_on_error(on_error);

    py.allow_threads(|| {
        let rows = alignment_records_from_path(hits, RecordLayout::Blastn)?;
        let out = reconciler.blastn(rows)?;
        let queries = read_queries(query)?;
        write_reconciliation(out, output, &queries, &stops)
    })
    .map_err(map_bio_err)
}

/// Keep museoscript records at or above `threshold`. With `reads`, the full
/// query read is written instead of the matched fragment.
#[pyfunction]
#[pyo3(signature = (hits, output, threshold, *, reads=None, on_error="skip"))]
fn museoscript(
    py: Python<'_>,
    hits: &str,
    output: &str,
    threshold: f64,
    reads: Option<&str>,
    on_error: &str,
) -> PyResult<RunSummary> {
    let on_error = parse_on_error(on_error)?;

    py.allow_threads(|| {
        let lookup = match reads {
            Some(path) => Some(LinearLookup::new(read_fasta_records_from_path(path)?)),
            None => None,
        };
        let source = match &lookup {
            Some(lookup) => ReadSource::Original(lookup),
            None => ReadSource::Fragment,
        };
        let rows = alignment_records_from_path(hits, RecordLayout::Museoscript)?;
        let report = run_museoscript(rows, threshold, source, on_error)?;
        let mut writer = create_fasta_writer(output)?;
        let written = report.write_fasta(&mut writer)?;
        writer.finish()?;
        Ok(RunSummary::new(report.summary, written, report.skipped))
    })
    .map_err(map_bio_err)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reconcile_blastx, m)?)?;
    m.add_function(wrap_pyfunction!(reconcile_blastn, m)?)?;
    m.add_function(wrap_pyfunction!(museoscript, m)?)?;
    Ok(())
}
