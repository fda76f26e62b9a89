use crate::cli::{BlastnArgs, BlastxArgs, MuseoArgs, StopsArgs, TranslateArgs};
use anyhow::{bail, Context, Result};
use log::{info, warn};
use seqrecon_core::io::fasta::{create_fasta_writer, read_fasta_records_from_path};
use seqrecon_core::io::tsv::alignment_records_from_path;
use seqrecon_core::recon::{
    museoscript, IndexedLookup, LinearLookup, ReadSource, Reconciler, Reconciliation,
    RecordLayout, SequenceLookup,
};
use seqrecon_core::seq::dna::DnaSeq;
use seqrecon_core::seq::record::SeqRecord;
use seqrecon_core::translate::{find_stop_codon, translate_records, CodonTable, StopFilter};
use std::fs;
use std::path::{Path, PathBuf};

fn read_dna(path: &Path) -> Result<Vec<SeqRecord<DnaSeq>>> {
    read_fasta_records_from_path(path).with_context(|| format!("reading {}", path.display()))
}

fn read_queries(path: Option<&Path>) -> Result<Vec<SeqRecord<DnaSeq>>> {
    match path {
        Some(path) => read_dna(path),
        None => Ok(Vec::new()),
    }
}

fn write_reconciliation(
    out: &Reconciliation,
    output: &Path,
    queries: &[SeqRecord<DnaSeq>],
    stops: &StopFilter,
) -> Result<()> {
    let mut writer = create_fasta_writer(output)
        .with_context(|| format!("creating {}", output.display()))?;
    let written = out
        .write_fasta(&mut writer, queries, stops)
        .with_context(|| format!("writing {}", output.display()))?;
    writer.finish()?;
    info!(
        "{}: {} queries, {} hits ({})",
        output.display(),
        queries.len(),
        written,
        out.summary
    );
    if !out.skipped.is_empty() {
        warn!("{} malformed lines skipped", out.skipped.len());
    }
    Ok(())
}

/// Output path for one hits file of a batch.
fn batch_output(dir: &Path, hits: &Path) -> PathBuf {
    let stem = hits
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hits".to_string());
    dir.join(format!("{stem}.fa"))
}

pub fn run_blastx(args: BlastxArgs) -> Result<()> {
    let table = CodonTable::new(args.table)?;
    let stops = StopFilter::new(table.clone(), args.stop_frame, args.stops);
    let reconciler = Reconciler::new(&args.db_name).with_on_error(args.on_error);

    let records = read_dna(&args.nucleotides)?;
    info!("{} nucleotide records loaded", records.len());
    let queries = read_queries(args.query.as_deref())?;

    let runs = if args.indexed {
        blastx_runs(&reconciler, &args.hits, &table, &IndexedLookup::new(records))?
    } else {
        blastx_runs(&reconciler, &args.hits, &table, &LinearLookup::new(records))?
    };

    if let [run] = runs.as_slice() {
        return write_reconciliation(run, &args.output, &queries, &stops);
    }
    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (hits, run) in args.hits.iter().zip(&runs) {
        write_reconciliation(run, &batch_output(&args.output, hits), &queries, &stops)?;
    }
    Ok(())
}

fn blastx_runs<L: SequenceLookup + Sync>(
    reconciler: &Reconciler,
    hits: &[PathBuf],
    table: &CodonTable,
    lookup: &L,
) -> Result<Vec<Reconciliation>> {
    if let [single] = hits {
        let rows = alignment_records_from_path(single, RecordLayout::Blastx)?;
        let run = reconciler
            .blastx(rows, table, lookup)
            .with_context(|| format!("reconciling {}", single.display()))?;
        return Ok(vec![run]);
    }
    Ok(reconciler.blastx_batch(hits, table, lookup)?)
}

pub fn run_blastn(args: BlastnArgs) -> Result<()> {
    let stops = StopFilter::new(CodonTable::new(args.table)?, args.stop_frame, args.stops);
    let reconciler = Reconciler::new(&args.db_name).with_on_error(args.on_error);
    let queries = read_queries(args.query.as_deref())?;

    let rows = alignment_records_from_path(&args.hits, RecordLayout::Blastn)?;
    let run = reconciler
        .blastn(rows)
        .with_context(|| format!("reconciling {}", args.hits.display()))?;
    write_reconciliation(&run, &args.output, &queries, &stops)
}

pub fn run_museo(args: MuseoArgs) -> Result<()> {
    if !(0.0..=100.0).contains(&args.threshold) {
        bail!("threshold must be between 0 and 100, got {}", args.threshold);
    }

    let reads = match &args.reads {
        Some(path) => Some(LinearLookup::new(read_dna(path)?)),
        None => None,
    };
    let source = match &reads {
        Some(reads) => ReadSource::Original(reads),
        None => ReadSource::Fragment,
    };

    let rows = alignment_records_from_path(&args.hits, RecordLayout::Museoscript)?;
    let report = museoscript(rows, args.threshold, source, args.on_error)
        .with_context(|| format!("filtering {}", args.hits.display()))?;

    let mut writer = create_fasta_writer(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let written = report.write_fasta(&mut writer)?;
    writer.finish()?;
    info!("{}: {} hits ({})", args.output.display(), written, report.summary);
    Ok(())
}

pub fn run_translate(args: TranslateArgs) -> Result<()> {
    let table = CodonTable::new(args.table)?;
    let records = read_dna(&args.fasta)?;
    let translated = translate_records(&records, &table)
        .with_context(|| format!("translating {}", args.fasta.display()))?;

    for (record, frames) in records.iter().zip(translated) {
        for tf in frames.iter() {
            println!("{}\t{}\t{}", record.id(), tf.frame, tf.protein.as_str());
        }
    }
    Ok(())
}

pub fn run_stops(args: StopsArgs) -> Result<()> {
    let table = CodonTable::new(args.table)?;
    let records = read_dna(&args.fasta)?;

    for record in &records {
        let pos = find_stop_codon(record.seq().as_bytes(), &table, args.frame);
        let shown = pos.map_or_else(|| "-".to_string(), |p| p.to_string());
        println!("{}\t{}\t{}", record.id(), args.frame, shown);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_output_uses_hits_stem() {
        let out = batch_output(Path::new("out"), Path::new("runs/sample_1.tsv"));
        assert_eq!(out, Path::new("out/sample_1.fa"));
    }
}
