use clap::{Parser, Subcommand};
use seqrecon_core::io::OnError;
use seqrecon_core::seq::ReadingFrame;
use seqrecon_core::translate::StopPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "seqrecon",
    about = "Reconcile tabular aligner hits into annotated FASTA",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'L',
        long = "level",
        help = "Logging level",
        value_name = "LEVEL",
        default_value_t = log::Level::Info,
    )]
    pub level: log::Level,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut blastx peptide hits back out of their nucleotide sequences
    Blastx(BlastxArgs),

    /// Merge blastn hits, one sequence per target
    Blastn(BlastnArgs),

    /// Keep museoscript hits at or above an identity threshold
    Museo(MuseoArgs),

    /// Print the six-frame translation of every record
    Translate(TranslateArgs),

    /// Print the first in-frame stop codon of every record
    Stops(StopsArgs),
}

#[derive(Debug, Parser)]
pub struct BlastxArgs {
    #[arg(
        short = 'q',
        long = "query",
        required = false,
        help = "Path to query .fa, copied to the top of the output"
    )]
    pub query: Option<PathBuf>,

    #[arg(
        short = 'b',
        long = "hits",
        required = true,
        num_args = 1..,
        help = "Path to blastx tabular output (length pident qseqid sseqid sseq qframe sframe); repeat for a batch"
    )]
    pub hits: Vec<PathBuf>,

    #[arg(
        short = 'n',
        long = "nucleotides",
        required = true,
        help = "Path to .fa with the nucleotide sequence of every target"
    )]
    pub nucleotides: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        help = "Output .fa; a directory when more than one hits file is given"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'd',
        long = "db-name",
        required = false,
        help = "Database name used as header prefix",
        default_value = "db"
    )]
    pub db_name: String,

    #[arg(
        short = 'c',
        long = "table",
        required = false,
        help = "NCBI codon table id",
        default_value_t = 1
    )]
    pub table: u8,

    #[arg(
        short = 'e',
        long = "on-error",
        required = false,
        help = "What to do with malformed hit lines: raise or skip",
        default_value = "skip"
    )]
    pub on_error: OnError,

    #[arg(
        short = 'i',
        long = "indexed",
        help = "Match targets by exact id instead of header substring"
    )]
    pub indexed: bool,

    #[arg(
        short = 's',
        long = "stops",
        required = false,
        help = "Premature stop handling for appended hits: keep, trim or discard",
        default_value = "keep"
    )]
    pub stops: StopPolicy,

    #[arg(
        short = 'f',
        long = "stop-frame",
        required = false,
        help = "Reading frame scanned for stops: 1, 2, 3 or auto",
        default_value = "1"
    )]
    pub stop_frame: ReadingFrame,
}

#[derive(Debug, Parser)]
pub struct BlastnArgs {
    #[arg(
        short = 'q',
        long = "query",
        required = false,
        help = "Path to query .fa, copied to the top of the output"
    )]
    pub query: Option<PathBuf>,

    #[arg(
        short = 'b',
        long = "hits",
        required = true,
        help = "Path to blastn tabular output (length pident qseqid sseqid sseq)"
    )]
    pub hits: PathBuf,

    #[arg(short = 'o', long = "output", required = true, help = "Output .fa")]
    pub output: PathBuf,

    #[arg(
        short = 'd',
        long = "db-name",
        required = false,
        help = "Database name used as header prefix",
        default_value = "db"
    )]
    pub db_name: String,

    #[arg(
        short = 'e',
        long = "on-error",
        required = false,
        help = "What to do with malformed hit lines: raise or skip",
        default_value = "skip"
    )]
    pub on_error: OnError,

    #[arg(
        short = 's',
        long = "stops",
        required = false,
        help = "Premature stop handling for appended hits: keep, trim or discard",
        default_value = "keep"
    )]
    pub stops: StopPolicy,

    #[arg(
        short = 'c',
        long = "table",
        required = false,
        help = "NCBI codon table id used to find stops",
        default_value_t = 1
    )]
    pub table: u8,

    #[arg(
        short = 'f',
        long = "stop-frame",
        required = false,
        help = "Reading frame scanned for stops: 1, 2, 3 or auto",
        default_value = "1"
    )]
    pub stop_frame: ReadingFrame,
}

#[derive(Debug, Parser)]
pub struct MuseoArgs {
    #[arg(
        short = 'b',
        long = "hits",
        required = true,
        help = "Path to tabular output (qseqid sseqid sacc stitle pident qseq)"
    )]
    pub hits: PathBuf,

    #[arg(short = 'o', long = "output", required = true, help = "Output .fa")]
    pub output: PathBuf,

    #[arg(
        short = 't',
        long = "threshold",
        required = true,
        help = "Minimum percent identity, inclusive"
    )]
    pub threshold: f64,

    #[arg(
        short = 'r',
        long = "reads",
        required = false,
        help = "Path to the original reads; write full reads instead of matched fragments"
    )]
    pub reads: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "on-error",
        required = false,
        help = "What to do with malformed hit lines: raise or skip",
        default_value = "skip"
    )]
    pub on_error: OnError,
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[arg(short = 'f', long = "fasta", required = true, help = "Path to .fa file")]
    pub fasta: PathBuf,

    #[arg(
        short = 'c',
        long = "table",
        required = false,
        help = "NCBI codon table id",
        default_value_t = 1
    )]
    pub table: u8,
}

#[derive(Debug, Parser)]
pub struct StopsArgs {
    #[arg(short = 'f', long = "fasta", required = true, help = "Path to .fa file")]
    pub fasta: PathBuf,

    #[arg(
        short = 'c',
        long = "table",
        required = false,
        help = "NCBI codon table id",
        default_value_t = 1
    )]
    pub table: u8,

    #[arg(
        short = 'r',
        long = "frame",
        required = false,
        help = "Reading frame: 1, 2, 3 or auto",
        default_value = "1"
    )]
    pub frame: ReadingFrame,
}
