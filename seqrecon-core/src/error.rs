use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BioError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("invalid frame: {frame} (must be 1, 2, 3 or auto)")]
    InvalidFrame { frame: String },

    #[error("invalid stop policy '{value}' (expected keep, trim or discard)")]
    InvalidStopPolicy { value: String },

    #[error("unknown codon table id {id} (supported: 1, 2, 3, 4, 5, 6, 11)")]
    UnknownCodonTable { id: u8 },

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("fasta io error: {0}")]
    FastaIo(#[from] io::Error),

    #[error("malformed alignment record at line {line}: {msg}")]
    MalformedRecord { line: usize, msg: String },

    #[error("tsv parse error in {path}: {source}")]
    TsvParse {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl BioError {
    /// Errors that abort a run regardless of the per-record error policy.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BioError::MalformedRecord { .. })
    }
}

pub type BioResult<T> = Result<T, BioError>;
