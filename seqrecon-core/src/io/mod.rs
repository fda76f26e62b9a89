pub mod fasta;
pub mod tsv;

use crate::error::BioError;
use std::str::FromStr;

/// Per-record policy for recoverable errors (malformed lines).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    Raise,
    #[default]
    Skip,
}

impl FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raise" => Ok(OnError::Raise),
            "skip" => Ok(OnError::Skip),
            other => Err(format!("on_error must be 'raise' or 'skip', got '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub row: usize,
    pub id: Option<Box<str>>,
    pub column: Box<str>,
    pub message: Box<str>,
}

impl SkippedRecord {
    pub fn new(
        row: usize,
        id: Option<&str>,
        column: impl Into<Box<str>>,
        message: impl Into<Box<str>>,
    ) -> Self {
        Self {
            row,
            id: id.map(Into::into),
            column: column.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_error(err: &BioError) -> Self {
        let row = match err {
            BioError::MalformedRecord { line, .. } => *line,
            _ => 0,
        };
        Self::new(row, None, "record", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_error_parse() {
        assert_eq!("RAISE".parse::<OnError>().unwrap(), OnError::Raise);
        assert_eq!("skip".parse::<OnError>().unwrap(), OnError::Skip);
        assert!("ignore".parse::<OnError>().is_err());
    }

    #[test]
    fn skipped_from_malformed() {
        let err = BioError::MalformedRecord {
            line: 9,
            msg: "bad".to_string(),
        };
        let skipped = SkippedRecord::from_error(&err);
        assert_eq!(skipped.row, 9);
        assert!(skipped.message.contains("line 9"));
    }
}
