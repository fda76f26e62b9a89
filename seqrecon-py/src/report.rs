use pyo3::prelude::*;
use pyo3::types::PyModule;

use seqrecon_core::io::SkippedRecord as CoreSkippedRecord;
use seqrecon_core::recon::RunSummary as CoreRunSummary;

#[pyclass(frozen)]
#[derive(Clone)]
pub struct SkippedRecord {
    pub(crate) row: usize,
    pub(crate) id: Option<String>,
    pub(crate) column: String,
    pub(crate) message: String,
}

#[pymethods]
impl SkippedRecord {
    #[getter]
    fn row(&self) -> usize {
        self.row
    }

    #[getter]
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[getter]
    fn column(&self) -> &str {
        &self.column
    }

    #[getter]
    fn message(&self) -> &str {
        &self.message
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "SkippedRecord(row={}, id={:?}, column={:?}, message={:?})",
            self.row, self.id, self.column, self.message
        ))
    }
}

impl From<CoreSkippedRecord> for SkippedRecord {
    fn from(value: CoreSkippedRecord) -> Self {
        Self {
            row: value.row,
            id: value.id.map(|s| s.to_string()),
            column: value.column.to_string(),
            message: value.message.to_string(),
        }
    }
}

/// Counts for one run plus the number of sequences appended to the output.
#[pyclass(frozen)]
#[derive(Clone)]
pub struct RunSummary {
    pub(crate) processed: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
    pub(crate) written: usize,
    pub(crate) skipped_records: Vec<SkippedRecord>,
}

impl RunSummary {
    pub(crate) fn new(
        summary: CoreRunSummary,
        written: usize,
        skipped: Vec<CoreSkippedRecord>,
    ) -> Self {
        Self {
            processed: summary.processed,
            skipped: summary.skipped,
            failed: summary.failed,
            written,
            skipped_records: skipped.into_iter().map(SkippedRecord::from).collect(),
        }
    }
}

#[pymethods]
impl RunSummary {
    #[getter]
    fn processed(&self) -> usize {
        self.processed
    }

    #[getter]
    fn skipped(&self) -> usize {
        self.skipped
    }

    #[getter]
    fn failed(&self) -> usize {
        self.failed
    }

    #[getter]
    fn written(&self) -> usize {
        self.written
    }

    #[getter]
    fn skipped_records(&self) -> Vec<SkippedRecord> {
        self.skipped_records.clone()
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "RunSummary(processed={}, skipped={}, failed={}, written={})",
            self.processed, self.skipped, self.failed, self.written
        ))
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SkippedRecord>()?;
    m.add_class::<RunSummary>()?;
    Ok(())
}
