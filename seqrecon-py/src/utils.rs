use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyString;

use seqrecon_core::error::BioError;
use seqrecon_core::io::OnError;
use seqrecon_core::seq::dna::DnaSeq;
use seqrecon_core::seq::ReadingFrame;
use seqrecon_core::translate::codon::CodonTable;
use seqrecon_core::translate::stop::StopPolicy;

pub fn extract_dna<'py>(obj: &Bound<'py, PyAny>) -> PyResult<DnaSeq> {
    let bytes = if let Ok(s) = obj.downcast::<PyString>() {
        s.to_str()?.as_bytes().to_vec()
    } else {
        obj.extract::<Vec<u8>>()
            .map_err(|_| PyTypeError::new_err("expected str or bytes-like object"))?
    };
    DnaSeq::new(bytes).map_err(map_bio_err)
}

pub fn parse_frame(obj: &Bound<'_, PyAny>) -> PyResult<ReadingFrame> {
    if let Ok(s) = obj.downcast::<PyString>() {
        let s = s.to_str()?;
        if s.eq_ignore_ascii_case("auto") {
            return Ok(ReadingFrame::Auto);
        }
        return Err(PyValueError::new_err("frame must be 1, 2, 3, or \"auto\""));
    }

    if let Ok(n) = obj.extract::<i64>() {
        return match n {
            1 => Ok(ReadingFrame::One),
            2 => Ok(ReadingFrame::Two),
            3 => Ok(ReadingFrame::Three),
            _ => Err(PyValueError::new_err("frame must be 1, 2, 3, or \"auto\"")),
        };
    }

    Err(PyValueError::new_err("frame must be 1, 2, 3, or \"auto\""))
}

pub fn codon_table(id: u8) -> PyResult<CodonTable> {
    CodonTable::new(id).map_err(map_bio_err)
}

pub fn parse_on_error(value: &str) -> PyResult<OnError> {
    value.parse::<OnError>().map_err(PyTypeError::new_err)
}

pub fn parse_stop_policy(value: &str) -> PyResult<StopPolicy> {
    value.parse::<StopPolicy>().map_err(map_bio_err)
}

pub fn map_bio_err(err: BioError) -> PyErr {
    match err {
        BioError::TsvParse { ref source, .. } if source.is_io_error() => {
            PyIOError::new_err(err.to_string())
        }
        BioError::FastaIo(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
