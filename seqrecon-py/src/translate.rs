use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::utils::{codon_table, extract_dna, map_bio_err, parse_frame};
use seqrecon_core::seq::traits::SeqBytes;
use seqrecon_core::translate::{frames, stop};

/// Six translations in order: forward 0, 1, 2 then reverse 0, 1, 2.
#[pyfunction]
#[pyo3(signature = (seq, table=1))]
fn translate_six_frames(seq: &Bound<'_, PyAny>, table: u8) -> PyResult<Vec<String>> {
    let seq = extract_dna(seq)?;
    let table = codon_table(table)?;
    let six = frames::translate_six_frames(&seq, &table).map_err(map_bio_err)?;
    Ok(six.into_strings().to_vec())
}

#[pyfunction]
fn reverse_complement(seq: &Bound<'_, PyAny>) -> PyResult<String> {
    let seq = extract_dna(seq)?;
    let rc = seq.reverse_complement().map_err(map_bio_err)?;
    Ok(rc.as_text().into_owned())
}

/// Index of the first in-frame stop codon, or `None`.
#[pyfunction]
#[pyo3(signature = (seq, table=1, frame=None))]
fn find_stop_codon(
    seq: &Bound<'_, PyAny>,
    table: u8,
    frame: Option<&Bound<'_, PyAny>>,
) -> PyResult<Option<usize>> {
    let seq = extract_dna(seq)?;
    let table = codon_table(table)?;
    let frame = match frame {
        Some(obj) => parse_frame(obj)?,
        None => Default::default(),
    };
    Ok(stop::find_stop_codon(seq.as_bytes(), &table, frame))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(translate_six_frames, m)?)?;
    m.add_function(wrap_pyfunction!(reverse_complement, m)?)?;
    m.add_function(wrap_pyfunction!(find_stop_codon, m)?)?;
    Ok(())
}
