#[macro_use]
mod par;

pub mod alphabets;
pub mod error;
pub mod io;
pub mod recon;
pub mod seq;
pub mod translate;

pub use error::{BioError, BioResult};
