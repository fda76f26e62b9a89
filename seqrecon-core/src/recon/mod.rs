pub mod dedup;
pub mod engine;
pub mod localize;
pub mod lookup;
pub mod museo;
pub mod record;

pub use dedup::{header_key, DedupMap, Offer, ReconciledHit};
pub use engine::{
    Reconciler, Reconciliation, RunSummary, MIN_BLASTX_LENGTH, MIN_BLASTX_PIDENT,
};
pub use localize::{localize, localize_all, nucleotide_offset, Localized};
pub use lookup::{IndexedLookup, LinearLookup, SequenceLookup};
pub use museo::{museoscript, MuseoHit, MuseoReport, ReadSource};
pub use record::{AlignmentRecord, RecordLayout};

#[cfg(test)]
mod tests;
