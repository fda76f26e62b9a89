use crate::seq::{Frame, Strand};
use hashbrown::HashMap;
use log::debug;

/// Output header prefix for a target, `{db}_{target}` with whitespace runs
/// collapsed to `_`. Percent identity is deliberately not part of it.
pub fn header_key(db_name: &str, target_id: &str) -> Box<str> {
    let raw = format!("{}_{}", db_name.trim(), target_id.trim());
    raw.split_whitespace().collect::<Vec<_>>().join("_").into()
}

/// Percent identity as the aligner prints it in tabular output.
pub fn format_pident(pident: f64) -> String {
    format!("{pident:.3}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReconciledHit {
    pub key: Box<str>,
    pub target_id: Box<str>,
    pub pident: f64,
    /// Half-open span in the nucleotide source; `None` when the fragment
    /// came straight from the aligner.
    pub span: Option<(usize, usize)>,
    pub strand: Strand,
    pub frame: Option<Frame>,
    pub seq: Vec<u8>,
}

impl ReconciledHit {
    pub fn header(&self) -> String {
        format!("{}_pident_{}", self.key, format_pident(self.pident))
    }

    /// Longer sequence wins; on equal length the strictly higher identity.
    pub fn beats(&self, other: &ReconciledHit) -> bool {
        match self.seq.len().cmp(&other.seq.len()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.pident > other.pident,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    Inserted,
    Replaced,
    Kept,
}

/// At most one hit per header key, in first-seen key order. Hits only
/// change through [`DedupMap::offer`].
#[derive(Clone, Debug, Default)]
pub struct DedupMap {
    hits: Vec<ReconciledHit>,
    index: HashMap<Box<str>, usize>,
}

impl DedupMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, hit: ReconciledHit) -> Offer {
        match self.index.get(&hit.key) {
            None => {
                self.index.insert(hit.key.clone(), self.hits.len());
                self.hits.push(hit);
                Offer::Inserted
            }
            Some(&i) => {
                let current = &mut self.hits[i];
                if hit.beats(current) {
                    debug!(
                        "{}: replacing {} bp at {} with {} bp at {}",
                        hit.key,
                        current.seq.len(),
                        current.pident,
                        hit.seq.len(),
                        hit.pident
                    );
                    *current = hit;
                    Offer::Replaced
                } else {
                    Offer::Kept
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ReconciledHit> {
        self.index.get(key).map(|&i| &self.hits[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReconciledHit> {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn into_hits(self) -> Vec<ReconciledHit> {
        self.hits
    }
}
