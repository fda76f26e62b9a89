use crate::seq::dna::DnaSeq;
use crate::seq::record::SeqRecord;
use hashbrown::HashMap;

/// Finds the nucleotide record that belongs to an identifier from an
/// alignment record.
pub trait SequenceLookup {
    fn find(&self, id: &str) -> Option<&SeqRecord<DnaSeq>>;
}

impl<T: SequenceLookup + ?Sized> SequenceLookup for &T {
    fn find(&self, id: &str) -> Option<&SeqRecord<DnaSeq>> {
        (**self).find(id)
    }
}

/// First record whose header line contains `id` anywhere; a linear scan per
/// query. Matches how auxiliary files are searched by hand, so `t1` also
/// hits a header `t10`.
#[derive(Clone, Debug, Default)]
pub struct LinearLookup {
    records: Vec<SeqRecord<DnaSeq>>,
    headers: Vec<String>,
}

impl LinearLookup {
    pub fn new(records: Vec<SeqRecord<DnaSeq>>) -> Self {
        let headers = records.iter().map(|r| r.header()).collect();
        Self { records, headers }
    }

    pub fn records(&self) -> &[SeqRecord<DnaSeq>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SequenceLookup for LinearLookup {
    fn find(&self, id: &str) -> Option<&SeqRecord<DnaSeq>> {
        self.headers
            .iter()
            .position(|h| h.contains(id))
            .map(|i| &self.records[i])
    }
}

/// Exact-identifier index for large auxiliary files. The first record
/// wins when an identifier repeats.
#[derive(Clone, Debug, Default)]
pub struct IndexedLookup {
    records: Vec<SeqRecord<DnaSeq>>,
    index: HashMap<Box<str>, usize>,
}

impl IndexedLookup {
    pub fn new(records: Vec<SeqRecord<DnaSeq>>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            index.entry(record.id.clone()).or_insert(i);
        }
        Self { records, index }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SequenceLookup for IndexedLookup {
    fn find(&self, id: &str) -> Option<&SeqRecord<DnaSeq>> {
        self.index.get(id).map(|&i| &self.records[i])
    }
}
