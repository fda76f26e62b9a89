pub mod codon;
pub mod frames;
pub mod stop;

pub use codon::{CodonTable, STOP_SYMBOL, UNKNOWN_SYMBOL};
pub use frames::{
    translate_frame, translate_records, translate_six_frames, SixFrames, TranslatedFrame,
};
pub use stop::{apply_stop_policy, find_stop_codon, most_open_frame, StopFilter, StopPolicy};
