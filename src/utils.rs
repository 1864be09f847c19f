pub mod compute_signature;
pub mod extract_ngrams;
pub mod truncate_for_display;
pub mod write_atomically;

pub use compute_signature::compute_signature;
pub use extract_ngrams::extract_ngrams;
pub use truncate_for_display::truncate_for_display;
pub use write_atomically::write_atomically;
