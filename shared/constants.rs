use std::path::PathBuf;
use std::sync::LazyLock;

macro_rules! define_path {
    ($($segment:expr),*) => {{
        PathBuf::from_iter(vec![$($segment),*])
    }};
}

// Lazy-initialized static variables
pub static STOP_WORDS_FILE_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| define_path!("data", "stop_words.txt"));

pub static LEMMA_DICTIONARY_FILE_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| define_path!("data", "lemmas.csv"));

pub static BASE_WORDS_FILE_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| define_path!("data", "base_words.txt"));

/// `(source file, compressed file name, env var the build exports its full path under)`.
///
/// The crate embeds each compressed file with `include_bytes!(env!(...))`, so the file names
/// only live here.
pub static COMPRESSED_RESOURCES: LazyLock<[(&PathBuf, &str, &str); 3]> = LazyLock::new(|| {
    [
        (
            &*STOP_WORDS_FILE_PATH,
            "stop_words.txt.gz",
            "COMPRESSED_STOP_WORDS_PATH",
        ),
        (
            &*LEMMA_DICTIONARY_FILE_PATH,
            "lemmas.csv.gz",
            "COMPRESSED_LEMMA_DICTIONARY_PATH",
        ),
        (
            &*BASE_WORDS_FILE_PATH,
            "base_words.txt.gz",
            "COMPRESSED_BASE_WORDS_PATH",
        ),
    ]
});
