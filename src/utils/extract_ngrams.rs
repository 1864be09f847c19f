use crate::types::NGram;

/// Collects every contiguous run of `ngram_range.0..=ngram_range.1` whitespace-separated
/// tokens, shortest runs first. Tokens with fewer than `min_token_length` characters are
/// dropped before the runs are formed.
pub fn extract_ngrams(
    text: &str,
    ngram_range: (usize, usize),
    min_token_length: usize,
) -> Vec<NGram> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.chars().count() >= min_token_length)
        .collect();

    let (min_n, max_n) = ngram_range;
    let mut ngrams = Vec::new();

    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }

        ngrams.extend(tokens.windows(n).map(|window| window.join(" ")));
    }

    ngrams
}
