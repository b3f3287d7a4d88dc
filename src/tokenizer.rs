use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// Tokenize text into lowercase alphanumeric terms using NFKC normalization.
/// Every character outside `[a-z0-9]` acts as a separator, so punctuation and
/// symbols never appear inside a token. Order-preserving and infallible.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    TOKEN_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}
