//! Tokenization shared by vectorizer fitting and transformation.
//!
//! Both sides of the train/serve contract must see identical token streams,
//! so this is the single tokenizer in the system: lowercase the input, split
//! on any non-alphanumeric character, and keep tokens of at least two
//! characters. Punctuation and single-character fragments are discarded.

/// Minimum token length kept by [`tokenize`].
pub const MIN_TOKEN_LEN: usize = 2;

/// Tokenize a message for vectorization.
///
/// # Examples
///
/// ```
/// use spamsift_model::tokenize::tokenize;
///
/// assert_eq!(tokenize("Win MONEY now!!"), vec!["win", "money", "now"]);
/// assert_eq!(tokenize("let's meet"), vec!["let", "meet"]);
/// assert_eq!(tokenize("a . !"), Vec::<String>::new());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
