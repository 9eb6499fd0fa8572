//! Text normalization used for robust substring matching

/// Lowercase `text` and drop everything that is not an ASCII letter,
/// ASCII digit, or whitespace. Whitespace runs are kept as they are.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Collapse every whitespace run into a single space and trim the ends.
pub fn tidy_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
