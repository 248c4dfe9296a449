use serde::{Deserialize, Serialize};

/// Placed between category labels when they are joined.
pub const SEPARATOR: &str = ", ";

/// The letter counted by `analyze`.
pub const DEFAULT_LETTER: char = 'A';

/// The joined, uppercased category labels and how often a letter occurs in them.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Analysis {
    pub joined_upper: String,
    pub letter: String,
    pub letter_count: usize,
}

/// Joins `categories` with `", "`, uppercases the result and counts the letter `A` in it.
pub fn analyze<S: AsRef<str>>(categories: &[S]) -> Analysis {
    analyze_letter(categories, DEFAULT_LETTER)
}

/// Like `analyze` but counts `letter`, which is uppercased first, so the count is effectively
/// case-insensitive.
pub fn analyze_letter<S: AsRef<str>>(categories: &[S], letter: char) -> Analysis {
    let joined_upper = categories
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .to_uppercase();
    let letter: String = letter.to_uppercase().collect();
    let letter_count = joined_upper.matches(letter.as_str()).count();
    Analysis {
        joined_upper,
        letter,
        letter_count,
    }
}
