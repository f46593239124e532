//! Line-number normalization and composite (account, line) keys.

use serde::{Deserialize, Serialize};

/// Normalizes a line number to a two-digit string.
///
/// Non-digit characters are stripped, the result is left-padded with
/// zeros to two characters, and only the last two digits are kept:
/// "1" → "01", "23" → "23", "123" → "23", "a7b" → "07", "" → "00".
#[must_use]
pub fn pad2(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let padded = format!("{digits:0>2}");
    padded[padded.len() - 2..].to_string()
}

/// Composite key identifying one line item: a GL account code plus a
/// two-digit line number.
///
/// Ordering is lexicographic on `(acct5, line)` as strings, so "10"
/// sorts before "2". This is the sort order of every listing view.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// GL account code, e.g. `52100-03-31-01-01`.
    pub acct5: String,
    /// Two-digit line number, "00".."99".
    pub line: String,
}

impl LineKey {
    /// Creates a new key without normalizing the line.
    #[must_use]
    pub const fn new(acct5: String, line: String) -> Self {
        Self { acct5, line }
    }
}
