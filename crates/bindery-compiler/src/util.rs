//! Small shared helpers.

/// Derive a stable heading id from heading text.
///
/// Punctuation is dropped, letters are lowercased, and whitespace runs
/// collapse to a single `-`. Identical text always yields an identical id.
#[must_use]
pub fn heading_id(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple() {
        assert_eq!(heading_id("Greeting"), "greeting");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(heading_id("What's next?"), "whats-next");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(heading_id("Two   Words\tHere"), "two-words-here");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(heading_id("Same Text"), heading_id("Same Text"));
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(heading_id("Chapter 2: Loops"), "chapter-2-loops");
    }
}
