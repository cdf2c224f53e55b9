//! Query-key normalization.
//!
//! Title and artist strings arrive from sources that disagree on accenting
//! and padding ("Beyoncé" vs "Beyonce"). Before a string is used as a
//! lookup or query key it is NFD-decomposed, stripped of combining marks,
//! and trimmed, so equivalent names compare and query equivalently across
//! providers.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a title/artist string into a comparable query key.
pub fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("Café"), normalize("Cafe"));
        assert_eq!(normalize("Café"), "Cafe");
    }

    #[test]
    fn trims_and_strips_together() {
        assert_eq!(normalize("  Beyoncé  "), normalize("Beyonce"));
        assert_eq!(normalize("  Beyoncé  "), "Beyonce");
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(normalize("Lemonade"), "Lemonade");
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        assert_eq!(normalize("Daft Punk"), "Daft Punk");
    }
}
