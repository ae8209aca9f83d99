use std::ops::RangeInclusive;

/// Unicode Bengali block.
pub const BENGALI_BLOCK: RangeInclusive<char> = '\u{0980}'..='\u{09FF}';

/// True if any character of `text` is in the Bengali block.
///
/// A single Bengali character is enough, so mixed-script transcripts are
/// treated as already Bengali and are not translated.
pub fn contains_bengali(text: &str) -> bool {
    text.chars().any(|c| BENGALI_BLOCK.contains(&c))
}

/// Whether a transcript should be sent for translation.
pub fn needs_translation(text: &str) -> bool {
    !text.trim().is_empty() && !contains_bengali(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_text_is_not_bengali() {
        assert!(!contains_bengali("Hello world"));
        assert!(!contains_bengali(""));
        assert!(!contains_bengali("नमस्ते")); // Devanagari sits just below the block
    }

    #[test]
    fn test_single_bengali_char_is_enough() {
        assert!(contains_bengali("আমি"));
        assert!(contains_bengali("Meeting at ঢাকা office tomorrow"));
        assert!(contains_bengali("\u{0980}"));
        assert!(contains_bengali("\u{09FF}"));
        assert!(!contains_bengali("\u{0A00}"));
    }

    #[test]
    fn test_needs_translation() {
        assert!(needs_translation("Hello world"));
        assert!(!needs_translation("   \n\t"));
        assert!(!needs_translation("হ্যালো"));
    }
}
