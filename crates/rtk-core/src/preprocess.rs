/// Canonical form of a gloss or user supplied primitive.
///
/// ASCII letters are lowercased and `- . ? '` become spaces. The trailing
/// run of whitespace and `s` is then cut, which collapses plurals
/// ("trees" and "tree" compare equal) but also clips words that simply end
/// in "s" ("bus" -> "bu"). Both sides of a comparison go through here, so
/// the clipping is harmless for matching.
pub fn normalize(word: &str) -> String {
    let mut text: String = word
        .chars()
        .map(|c| match c {
            '-' | '.' | '?' | '\'' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    // Cutting the whole run keeps the result stable under a second pass
    while text.ends_with(|c: char| c == 's' || c.is_whitespace()) {
        text.pop();
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_and_punctuation() {
        assert_eq!(normalize("KANJI-TEST's"), "kanji test");
        assert_eq!(normalize("Walking Stick"), "walking stick");
        assert_eq!(normalize("wha?t"), "wha t");
        assert_eq!(normalize("St. Bernard"), "st  bernard");
    }

    #[test]
    fn test_normalize_collapses_plural() {
        assert_eq!(normalize("trees"), "tree");
        assert_eq!(normalize("tree"), "tree");
        assert_eq!(normalize("bus"), "bu");
        assert_eq!(normalize("glass"), "gla");
        // Whole trailing run goes, so these collide
        assert_eq!(normalize("hiss"), "hi");
        assert_eq!(normalize("his"), "hi");
    }

    #[test]
    fn test_normalize_trims_trailing_whitespace_only() {
        assert_eq!(normalize("  mouth  "), "  mouth");
        assert_eq!(normalize("mouth\t"), "mouth");
    }

    #[test]
    fn test_normalize_empty_and_degenerate() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("s"), "");
        assert_eq!(normalize("-"), "");
        assert_eq!(normalize("ss 's"), "");
    }

    #[test]
    fn test_normalize_leaves_non_ascii_alone() {
        assert_eq!(normalize("水"), "水");
        assert_eq!(normalize("Ärm"), "Ärm");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "s",
            "ss",
            "a s",
            "abs ",
            "Glass",
            "KANJI-TEST's",
            "walking stick",
            "hood-s.",
            "  leading",
            "mixed\tWS s",
            "水s",
            "?-.'",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
