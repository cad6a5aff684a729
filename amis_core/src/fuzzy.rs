//! Fuzzy matching for "listen and type" spelling practice

use serde::Serialize;
use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Result of comparing a typed headword with the expected one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellingResult {
    pub is_correct: bool,
    pub similarity: f64,
    pub feedback: String,
}

/// Lowercase, trim, collapse inner whitespace and fold the apostrophe
/// variants keyboards produce for the glottal stop (Ngoso').
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '`' | '\u{02BC}' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Check a typed answer against `expected` with fuzzy matching.
pub fn check_spelling(input: &str, expected: &str, threshold: f64) -> SpellingResult {
    let input_normalized = normalize(input);
    let expected_normalized = normalize(expected);

    if input_normalized == expected_normalized {
        return SpellingResult {
            is_correct: true,
            similarity: 1.0,
            feedback: "答對了！✓".to_string(),
        };
    }

    let levenshtein_sim = normalized_levenshtein(&input_normalized, &expected_normalized);
    let jaro_sim = jaro_winkler(&input_normalized, &expected_normalized);

    // Jaro-Winkler is weighted up; it is kinder to typos near the end.
    let similarity = levenshtein_sim * 0.4 + jaro_sim * 0.6;

    let (is_correct, feedback) = if similarity >= threshold {
        (true, format!("差一點點！✓ 正確拼法：'{}'", expected))
    } else if similarity >= 0.5 {
        let distance = levenshtein(&input_normalized, &expected_normalized);
        (false, format!("再試試看！差 {} 個字母，答案是 '{}'", distance, expected))
    } else {
        (false, format!("不對喔，答案是 '{}'", expected))
    };

    SpellingResult {
        is_correct,
        similarity,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_space() {
        let result = check_spelling("  tangila ", "Tangila", 0.8);
        assert!(result.is_correct);
        assert_eq!(result.similarity, 1.0);
    }

    #[test]
    fn test_apostrophe_variants() {
        assert!(check_spelling("Ngoso’", "Ngoso'", 0.8).is_correct);
        assert!(check_spelling("ngoso`", "Ngoso'", 0.8).is_correct);
    }

    #[test]
    fn test_close_typo_accepted() {
        let result = check_spelling("Tangla", "Tangila", 0.8);
        assert!(result.is_correct);
        assert!(result.similarity < 1.0);
    }

    #[test]
    fn test_wrong_word_rejected() {
        let result = check_spelling("Mata", "Fongoh", 0.8);
        assert!(!result.is_correct);
        assert!(result.feedback.contains("Fongoh"));
    }
}
