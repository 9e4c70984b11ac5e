// Text normalisation helpers shared by the detectors.

/// Lowercase and collapse every whitespace run to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character count of the trimmed text (not bytes).
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Fraction of alphabetic characters that are uppercase, and the letter count.
pub fn caps_ratio(text: &str) -> (f64, usize) {
    let mut letters = 0usize;
    let mut upper = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        letters += 1;
        if c.is_uppercase() {
            upper += 1;
        }
    }
    if letters == 0 {
        return (0.0, 0);
    }
    (upper as f64 / letters as f64, letters)
}

/// Length of the longest consecutive run of `!` / `?` characters.
pub fn longest_punctuation_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '!' || c == '?' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Buy\t\tNOW\n please "), "buy now please");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_char_len_counts_chars_not_bytes() {
        assert_eq!(char_len("  héllo  "), 5);
        assert_eq!(char_len("🎉🎉"), 2);
    }

    #[test]
    fn test_caps_ratio_ignores_non_letters() {
        let (ratio, letters) = caps_ratio("ABC def 123!!!");
        assert_eq!(letters, 6);
        assert!((ratio - 0.5).abs() < 1e-9);
        assert_eq!(caps_ratio("!!!"), (0.0, 0));
    }

    #[test]
    fn test_punctuation_run_mixed() {
        assert_eq!(longest_punctuation_run("Wait!? Really?!?"), 3);
        assert_eq!(longest_punctuation_run("Plain title."), 0);
    }
}
