//! Pure metric derivations shared by live updates and final results.

/// Characters that make up one "word" for speed purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for `typed_len` characters over `elapsed_secs` seconds.
///
/// Rounded to a whole number. Returns 0 when no time has elapsed.
pub fn wpm(typed_len: usize, elapsed_secs: u32) -> f64 {
    if elapsed_secs == 0 {
        return 0.0;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    ((typed_len as f64 / CHARS_PER_WORD) / minutes).round()
}

/// Percentage of typed characters matching the reference at the same index.
///
/// Nothing typed yet reads as 100. Characters past the end of the
/// reference count as mismatches.
pub fn accuracy(typed: &[char], reference: &[char]) -> f64 {
    if typed.is_empty() {
        return 100.0;
    }
    let matching = typed
        .iter()
        .zip(reference.iter())
        .filter(|(t, r)| t == r)
        .count();
    (matching as f64 / typed.len() as f64) * 100.0
}

/// Share of the reference covered so far. An empty reference is fully covered.
pub fn progress(typed_len: usize, reference_len: usize) -> f64 {
    if reference_len == 0 {
        return 100.0;
    }
    (typed_len as f64 / reference_len as f64) * 100.0
}

/// Progress reported when a race completes: one character ahead of the
/// committed caret, so a finished text reads 100%.
pub fn final_progress(cursor: usize, reference_len: usize) -> f64 {
    progress(cursor + 1, reference_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_wpm_zero_elapsed() {
        assert_eq!(wpm(0, 0), 0.0);
        assert_eq!(wpm(120, 0), 0.0);
    }

    #[test]
    fn test_wpm_one_minute() {
        // 50 chars = 10 words in one minute
        assert_eq!(wpm(50, 60), 10.0);
    }

    #[test]
    fn test_wpm_rounds() {
        // 3 chars over 2 secs = 0.6 words / (1/30 min) = 18
        assert_eq!(wpm(3, 2), 18.0);
        // 1 char over 7 secs = 1.714...
        assert_eq!(wpm(1, 7), 2.0);
    }

    #[test]
    fn test_accuracy_empty_typed() {
        assert_eq!(accuracy(&[], &chars("cat")), 100.0);
        assert_eq!(accuracy(&[], &[]), 100.0);
    }

    #[test]
    fn test_accuracy_correct_prefixes() {
        let reference = chars("hello world");
        for n in 0..=reference.len() {
            assert_eq!(accuracy(&reference[..n], &reference), 100.0);
        }
    }

    #[test]
    fn test_accuracy_with_mismatches() {
        assert_eq!(accuracy(&chars("txst"), &chars("test")), 75.0);
        assert_eq!(accuracy(&chars("xy"), &chars("test")), 0.0);
    }

    #[test]
    fn test_accuracy_typed_longer_than_reference() {
        assert_eq!(accuracy(&chars("cats"), &chars("cat")), 75.0);
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 4), 0.0);
        assert_eq!(progress(1, 4), 25.0);
        assert_eq!(progress(4, 4), 100.0);
    }

    #[test]
    fn test_progress_empty_reference() {
        assert_eq!(progress(0, 0), 100.0);
    }

    #[test]
    fn test_final_progress_is_one_ahead() {
        assert_eq!(final_progress(2, 4), 75.0);
        assert_eq!(final_progress(3, 4), 100.0);
    }
}
