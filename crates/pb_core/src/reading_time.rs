use std::fmt;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u64,
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

/// Estimates how long `text` takes to read at `words_per_minute`.
///
/// Words are whitespace-separated tokens and minutes are rounded up, so any
/// non-empty text reads as at least one minute. A rate of zero falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`].
pub fn estimate(text: &str, words_per_minute: u32) -> ReadingTime {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    } as u64;
    let words = text.split_whitespace().count();
    let minutes = (words as u64 + wpm - 1) / wpm;
    ReadingTime { words, minutes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let rt = estimate("", 200);
        assert_eq!(rt.words, 0);
        assert_eq!(rt.to_string(), "0 min read");
        assert_eq!(estimate("   \n\t ", 200).minutes, 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate("a few words", 200).to_string(), "1 min read");
        let text = vec!["word"; 200].join(" ");
        assert_eq!(estimate(&text, 200).minutes, 1);
        let text = vec!["word"; 201].join(" ");
        assert_eq!(estimate(&text, 200).minutes, 2);
        let text = vec!["word"; 800].join(" ");
        assert_eq!(estimate(&text, 200).to_string(), "4 min read");
    }

    #[test]
    fn test_zero_rate_uses_default() {
        let text = vec!["word"; 400].join(" ");
        assert_eq!(estimate(&text, 0), estimate(&text, DEFAULT_WORDS_PER_MINUTE));
    }

    #[test]
    fn test_stable_for_identical_input() {
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(estimate(text, 200), estimate(text, 200));
        assert_eq!(estimate(text, 200).to_string(), estimate(text, 200).to_string());
    }

    #[test]
    fn test_non_decreasing_as_text_grows() {
        let mut text = String::new();
        let mut previous = estimate(&text, 3);
        for chunk in ["alpha", " ", "beta", "gamma", "  ", "delta\n", "e", " f g h i j k"] {
            text.push_str(chunk);
            let current = estimate(&text, 3);
            assert!(current >= previous, "{:?} < {:?} for {:?}", current, previous, text);
            previous = current;
        }
        assert!(previous.minutes >= 3);
    }
}
