// ============================================================
// Layer 4 — Word Segmenter
// ============================================================
// Splits a run of concatenated words ("breakingnewstoday") into
// the most probable sequence of dictionary words
// ("breaking news today") under a unigram language model.
//
// Scoring, in log10 space:
//   known word     P(w) = count(w) / total
//   unknown word   P(w) = 10 / (total * 10^len(w))
//
// The unknown-word penalty grows with length, so long unknown
// chunks lose to splits into known words while short unknown
// fragments (names, typos) still survive as single tokens.
//
// Search is dynamic programming over prefixes: best[i] is the
// best score for the first i characters, looking back at most
// MAX_WORD_LEN characters for the last word.

use std::collections::HashMap;

const MAX_WORD_LEN: usize = 24;

/// Pseudo-count given to the top-ranked word of a frequency-ordered list.
const RANKED_TOP_COUNT: f64 = 1.0e6;

#[derive(Debug, Clone, Default)]
pub struct WordSegmenter {
    counts: HashMap<String, f64>,
    total:  f64,
}

impl WordSegmenter {
    /// Build from explicit unigram counts.
    pub fn from_counts<S: Into<String>>(counts: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut map = HashMap::new();
        for (word, count) in counts {
            let word = normalize(&word.into());
            if !word.is_empty() && count > 0.0 {
                *map.entry(word).or_insert(0.0) += count;
            }
        }
        let total = map.values().sum();
        Self { counts: map, total }
    }

    /// Build from a most-frequent-first word list. The word at rank `r`
    /// (0-based) gets a Zipf pseudo-count proportional to `1 / (r + 1)`.
    pub fn from_ranked_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self::from_counts(
            words
                .into_iter()
                .enumerate()
                .map(|(rank, w)| (w.as_ref().to_string(), RANKED_TOP_COUNT / (rank as f64 + 1.0))),
        )
    }

    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Segment `text` into lowercase words. Characters other than
    /// letters and digits are dropped first.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = normalize(text).chars().collect();
        let n = chars.len();
        if n == 0 {
            return Vec::new();
        }

        // best[i] = (score, start of the last word) for chars[..i]
        let mut best: Vec<(f64, usize)> = vec![(f64::NEG_INFINITY, 0); n + 1];
        best[0] = (0.0, 0);

        for end in 1..=n {
            for start in end.saturating_sub(MAX_WORD_LEN)..end {
                let word: String = chars[start..end].iter().collect();
                let score = best[start].0 + self.log_prob(&word);
                if score > best[end].0 {
                    best[end] = (score, start);
                }
            }
        }

        let mut words = Vec::new();
        let mut end   = n;
        while end > 0 {
            let start = best[end].1;
            words.push(chars[start..end].iter().collect());
            end = start;
        }
        words.reverse();
        words
    }

    fn log_prob(&self, word: &str) -> f64 {
        let total = self.total.max(1.0);
        match self.counts.get(word) {
            Some(count) => (count / total).log10(),
            None => 1.0 - total.log10() - word.chars().count() as f64,
        }
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> WordSegmenter {
        WordSegmenter::from_ranked_words([
            "the", "news", "today", "is", "breaking", "fake", "stop", "lies", "a", "in",
        ])
    }

    #[test]
    fn test_splits_concatenated_words() {
        assert_eq!(segmenter().segment("breakingnewstoday"), vec!["breaking", "news", "today"]);
    }

    #[test]
    fn test_lowercases_and_drops_punctuation() {
        assert_eq!(segmenter().segment("StopThe-Lies!"), vec!["stop", "the", "lies"]);
    }

    #[test]
    fn test_unknown_fragment_survives_whole() {
        assert_eq!(segmenter().segment("zxq"), vec!["zxq"]);
    }

    #[test]
    fn test_keeps_digits() {
        let words = segmenter().segment("news2020");
        assert_eq!(words.concat(), "news2020");
        assert_eq!(words[0], "news");
    }

    #[test]
    fn test_empty_input() {
        assert!(segmenter().segment("").is_empty());
        assert!(segmenter().segment("!!!").is_empty());
    }

    #[test]
    fn test_counts_accumulate_case_insensitively() {
        let s = WordSegmenter::from_counts([("News", 2.0), ("news", 3.0)]);
        assert_eq!(s.vocabulary_size(), 1);
    }
}
