// ============================================================
// Layer 4 — Tweet Text Normalizer
// ============================================================
// Turns one raw social-media post into a cleaned, single-space
// tokenised string that a classifier can consume.
//
// Steps (applied in order, each feeding the next):
//   1. ’ → '   and   … → ...
//   2. Parse hashtag / URL / emoji spans
//   3. Hashtag  → its body split into dictionary words
//   4. URL      → url$$
//   5. Emoji    → emoji$$
//   6. Cut at the first of " via", "|", " - ", " – " made of
//      input text only; the padding added in steps 3-5 never
//      counts toward a separator
//   7. Per space-separated token: keep sentinels and dictionary
//      words, otherwise segment the token and keep the pieces
//      that are neither punctuation nor purely numeric
//   8. Join with single spaces
//
// The dictionary and segmenter arrive through NormalizerConfig,
// built once by the caller and handed to TextNormalizer::new.

use std::{collections::HashSet, fs, ops::Range, path::Path};

use anyhow::{Context, Result};

use crate::data::segmenter::WordSegmenter;
use crate::data::tweet_parser::{SpanKind, TweetParser};

pub const URL_SENTINEL:   &str = "url$$";
pub const EMOJI_SENTINEL: &str = "emoji$$";

/// Suffix shared by every sentinel token.
const SENTINEL_SUFFIX: &str = "$$";

/// Trailing-attribution separators, in priority order.
const SEPARATORS: [&str; 4] = [" via", "|", " - ", " – "];

// ─── NormalizerConfig ─────────────────────────────────────────────────────────
/// Word dictionary plus the segmenter used for out-of-dictionary tokens.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    dictionary: HashSet<String>,
    segmenter:  WordSegmenter,
}

impl NormalizerConfig {
    /// Build from a most-frequent-first word list. The list is both the
    /// dictionary and the segmenter's frequency model.
    pub fn from_word_list<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            segmenter:  WordSegmenter::from_ranked_words(&words),
            dictionary: words.into_iter().collect(),
        }
    }

    /// Replace the segmenter's frequency model.
    pub fn with_segmenter(mut self, segmenter: WordSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Load the dictionary (one word per line, most frequent first) and,
    /// optionally, unigram counts (`word<TAB>count` per line).
    pub fn load(dictionary_path: &Path, unigram_path: Option<&Path>) -> Result<Self> {
        let text = fs::read_to_string(dictionary_path).with_context(|| {
            format!("Cannot read dictionary '{}'", dictionary_path.display())
        })?;
        let mut config = Self::from_word_list(text.lines());
        tracing::info!(
            "Loaded {} dictionary words from '{}'",
            config.dictionary.len(),
            dictionary_path.display()
        );

        if let Some(path) = unigram_path {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Cannot read unigram counts '{}'", path.display()))?;
            let counts = text.lines().filter_map(|line| {
                let (word, count) = line.split_once('\t')?;
                Some((word.to_string(), count.trim().parse::<f64>().ok()?))
            });
            let segmenter = WordSegmenter::from_counts(counts);
            tracing::info!(
                "Loaded {} unigram counts from '{}'",
                segmenter.vocabulary_size(),
                path.display()
            );
            config = config.with_segmenter(segmenter);
        }

        Ok(config)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(&word.to_lowercase())
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }
}

// ─── TextNormalizer ───────────────────────────────────────────────────────────
pub struct TextNormalizer {
    config: NormalizerConfig,
    parser: TweetParser,
}

impl TextNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config, parser: TweetParser::new() }
    }

    /// Clean one post. Empty input gives empty output.
    pub fn clean_tweet_text(&self, text: &str) -> String {
        // ── Steps 1-5: character fixes, then span rewriting ──────────────────
        let text      = text.replace('\u{2019}', "'").replace('\u{2026}', "...");
        let (rewritten, inserted) = self.rewrite_spans(&text);

        // ── Step 6: drop trailing attributions ───────────────────────────────
        let kept = truncate_outside(&rewritten, &inserted);

        // ── Steps 7-8: dictionary lookup with segmenter fallback ─────────────
        let mut tokens: Vec<String> = Vec::new();
        for token in kept.split(' ') {
            if token.is_empty() {
                continue;
            }
            if token.ends_with(SENTINEL_SUFFIX) || self.config.contains(token) {
                tokens.push(token.to_string());
                continue;
            }
            tokens.extend(
                self.config
                    .segment(token)
                    .into_iter()
                    .filter(|w| !is_punctuation(w) && !is_numeric(w)),
            );
        }

        tokens.join(" ")
    }

    /// Replace every span with its padded rewrite. Also returns the byte
    /// ranges of `out` that were inserted rather than copied from `text`.
    fn rewrite_spans(&self, text: &str) -> (String, Vec<Range<usize>>) {
        let mut out      = String::with_capacity(text.len());
        let mut inserted = Vec::new();
        let mut cursor   = 0usize;

        for span in self.parser.parse(text) {
            out.push_str(&text[cursor..span.start]);
            let replacement = match span.kind {
                SpanKind::Hashtag => self.config.segment(span.hashtag_body()).join(" "),
                SpanKind::Url     => URL_SENTINEL.to_string(),
                SpanKind::Emoji   => EMOJI_SENTINEL.to_string(),
            };
            let start = out.len();
            out.push(' ');
            out.push_str(&replacement);
            out.push(' ');
            inserted.push(start..out.len());
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        (out, inserted)
    }
}

/// Keep only the text before the first separator found, checking the
/// separators in priority order. A separator occurrence that touches
/// any of the `inserted` byte ranges does not count.
fn truncate_outside<'t>(text: &'t str, inserted: &[Range<usize>]) -> &'t str {
    SEPARATORS
        .iter()
        .find_map(|sep| {
            text.match_indices(*sep)
                .map(|(idx, _)| idx)
                .find(|&idx| {
                    let end = idx + sep.len();
                    !inserted.iter().any(|r| r.start < end && idx < r.end)
                })
        })
        .map_or(text, |idx| &text[..idx])
}

/// Drop every ASCII punctuation character.
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_punctuation())
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(NormalizerConfig::from_word_list([
            "the", "news", "is", "fake", "breaking", "today", "stop", "lies", "this", "story",
            "a", "it's", "real", "read", "more", "about", "and", "see", "via",
        ]))
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalizer().clean_tweet_text(""), "");
    }

    #[test]
    fn test_urls_and_emoji_become_sentinels() {
        let out = normalizer().clean_tweet_text("this story 😡 https://t.co/xyz");
        assert_eq!(out, "this story emoji$$ url$$");
    }

    #[test]
    fn test_hashtag_is_segmented() {
        let out = normalizer().clean_tweet_text("#BreakingNews fake story");
        assert_eq!(out, "breaking news fake story");
    }

    #[test]
    fn test_truncates_attribution() {
        let n = normalizer();
        assert_eq!(n.clean_tweet_text("fake news via @someone"), "fake news");
        assert_eq!(n.clean_tweet_text("real story | the news"), "real story");
        assert_eq!(n.clean_tweet_text("real story - the news"), "real story");
    }

    #[test]
    fn test_separator_priority() {
        // " via" outranks "|" even when it appears later
        assert_eq!(truncate_outside("a | b via c", &[]), "a | b");
        assert_eq!(truncate_outside("no separators", &[]), "no separators");
    }

    #[test]
    fn test_span_padding_does_not_form_a_separator() {
        let n = normalizer();
        assert_eq!(n.clean_tweet_text("this story😀via see more"), "this story emoji$$ via see more");
        assert_eq!(n.clean_tweet_text("fake story😀- read more"), "fake story emoji$$ read more");
        assert_eq!(n.clean_tweet_text("fake story -😀 read more"), "fake story emoji$$ read more");
        // a separator written in the post still cuts next to a span
        assert_eq!(n.clean_tweet_text("fake story 😀 via @someone"), "fake story emoji$$");
    }

    #[test]
    fn test_unicode_quote_is_normalised() {
        assert_eq!(normalizer().clean_tweet_text("it\u{2019}s fake"), "it's fake");
    }

    #[test]
    fn test_unknown_tokens_are_segmented_and_filtered() {
        let out = normalizer().clean_tweet_text("fakenews!! 2019 ... today");
        assert_eq!(out, "fake news today");
    }

    #[test]
    fn test_dictionary_words_keep_their_case() {
        assert_eq!(normalizer().clean_tweet_text("The News"), "The News");
    }

    #[test]
    fn test_idempotent_on_clean_text() {
        let n     = normalizer();
        let clean = "the news is fake url$$ emoji$$ read more";
        assert_eq!(n.clean_tweet_text(clean), clean);
        let once = n.clean_tweet_text("Stop the lies!!! #FakeNews 🙄 http://x.co/1");
        assert_eq!(n.clean_tweet_text(&once), once);
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("a, b! (c)"), "a b c");
    }

    #[test]
    fn test_load_reads_dictionary_and_counts() {
        let dir  = tempfile::tempdir().unwrap();
        let dict = dir.path().join("words.txt");
        let uni  = dir.path().join("unigrams.txt");
        fs::write(&dict, "news\nfake\n").unwrap();
        fs::write(&uni, "fake\t500\nnews\t900\nbroken line\n").unwrap();

        let cfg = NormalizerConfig::load(&dict, Some(&uni)).unwrap();
        assert!(cfg.contains("NEWS"));
        assert_eq!(cfg.segment("fakenews"), vec!["fake", "news"]);
    }
}
