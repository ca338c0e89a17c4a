// ============================================================
// Layer 4 — Tweet Span Parser
// ============================================================
// Finds the three kinds of span the normalizer rewrites:
//
//   Url      → http(s)://…, www.…, pic.twitter.com/…
//   Hashtag  → #SomeTag (span includes the '#')
//   Emoji    → runs of pictographs, skin-tone modifiers,
//              flags, variation selectors and ZWJ joiners
//
// Spans never overlap. Where two would, the earlier kind in the
// list above wins, so a URL fragment `…/page#top` stays part of
// its URL.

use std::sync::LazyLock;

use regex::Regex;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.|pic\.twitter\.com/)[^\s]+").unwrap()
});
static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").unwrap());
static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\p{Extended_Pictographic}|[\x{1F1E6}-\x{1F1FF}]|[\x{1F3FB}-\x{1F3FF}]|\x{FE0F}|\x{200D}|\x{20E3})+",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Url,
    Hashtag,
    Emoji,
}

/// A matched span. `start`/`end` are byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind:  SpanKind,
    pub start: usize,
    pub end:   usize,
    pub text:  String,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Hashtag body without the leading '#'.
    pub fn hashtag_body(&self) -> &str {
        self.text.trim_start_matches('#')
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TweetParser;

impl TweetParser {
    pub fn new() -> Self {
        Self
    }

    /// Non-overlapping spans sorted by start offset.
    pub fn parse(&self, text: &str) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();

        for (kind, regex) in [
            (SpanKind::Url, &*URL_REGEX),
            (SpanKind::Hashtag, &*HASHTAG_REGEX),
            (SpanKind::Emoji, &*EMOJI_REGEX),
        ] {
            for m in regex.find_iter(text) {
                let span = Span {
                    kind,
                    start: m.start(),
                    end:   m.end(),
                    text:  m.as_str().to_string(),
                };
                if !spans.iter().any(|s| s.overlaps(&span)) {
                    spans.push(span);
                }
            }
        }

        spans.sort_by_key(|s| s.start);
        spans
    }
}
