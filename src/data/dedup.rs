// ============================================================
// Layer 4 — Stance Target De-duplication
// ============================================================
// When a tweet quotes the headline it reacts to, the model could
// learn the label from the copied text alone. This step strips the
// shared text out of the target:
//
//   loop:
//     s = longest common substring(target, source)
//     if s is empty or shorter than a third of target: stop
//     remove every occurrence of s from target
//   strip ASCII punctuation
//
// Every removal deletes at least one character, so the loop ends.
// Each LCS pass is O(len(target) * len(source)); meant for
// tweet-length strings, not whole articles.

use crate::data::normalizer::remove_punctuation;

/// Longest common contiguous substring of `a` and `b`, by characters.
/// Ties go to the earliest start in `a`, then the earliest in `b`.
pub fn longest_common_substring(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return String::new();
    }

    // prev[j + 1] = length of the common suffix of a[..i] and b[..=j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best_len = 0usize;
    let mut best_end = 0usize;

    for i in 0..a.len() {
        for j in 0..b.len() {
            curr[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best_len {
                best_len = curr[j + 1];
                best_end = i + 1;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    a[best_end - best_len..best_end].iter().collect()
}

/// Remove text that `target` shares with `source`, then strip punctuation.
pub fn clean_stance_target(target: &str, source: &str) -> String {
    let mut target = target.to_string();
    loop {
        let common = longest_common_substring(&target, source);
        let common_len = common.chars().count();
        let target_len = target.chars().count();

        if common_len == 0 || (common_len as f64) < target_len as f64 / 3.0 {
            break;
        }
        target = target.replace(&common, "");
    }
    remove_punctuation(&target)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_basic() {
        assert_eq!(longest_common_substring("xxabcdyy", "zabcdz"), "abcd");
        assert_eq!(longest_common_substring("abc", "xyz"), "");
        assert_eq!(longest_common_substring("", "abc"), "");
    }

    #[test]
    fn test_lcs_tie_prefers_earliest_in_first() {
        assert_eq!(longest_common_substring("abXcd", "cdYab"), "ab");
    }

    #[test]
    fn test_lcs_is_unicode_aware() {
        assert_eq!(longest_common_substring("naïve café", "le café"), "e café");
    }

    #[test]
    fn test_shared_headline_is_removed() {
        let out = clean_stance_target("Breaking News Today", "Breaking News Today: details inside");
        assert_eq!(out, "");
    }

    #[test]
    fn test_small_overlap_is_kept() {
        // "the " is far shorter than a third of the target
        let out = clean_stance_target("the senator denies every claim", "read the report");
        assert_eq!(out, "the senator denies every claim");
    }

    #[test]
    fn test_quoted_headline_removed_and_punctuation_stripped() {
        let out = clean_stance_target(
            "Fake! Pope endorses candidate",
            "Pope endorses candidate, sources say",
        );
        assert_eq!(out, "Fake ");
    }

    #[test]
    fn test_no_overlap() {
        assert_eq!(clean_stance_target("hello, world", "xyz"), "hello world");
    }
}
