//! Keyword-based text similarity scoring
//!
//! Computes a [0,1] match strength between a blob of free text and one
//! competency's ranked keyword list. Keywords earlier in the list are the
//! canonical vocabulary for the competency; matching is accent- and
//! case-insensitive with half credit for prefix-level partial matches.

use crate::config::SimilarityPolicy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

pub struct SimilarityScorer {
    policy: SimilarityPolicy,
    generic_vocabulary: Vec<String>,
    punctuation: Regex,
}

impl SimilarityScorer {
    pub fn new(policy: SimilarityPolicy, generic_vocabulary: &[String]) -> Self {
        let punctuation = punctuation_regex();
        let generic_vocabulary = generic_vocabulary
            .iter()
            .map(|w| normalize(w, &punctuation))
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            policy,
            generic_vocabulary,
            punctuation,
        }
    }

    /// Lowercased, accent-stripped, punctuation-free form of a text.
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.punctuation)
    }

    /// Score `text` against a ranked keyword list.
    ///
    /// Empty or whitespace-only text scores 0; an empty keyword list zeroes
    /// the ratio component but leaves the effort bonuses intact.
    pub fn score(&self, text: &str, keywords: &[String]) -> f32 {
        let normalized = self.normalize(text);
        if normalized.is_empty() {
            return 0.0;
        }
        let tokens: Vec<&str> = normalized.unicode_words().collect();

        let ratio = if keywords.is_empty() {
            0.0
        } else {
            let mut matched = 0.0f32;
            for keyword in keywords {
                let keyword = self.normalize(keyword);
                if keyword.is_empty() {
                    continue;
                }
                if normalized.contains(&keyword) {
                    matched += 1.0;
                } else if self.has_partial_match(&tokens, &keyword) {
                    matched += self.policy.partial_match_weight;
                }
            }
            matched / (keywords.len() as f32 * self.policy.ratio_divisor)
        };

        let generic_bonus = self.generic_bonus(&normalized);
        let length_bonus = (tokens.len() as f32 / self.policy.length_divisor)
            .min(self.policy.length_bonus_cap);

        (ratio + generic_bonus + length_bonus).min(1.0)
    }

    /// Prefix relation in either direction, both sides at least
    /// `partial_min_len` characters.
    fn has_partial_match(&self, tokens: &[&str], keyword: &str) -> bool {
        let min_len = self.policy.partial_min_len;
        tokens.iter().any(|token| {
            (token.len() >= min_len && keyword.starts_with(token))
                || (keyword.len() >= min_len && token.starts_with(keyword))
        })
    }

    /// Bounded bonus for domain-agnostic positive vocabulary, rewarding
    /// concrete answers ("project", "experience") independent of topic.
    fn generic_bonus(&self, normalized: &str) -> f32 {
        let occurrences: usize = self
            .generic_vocabulary
            .iter()
            .map(|word| normalized.matches(word.as_str()).count())
            .sum();
        (occurrences as f32 * self.policy.generic_bonus_step).min(self.policy.generic_bonus_cap)
    }
}

pub(crate) fn punctuation_regex() -> Regex {
    Regex::new(r"[^a-z0-9'\s]+").expect("Invalid punctuation regex")
}

pub(crate) fn normalize(text: &str, punctuation: &Regex) -> String {
    let lowered = text.to_lowercase();
    // NFD decomposition, then drop the combining marks.
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let cleaned = punctuation.replace_all(&stripped, " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
