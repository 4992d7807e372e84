//! User response snapshot for one questionnaire session
//!
//! Responses are owned by the active session and passed to the scoring
//! core as an immutable snapshot. Keys referencing unknown question ids
//! are simply never looked up by the scorer.

use crate::referential::Referential;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponses {
    /// Likert self-ratings, 1-5 per question id.
    #[serde(default)]
    pub likert: HashMap<String, u8>,

    /// Free-text answers per open question id.
    #[serde(default)]
    pub open: HashMap<String, String>,

    /// Selected option labels per multi-choice question id.
    #[serde(default)]
    pub multi_choice: HashMap<String, Vec<String>>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for UserResponses {
    fn default() -> Self {
        Self {
            likert: HashMap::new(),
            open: HashMap::new(),
            multi_choice: HashMap::new(),
            created_at: Utc::now(),
        }
    }
}

impl UserResponses {
    /// True if the user answered anything anywhere. Whitespace-only open
    /// answers and empty selections do not count.
    pub fn has_any_response(&self) -> bool {
        !self.likert.is_empty()
            || self.open.values().any(|t| !t.trim().is_empty())
            || self.multi_choice.values().any(|s| !s.is_empty())
    }

    /// All non-empty open-text answers concatenated, in open-question
    /// catalogue order so the result is deterministic.
    pub fn combined_open_text(&self, referential: &Referential) -> String {
        let mut parts = Vec::new();
        for question in &referential.questions.open {
            if let Some(answer) = self.open.get(&question.id) {
                if !answer.trim().is_empty() {
                    parts.push(answer.trim());
                }
            }
        }
        parts.join(" ")
    }

    /// Ids of open questions whose answer is missing or below the
    /// question's minimum word count. This is a UI-layer validity check;
    /// incomplete answers still flow into scoring as-is.
    pub fn incomplete_open_answers(&self, referential: &Referential) -> Vec<String> {
        referential
            .questions
            .open
            .iter()
            .filter(|q| {
                let words = self
                    .open
                    .get(&q.id)
                    .map(|t| t.split_whitespace().count())
                    .unwrap_or(0);
                words < q.min_words
            })
            .map(|q| q.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referential::{OpenQuestion, Questions, Referential};

    fn referential_with_open_questions() -> Referential {
        Referential {
            version: "test".to_string(),
            description: String::new(),
            last_updated: None,
            domains: vec![],
            jobs: vec![],
            questions: Questions {
                likert: vec![],
                open: vec![
                    OpenQuestion {
                        id: "Q1".to_string(),
                        text: "Describe a project".to_string(),
                        domains: vec![],
                        min_words: 30,
                    },
                    OpenQuestion {
                        id: "Q2".to_string(),
                        text: "Describe your tooling".to_string(),
                        domains: vec![],
                        min_words: 10,
                    },
                ],
                multi_choice: vec![],
            },
        }
    }

    #[test]
    fn test_empty_session_has_no_response() {
        let responses = UserResponses::default();
        assert!(!responses.has_any_response());
    }

    #[test]
    fn test_whitespace_open_answer_does_not_count() {
        let mut responses = UserResponses::default();
        responses.open.insert("Q1".to_string(), "   ".to_string());
        assert!(!responses.has_any_response());
    }

    #[test]
    fn test_combined_open_text_follows_catalogue_order() {
        let referential = referential_with_open_questions();
        let mut responses = UserResponses::default();
        responses.open.insert("Q2".to_string(), "second".to_string());
        responses.open.insert("Q1".to_string(), "first".to_string());
        assert_eq!(responses.combined_open_text(&referential), "first second");
    }

    #[test]
    fn test_incomplete_open_answers() {
        let referential = referential_with_open_questions();
        let mut responses = UserResponses::default();
        responses.open.insert(
            "Q2".to_string(),
            "one two three four five six seven eight nine ten".to_string(),
        );
        // Q1 unanswered and Q2 exactly at its minimum.
        let incomplete = responses.incomplete_open_answers(&referential);
        assert_eq!(incomplete, vec!["Q1".to_string()]);
    }
}
