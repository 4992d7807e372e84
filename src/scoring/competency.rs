//! Per-competency scoring from heterogeneous response channels
//!
//! Each competency is scored from up to three channels (Likert
//! self-ratings, free text, multi-choice selections). Channel weights
//! renormalize over the channels the user actually answered, so a
//! competency assessed only through Likert questions gets the full
//! weight of that channel rather than a diluted one.

use crate::config::ScoringPolicy;
use crate::referential::{KeywordTable, Referential};
use crate::scoring::text_similarity::SimilarityScorer;
use crate::session::UserResponses;
use std::collections::BTreeMap;

/// Competency id → score in [0,1], ordered for deterministic output.
pub type CompetencyScores = BTreeMap<String, f32>;

pub struct CompetencyScorer<'a> {
    referential: &'a Referential,
    keywords: &'a KeywordTable,
    policy: &'a ScoringPolicy,
    similarity: SimilarityScorer,
}

impl<'a> CompetencyScorer<'a> {
    pub fn new(
        referential: &'a Referential,
        keywords: &'a KeywordTable,
        policy: &'a ScoringPolicy,
    ) -> Self {
        let similarity =
            SimilarityScorer::new(policy.similarity.clone(), &keywords.generic_vocabulary);
        Self {
            referential,
            keywords,
            policy,
            similarity,
        }
    }

    /// Score every competency in the referential.
    pub fn score_all(&self, responses: &UserResponses) -> CompetencyScores {
        let open_text = responses.combined_open_text(self.referential);
        let has_open_text = !self.similarity.normalize(&open_text).is_empty();
        let participation = if responses.has_any_response() {
            self.policy.competency.participation_bonus
        } else {
            0.0
        };

        self.referential
            .competencies()
            .map(|competency| {
                let score =
                    self.score_one(&competency.id, responses, &open_text, has_open_text)
                        + participation;
                (
                    competency.id.clone(),
                    score.clamp(0.0, self.policy.competency.score_cap),
                )
            })
            .collect()
    }

    fn score_one(
        &self,
        competency_id: &str,
        responses: &UserResponses,
        open_text: &str,
        has_open_text: bool,
    ) -> f32 {
        let weights = &self.policy.channels;
        let mut total = 0.0f32;
        let mut weight_sum = 0.0f32;

        if let Some(likert) = self.likert_channel(competency_id, responses) {
            total += likert * weights.likert;
            weight_sum += weights.likert;
        }
        if has_open_text {
            total += self.open_channel(competency_id, open_text) * weights.open_text;
            weight_sum += weights.open_text;
        }
        if let Some(choice) = self.choice_channel(competency_id, responses) {
            total += choice * weights.multi_choice;
            weight_sum += weights.multi_choice;
        }

        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            0.0
        }
    }

    /// Mean of the curved 1-5 ratings over answered questions tagged with
    /// this competency. The curve is deliberately non-linear: self-reported
    /// mastery is overstated at the low end and capped at the high end.
    fn likert_channel(&self, competency_id: &str, responses: &UserResponses) -> Option<f32> {
        let curve = &self.policy.competency.likert_curve;
        let mut sum = 0.0f32;
        let mut count = 0usize;

        for question in &self.referential.questions.likert {
            if !question.competencies.iter().any(|c| c == competency_id) {
                continue;
            }
            if let Some(rating) = responses.likert.get(&question.id) {
                let rating = (*rating).clamp(1, 5) as usize;
                sum += curve[rating];
                count += 1;
            }
        }

        (count > 0).then(|| sum / count as f32)
    }

    /// Similarity of the full open text against this competency's keyword
    /// list, floored to give minimum credit for attempting an answer. The
    /// search deliberately spans all open answers: question tagging in the
    /// referential is domain-level, keyword evidence can appear anywhere.
    fn open_channel(&self, competency_id: &str, open_text: &str) -> f32 {
        let score = self
            .similarity
            .score(open_text, self.keywords.keywords_for(competency_id));
        score.max(self.policy.competency.open_text_floor)
    }

    /// Selection-count ratio over answered multi-choice questions tagged
    /// with this competency.
    fn choice_channel(&self, competency_id: &str, responses: &UserResponses) -> Option<f32> {
        let divisor = self.policy.competency.choice_divisor;
        let mut sum = 0.0f32;
        let mut count = 0usize;

        for question in &self.referential.questions.multi_choice {
            if !question.competencies.iter().any(|c| c == competency_id) {
                continue;
            }
            if let Some(selected) = responses.multi_choice.get(&question.id) {
                if !selected.is_empty() {
                    sum += (selected.len() as f32 / divisor).min(1.0);
                    count += 1;
                }
            }
        }

        (count > 0).then(|| sum / count as f32)
    }
}
