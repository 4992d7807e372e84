//! Top-level analysis engine
//!
//! Coordinates the scoring components into one pure, synchronous pass:
//! competency scores, domain aggregates, job recommendations, and the
//! strengths/weaknesses synthesis. Given identical inputs the result is
//! identical; callers recompute on demand and replace the previous result
//! wholesale.

use crate::config::ScoringPolicy;
use crate::referential::{KeywordTable, Referential};
use crate::scoring::competency::{CompetencyScorer, CompetencyScores};
use crate::scoring::domains::{aggregate_domains, DomainScore};
use crate::scoring::recommender::{JobRecommendation, JobRecommender};
use crate::scoring::text_similarity::SimilarityScorer;
use crate::session::UserResponses;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Domain-weight-weighted global score in [0,1].
    pub global_score: f32,

    /// Per-domain scores in catalogue order.
    pub domain_scores: Vec<DomainScore>,

    /// All catalogue jobs, descending by final score.
    pub recommendations: Vec<JobRecommendation>,

    /// Display names of the strongest competencies, at most 5.
    pub strongest_competencies: Vec<String>,

    /// Display names of the weakest competencies, at most 5,
    /// lowest-scoring first.
    pub weakest_competencies: Vec<String>,

    /// Filled by the external generation step, never by the core.
    pub progression_plan: Option<String>,
    pub professional_bio: Option<String>,

    /// Scoring policy the result was produced under.
    pub policy_version: String,
}

pub struct AnalysisEngine<'a> {
    referential: &'a Referential,
    keywords: &'a KeywordTable,
    policy: &'a ScoringPolicy,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(
        referential: &'a Referential,
        keywords: &'a KeywordTable,
        policy: &'a ScoringPolicy,
    ) -> Self {
        Self {
            referential,
            keywords,
            policy,
        }
    }

    /// Run the full analysis over one response snapshot.
    pub fn analyze(&self, responses: &UserResponses) -> AnalysisResult {
        let competency_scorer =
            CompetencyScorer::new(self.referential, self.keywords, self.policy);
        let competency_scores = competency_scorer.score_all(responses);

        let domain_scores = aggregate_domains(self.referential, &competency_scores);

        let normalizer = SimilarityScorer::new(
            self.policy.similarity.clone(),
            &self.keywords.generic_vocabulary,
        );
        let open_text = normalizer.normalize(&responses.combined_open_text(self.referential));

        let recommender =
            JobRecommender::new(self.referential, self.keywords, &self.policy.recommendation);
        let recommendations =
            recommender.recommend(&competency_scores, &domain_scores, &open_text);

        let (strongest, weakest) = self.highlight_competencies(&competency_scores);

        AnalysisResult {
            global_score: self.global_score(&domain_scores),
            domain_scores,
            recommendations,
            strongest_competencies: strongest,
            weakest_competencies: weakest,
            progression_plan: None,
            professional_bio: None,
            policy_version: self.policy.version.clone(),
        }
    }

    /// Weighted mean of domain scores, weight from the referential.
    fn global_score(&self, domain_scores: &[DomainScore]) -> f32 {
        let mut total = 0.0f32;
        let mut weight_sum = 0.0f32;
        for domain_score in domain_scores {
            let weight = self
                .referential
                .domain(&domain_score.domain_id)
                .map(|d| d.weight)
                .unwrap_or(1.0);
            total += domain_score.score * weight;
            weight_sum += weight;
        }
        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            0.0
        }
    }

    /// Top strengths (at or above the strength threshold, best first) and
    /// the lowest-scoring weaknesses (below the weakness threshold,
    /// lowest first), both capped at the highlight count.
    fn highlight_competencies(
        &self,
        competency_scores: &CompetencyScores,
    ) -> (Vec<String>, Vec<String>) {
        let synthesis = &self.policy.synthesis;

        // Catalogue order as the stable tie-break.
        let mut ranked: Vec<(&str, f32)> = self
            .referential
            .competencies()
            .map(|c| {
                (
                    c.id.as_str(),
                    competency_scores.get(&c.id).copied().unwrap_or(0.0),
                )
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let name_of = |id: &str| {
            self.referential
                .competency(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let strongest: Vec<String> = ranked
            .iter()
            .filter(|(_, score)| *score >= synthesis.strength_threshold)
            .take(synthesis.highlight_count)
            .map(|(id, _)| name_of(id))
            .collect();

        let weakest: Vec<String> = ranked
            .iter()
            .rev()
            .filter(|(_, score)| *score < synthesis.weakness_threshold)
            .take(synthesis.highlight_count)
            .map(|(id, _)| name_of(id))
            .collect();

        (strongest, weakest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referential::{load_keywords, load_referential};

    fn defaults() -> (Referential, KeywordTable, ScoringPolicy) {
        let referential = load_referential(None).unwrap();
        let keywords = load_keywords(None).unwrap();
        (referential, keywords, ScoringPolicy::default())
    }

    #[test]
    fn test_empty_responses_produce_zero_result() {
        let (referential, keywords, policy) = defaults();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);

        let result = engine.analyze(&UserResponses::default());

        assert_eq!(result.global_score, 0.0);
        assert!(result.domain_scores.iter().all(|d| d.score == 0.0));
        assert!(result.recommendations.iter().all(|r| r.score == 0.0));
        assert!(result.strongest_competencies.is_empty());
        assert!(result.progression_plan.is_none());
        assert!(result.professional_bio.is_none());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let (referential, keywords, policy) = defaults();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);

        let mut responses = UserResponses::default();
        responses.likert.insert("L01".to_string(), 4);
        responses.open.insert(
            "O01".to_string(),
            "I built a dashboard project in python with pandas and sql".to_string(),
        );

        let first = engine.analyze(&responses);
        let second = engine.analyze(&responses);

        assert_eq!(first.global_score, second.global_score);
        assert_eq!(first.domain_scores, second.domain_scores);
        assert_eq!(
            first.strongest_competencies,
            second.strongest_competencies
        );
        assert_eq!(first.weakest_competencies, second.weakest_competencies);
        let first_ids: Vec<&str> = first.recommendations.iter().map(|r| r.job.id.as_str()).collect();
        let second_ids: Vec<&str> = second.recommendations.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_all_scores_in_range() {
        let (referential, keywords, policy) = defaults();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);

        let mut responses = UserResponses::default();
        for q in &referential.questions.likert {
            responses.likert.insert(q.id.clone(), 5);
        }
        for q in &referential.questions.open {
            responses.open.insert(
                q.id.clone(),
                "python sql spark etl pipeline dashboard machine learning project \
                 experience deep learning transformers prompt rag agents"
                    .to_string(),
            );
        }
        for q in &referential.questions.multi_choice {
            responses
                .multi_choice
                .insert(q.id.clone(), q.options.clone());
        }

        let result = engine.analyze(&responses);

        assert!((0.0..=1.0).contains(&result.global_score));
        for domain in &result.domain_scores {
            assert!((0.0..=1.0).contains(&domain.score));
            for score in domain.competency_scores.values() {
                assert!((0.0..=1.0).contains(score));
            }
        }
        for rec in &result.recommendations {
            assert!(rec.score.is_finite());
            assert!((0.0..=1.0).contains(&rec.score));
        }
        assert!(result.strongest_competencies.len() <= 5);
        assert!(result.weakest_competencies.len() <= 5);
    }

    #[test]
    fn test_policy_version_is_stamped() {
        let (referential, keywords, policy) = defaults();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);
        let result = engine.analyze(&UserResponses::default());
        assert_eq!(result.policy_version, policy.version);
    }
}
