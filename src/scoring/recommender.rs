//! Job profile recommendation
//!
//! Ranks every job in the catalogue against the user's competency and
//! domain scores, with two corrective adjustments: a strong penalty for
//! jobs outside the family the user's free text shows interest in, and a
//! seniority gate that dampens senior roles for users whose overall level
//! is below the job's minimum.

use crate::config::RecommendationPolicy;
use crate::referential::{JobFamily, JobProfile, KeywordTable, Referential};
use crate::scoring::competency::CompetencyScores;
use crate::scoring::domains::DomainScore;
use crate::scoring::text_similarity;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Excellent,
    Good,
    Moderate,
    Weak,
}

impl Compatibility {
    pub fn label(&self) -> &'static str {
        match self {
            Compatibility::Excellent => "excellent",
            Compatibility::Good => "good",
            Compatibility::Moderate => "moderate",
            Compatibility::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job: JobProfile,
    pub score: f32,
    pub coverage_score: f32,
    pub missing_competencies: Vec<String>,
    pub tier: Compatibility,
}

/// Detects the user's dominant job-family interest from free text.
///
/// Patterns come from the keyword table and are passed through the same
/// normalization applied to the open text, so accented or punctuated
/// patterns ("étl", "a/b test", "fine-tuning") match their normalized
/// forms in the input.
pub struct FamilyDetector {
    automaton: Option<AhoCorasick>,
    pattern_families: Vec<JobFamily>,
    compatibility: HashMap<JobFamily, Vec<JobFamily>>,
    min_hits: usize,
}

impl FamilyDetector {
    pub fn new(table: &KeywordTable, policy: &RecommendationPolicy) -> Self {
        let mut patterns = Vec::new();
        let mut pattern_families = Vec::new();
        let mut compatibility = HashMap::new();

        let punctuation = text_similarity::punctuation_regex();
        for entry in &table.families {
            compatibility.insert(entry.family, entry.compatible_with.clone());
            for pattern in &entry.patterns {
                let normalized = text_similarity::normalize(pattern, &punctuation);
                if normalized.is_empty() {
                    continue;
                }
                patterns.push(normalized);
                pattern_families.push(entry.family);
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&patterns)
                .ok()
        };

        Self {
            automaton,
            pattern_families,
            compatibility,
            min_hits: policy.family_min_hits,
        }
    }

    /// The dominant family, if one pattern set has a strict majority of
    /// hits and at least `min_hits` of them.
    pub fn dominant_family(&self, normalized_text: &str) -> Option<JobFamily> {
        let automaton = self.automaton.as_ref()?;

        let mut hits: HashMap<JobFamily, usize> = HashMap::new();
        for mat in automaton.find_overlapping_iter(normalized_text) {
            let family = self.pattern_families[mat.pattern().as_usize()];
            *hits.entry(family).or_insert(0) += 1;
        }

        let (&best, &best_hits) = hits.iter().max_by_key(|(_, count)| **count)?;
        if best_hits < self.min_hits {
            return None;
        }
        let tied = hits.values().filter(|count| **count == best_hits).count();
        (tied == 1).then_some(best)
    }

    /// Whether a job family is acceptable given a detected interest.
    pub fn is_compatible(&self, detected: JobFamily, job_family: JobFamily) -> bool {
        self.compatibility
            .get(&detected)
            .map(|set| set.contains(&job_family))
            .unwrap_or(true)
    }
}

pub struct JobRecommender<'a> {
    referential: &'a Referential,
    policy: &'a RecommendationPolicy,
    detector: FamilyDetector,
}

impl<'a> JobRecommender<'a> {
    pub fn new(
        referential: &'a Referential,
        table: &KeywordTable,
        policy: &'a RecommendationPolicy,
    ) -> Self {
        let detector = FamilyDetector::new(table, policy);
        Self {
            referential,
            policy,
            detector,
        }
    }

    /// Rank all catalogue jobs, descending by final score. The sort is
    /// stable: tied jobs keep catalogue order.
    pub fn recommend(
        &self,
        competency_scores: &CompetencyScores,
        domain_scores: &[DomainScore],
        normalized_open_text: &str,
    ) -> Vec<JobRecommendation> {
        let domain_map: HashMap<&str, f32> = domain_scores
            .iter()
            .map(|d| (d.domain_id.as_str(), d.score))
            .collect();
        let average_score = if competency_scores.is_empty() {
            0.0
        } else {
            competency_scores.values().sum::<f32>() / competency_scores.len() as f32
        };
        let detected_family = self.detector.dominant_family(normalized_open_text);

        let mut recommendations: Vec<JobRecommendation> = self
            .referential
            .jobs
            .iter()
            .map(|job| {
                self.score_job(job, competency_scores, &domain_map, average_score, detected_family)
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations
    }

    fn score_job(
        &self,
        job: &JobProfile,
        competency_scores: &CompetencyScores,
        domain_map: &HashMap<&str, f32>,
        average_score: f32,
        detected_family: Option<JobFamily>,
    ) -> JobRecommendation {
        let (coverage, missing) = self.coverage(job, competency_scores);
        let domain_fit = self.domain_fit(job, domain_map);

        let mut score =
            coverage * self.policy.coverage_weight + domain_fit * self.policy.domain_fit_weight;

        if let Some(family) = detected_family {
            if !self.detector.is_compatible(family, job.family) {
                score *= self.policy.family_penalty;
            }
        }

        if !job.junior_friendly && average_score < job.min_score {
            let gap = job.min_score - average_score;
            score *= (1.0 - gap * self.policy.seniority_slope).max(self.policy.seniority_floor);
        }

        let score = score.clamp(0.0, 1.0);

        JobRecommendation {
            job: job.clone(),
            score,
            coverage_score: coverage,
            missing_competencies: missing,
            tier: self.tier(score),
        }
    }

    /// Mean score over required competencies plus the display names of
    /// those under the missing threshold. Unknown ids contribute 0 and
    /// fall back to their raw id as the display name.
    fn coverage(
        &self,
        job: &JobProfile,
        competency_scores: &CompetencyScores,
    ) -> (f32, Vec<String>) {
        if job.required_competencies.is_empty() {
            return (0.0, Vec::new());
        }

        let mut total = 0.0f32;
        let mut missing = Vec::new();
        for comp_id in &job.required_competencies {
            let score = competency_scores.get(comp_id).copied().unwrap_or(0.0);
            total += score;
            if score < self.policy.missing_threshold {
                let name = self
                    .referential
                    .competency(comp_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| comp_id.clone());
                missing.push(name);
            }
        }

        (total / job.required_competencies.len() as f32, missing)
    }

    /// Weighted mean of domain scores over the job's key domains, weight
    /// taken from the referential (1.0 when the domain is unknown).
    fn domain_fit(&self, job: &JobProfile, domain_map: &HashMap<&str, f32>) -> f32 {
        if job.key_domains.is_empty() {
            return 0.0;
        }

        let mut total = 0.0f32;
        let mut weight_sum = 0.0f32;
        for domain_id in &job.key_domains {
            let weight = self
                .referential
                .domain(domain_id)
                .map(|d| d.weight)
                .unwrap_or(1.0);
            let score = domain_map.get(domain_id.as_str()).copied().unwrap_or(0.0);
            total += score * weight;
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            0.0
        }
    }

    fn tier(&self, score: f32) -> Compatibility {
        if score >= self.policy.tier_excellent {
            Compatibility::Excellent
        } else if score >= self.policy.tier_good {
            Compatibility::Good
        } else if score >= self.policy.tier_moderate {
            Compatibility::Moderate
        } else {
            Compatibility::Weak
        }
    }
}
