//! Digest builders for text generation
//!
//! A digest is the compact, human-readable summary of an analysis result
//! that gets handed to the text generator. Building the digest is pure:
//! the same result always produces the same digest string, which also
//! makes digests usable as cache keys upstream.

use crate::scoring::AnalysisResult;
use std::fmt::Write;

/// How many recommendations a digest carries.
const DIGEST_JOB_COUNT: usize = 3;

/// Coarse level estimate from the global score.
pub fn level_estimate(global_score: f32) -> &'static str {
    if global_score >= 0.7 {
        "Senior"
    } else if global_score >= 0.5 {
        "Mid-level"
    } else {
        "Junior"
    }
}

/// Digest feeding the progression-plan generator: current standing,
/// weak spots, and what the top-ranked jobs still require.
pub fn progression_digest(result: &AnalysisResult) -> String {
    let mut digest = String::new();

    let _ = writeln!(
        digest,
        "Global score: {:.0}% ({})",
        result.global_score * 100.0,
        level_estimate(result.global_score)
    );

    for domain in &result.domain_scores {
        let _ = writeln!(
            digest,
            "Domain {}: {:.0}%",
            domain.domain_name,
            domain.score * 100.0
        );
    }

    if !result.weakest_competencies.is_empty() {
        let _ = writeln!(
            digest,
            "Areas to develop: {}",
            result.weakest_competencies.join(", ")
        );
    }

    for rec in result.recommendations.iter().take(DIGEST_JOB_COUNT) {
        let _ = write!(
            digest,
            "Target job: {} ({}, {:.0}%)",
            rec.job.title,
            rec.tier.label(),
            rec.score * 100.0
        );
        if rec.missing_competencies.is_empty() {
            let _ = writeln!(digest);
        } else {
            let _ = writeln!(digest, " missing: {}", rec.missing_competencies.join(", "));
        }
    }

    digest
}

/// Digest feeding the bio generator: strengths and the best-fitting role.
pub fn bio_digest(result: &AnalysisResult) -> String {
    let mut digest = String::new();

    let _ = writeln!(
        digest,
        "Profile level: {} ({:.0}% overall)",
        level_estimate(result.global_score),
        result.global_score * 100.0
    );

    if !result.strongest_competencies.is_empty() {
        let _ = writeln!(
            digest,
            "Key strengths: {}",
            result.strongest_competencies.join(", ")
        );
    }

    if let Some(best) = result.recommendations.first() {
        let _ = writeln!(
            digest,
            "Best match: {} ({:.0}%)",
            best.job.title,
            best.score * 100.0
        );
    }

    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringPolicy;
    use crate::referential::{load_keywords, load_referential};
    use crate::scoring::AnalysisEngine;
    use crate::session::UserResponses;

    fn sample_result() -> AnalysisResult {
        let referential = load_referential(None).unwrap();
        let keywords = load_keywords(None).unwrap();
        let policy = ScoringPolicy::default();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);

        let mut responses = UserResponses::default();
        responses.likert.insert("L01".to_string(), 4);
        responses.likert.insert("L02".to_string(), 3);
        responses.open.insert(
            "O01".to_string(),
            "I worked on a python dashboard project with sql and data cleaning".to_string(),
        );
        engine.analyze(&responses)
    }

    #[test]
    fn test_level_estimate_bands() {
        assert_eq!(level_estimate(0.85), "Senior");
        assert_eq!(level_estimate(0.7), "Senior");
        assert_eq!(level_estimate(0.55), "Mid-level");
        assert_eq!(level_estimate(0.2), "Junior");
    }

    #[test]
    fn test_progression_digest_is_deterministic() {
        let result = sample_result();
        assert_eq!(progression_digest(&result), progression_digest(&result));
    }

    #[test]
    fn test_progression_digest_mentions_top_jobs() {
        let result = sample_result();
        let digest = progression_digest(&result);
        assert!(digest.contains("Global score"));
        assert!(digest.contains(&result.recommendations[0].job.title));
    }

    #[test]
    fn test_bio_digest_mentions_best_match() {
        let result = sample_result();
        let digest = bio_digest(&result);
        assert!(digest.contains("Profile level"));
        assert!(digest.contains(&result.recommendations[0].job.title));
    }
}
