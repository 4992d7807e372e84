//! Domain-level score aggregation

use crate::referential::Referential;
use crate::scoring::competency::CompetencyScores;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain_id: String,
    pub domain_name: String,
    pub score: f32,
    pub competency_scores: BTreeMap<String, f32>,
}

/// Arithmetic mean of each domain's competency scores, in catalogue
/// order. Competencies within a domain count equally; a domain with no
/// scored competencies yields 0.
pub fn aggregate_domains(
    referential: &Referential,
    competency_scores: &CompetencyScores,
) -> Vec<DomainScore> {
    referential
        .domains
        .iter()
        .map(|domain| {
            let scores: BTreeMap<String, f32> = domain
                .competencies
                .iter()
                .map(|c| {
                    (
                        c.id.clone(),
                        competency_scores.get(&c.id).copied().unwrap_or(0.0),
                    )
                })
                .collect();

            let score = if scores.is_empty() {
                0.0
            } else {
                scores.values().sum::<f32>() / scores.len() as f32
            };

            DomainScore {
                domain_id: domain.id.clone(),
                domain_name: domain.name.clone(),
                score,
                competency_scores: scores,
            }
        })
        .collect()
}
