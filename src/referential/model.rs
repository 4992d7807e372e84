//! Competency referential data model
//!
//! The referential is the static, versioned description of domains,
//! competencies, job profiles and questionnaire items. It is loaded once
//! at startup and shared read-only with the scoring core.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single competency inside a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competency {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A domain ("bloc") owning an ordered list of competencies.
///
/// The weight feeds both the global score and job domain-fit scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub competencies: Vec<Competency>,
}

fn default_weight() -> f32 {
    1.0
}

/// Job family used for interest-coherence scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobFamily {
    Analysis,
    Engineering,
    MachineLearning,
    Nlp,
    GenAi,
    Science,
}

impl JobFamily {
    pub fn label(&self) -> &'static str {
        match self {
            JobFamily::Analysis => "Data Analysis",
            JobFamily::Engineering => "Data Engineering",
            JobFamily::MachineLearning => "Machine Learning",
            JobFamily::Nlp => "NLP",
            JobFamily::GenAi => "Generative AI",
            JobFamily::Science => "Data Science",
        }
    }
}

/// A job profile from the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobProfile {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level: String,
    pub family: JobFamily,
    #[serde(default)]
    pub required_competencies: Vec<String>,
    #[serde(default)]
    pub key_domains: Vec<String>,
    /// Minimum qualifying average competency score for the seniority gate.
    #[serde(default)]
    pub min_score: f32,
    #[serde(default)]
    pub junior_friendly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikertQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub competencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub domains: Vec<String>,
    /// Minimum word count for the answer to count as "complete" in the UI.
    #[serde(default)]
    pub min_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiChoiceQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub competencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Questions {
    #[serde(default)]
    pub likert: Vec<LikertQuestion>,
    #[serde(default)]
    pub open: Vec<OpenQuestion>,
    #[serde(default)]
    pub multi_choice: Vec<MultiChoiceQuestion>,
}

/// The full referential document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referential {
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub jobs: Vec<JobProfile>,
    #[serde(default)]
    pub questions: Questions,
}

impl Referential {
    /// All competencies in catalogue order.
    pub fn competencies(&self) -> impl Iterator<Item = &Competency> {
        self.domains.iter().flat_map(|d| d.competencies.iter())
    }

    pub fn competency(&self, id: &str) -> Option<&Competency> {
        self.competencies().find(|c| c.id == id)
    }

    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    pub fn competency_count(&self) -> usize {
        self.competencies().count()
    }

    /// Check cross-references and report problems as human-readable strings.
    ///
    /// The scoring core tolerates all of these silently; validation exists
    /// for the `referential validate` command.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let competency_ids: std::collections::HashSet<&str> =
            self.competencies().map(|c| c.id.as_str()).collect();
        let domain_ids: std::collections::HashSet<&str> =
            self.domains.iter().map(|d| d.id.as_str()).collect();

        for job in &self.jobs {
            for comp_id in &job.required_competencies {
                if !competency_ids.contains(comp_id.as_str()) {
                    problems.push(format!(
                        "job {} requires unknown competency {}",
                        job.id, comp_id
                    ));
                }
            }
            for domain_id in &job.key_domains {
                if !domain_ids.contains(domain_id.as_str()) {
                    problems.push(format!(
                        "job {} references unknown domain {}",
                        job.id, domain_id
                    ));
                }
            }
        }

        for q in &self.questions.likert {
            for comp_id in &q.competencies {
                if !competency_ids.contains(comp_id.as_str()) {
                    problems.push(format!(
                        "likert question {} references unknown competency {}",
                        q.id, comp_id
                    ));
                }
            }
        }
        for q in &self.questions.open {
            for domain_id in &q.domains {
                if !domain_ids.contains(domain_id.as_str()) {
                    problems.push(format!(
                        "open question {} references unknown domain {}",
                        q.id, domain_id
                    ));
                }
            }
        }
        for q in &self.questions.multi_choice {
            for comp_id in &q.competencies {
                if !competency_ids.contains(comp_id.as_str()) {
                    problems.push(format!(
                        "choice question {} references unknown competency {}",
                        q.id, comp_id
                    ));
                }
            }
        }

        problems
    }
}

/// One family entry of the keyword table: detection patterns plus the set
/// of families a detected interest remains compatible with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyPatterns {
    pub family: JobFamily,
    pub patterns: Vec<String>,
    pub compatible_with: Vec<JobFamily>,
}

/// External keyword configuration: competency keyword lists, the generic
/// positive vocabulary, and family detection patterns. Kept out of the
/// code so the matching policy can be tuned without touching the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    #[serde(default)]
    pub competencies: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub generic_vocabulary: Vec<String>,
    #[serde(default)]
    pub families: Vec<FamilyPatterns>,
}

impl KeywordTable {
    pub fn keywords_for(&self, competency_id: &str) -> &[String] {
        self.competencies
            .get(competency_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_referential() -> Referential {
        Referential {
            version: "test".to_string(),
            description: String::new(),
            last_updated: None,
            domains: vec![Domain {
                id: "B1".to_string(),
                name: "Analysis".to_string(),
                description: String::new(),
                weight: 1.0,
                competencies: vec![Competency {
                    id: "C01".to_string(),
                    name: "Data cleaning".to_string(),
                    description: String::new(),
                }],
            }],
            jobs: vec![JobProfile {
                id: "M1".to_string(),
                title: "Data Analyst".to_string(),
                description: String::new(),
                level: "junior".to_string(),
                family: JobFamily::Analysis,
                required_competencies: vec!["C01".to_string(), "C99".to_string()],
                key_domains: vec!["B1".to_string(), "B9".to_string()],
                min_score: 0.0,
                junior_friendly: true,
            }],
            questions: Questions::default(),
        }
    }

    #[test]
    fn test_competency_lookup() {
        let referential = small_referential();
        assert!(referential.competency("C01").is_some());
        assert!(referential.competency("C99").is_none());
        assert_eq!(referential.competency_count(), 1);
    }

    #[test]
    fn test_validate_reports_dangling_references() {
        let referential = small_referential();
        let problems = referential.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("C99")));
        assert!(problems.iter().any(|p| p.contains("B9")));
    }

    #[test]
    fn test_keyword_table_missing_entry_is_empty() {
        let table = KeywordTable {
            competencies: HashMap::new(),
            generic_vocabulary: vec![],
            families: vec![],
        };
        assert!(table.keywords_for("C01").is_empty());
    }
}
