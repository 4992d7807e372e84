//! Scoring pipeline: text similarity, per-competency scoring, domain
//! aggregation, job recommendation, and the top-level analysis engine.

pub mod analyzer;
pub mod competency;
pub mod domains;
pub mod recommender;
pub mod text_similarity;

pub use analyzer::{AnalysisEngine, AnalysisResult};
pub use competency::{CompetencyScorer, CompetencyScores};
pub use domains::{aggregate_domains, DomainScore};
pub use recommender::{Compatibility, FamilyDetector, JobRecommendation, JobRecommender};
pub use text_similarity::SimilarityScorer;
