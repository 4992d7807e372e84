//! Skill aligner library
//!
//! Scores self-assessment questionnaire responses against a competency
//! referential and ranks a job catalogue by fit. The scoring core is pure
//! and deterministic; text generation and caching sit at the edges.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod output;
pub mod referential;
pub mod scoring;
pub mod session;

pub use cache::AnalysisCache;
pub use config::{Config, ScoringPolicy};
pub use error::{Result, SkillAlignerError};
pub use scoring::{AnalysisEngine, AnalysisResult};
pub use session::UserResponses;
