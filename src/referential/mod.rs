//! Referential data model and loading

pub mod loader;
pub mod model;

pub use loader::{load_keywords, load_referential};
pub use model::{
    Competency, Domain, FamilyPatterns, JobFamily, JobProfile, KeywordTable, LikertQuestion,
    MultiChoiceQuestion, OpenQuestion, Questions, Referential,
};
