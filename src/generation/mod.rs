//! Text generation: digest builders plus the generation backend.

pub mod digest;
pub mod generator;

pub use digest::{bio_digest, level_estimate, progression_digest};
pub use generator::TextGenerator;
