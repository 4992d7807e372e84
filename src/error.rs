//! Error handling for the skill aligner application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillAlignerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Referential error: {0}")]
    Referential(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Text generation error: {0}")]
    Generation(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillAlignerError>;
