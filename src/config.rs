//! Configuration for the skill aligner
//!
//! Every scoring constant lives in the [`ScoringPolicy`] table so tuning a
//! threshold means editing data, not code. The policy is version-stamped;
//! results produced under different policy versions are not comparable.

use crate::error::{Result, SkillAlignerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub policy: ScoringPolicy,
    pub output: OutputConfig,
}

/// The canonical scoring policy. Defaults encode the family-aware rule
/// set; historical variants of the engine are reachable by editing this
/// table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Policy identifier recorded alongside results.
    pub version: String,

    pub channels: ChannelWeights,
    pub similarity: SimilarityPolicy,
    pub competency: CompetencyPolicy,
    pub recommendation: RecommendationPolicy,
    pub synthesis: SynthesisPolicy,
}

/// Nominal channel weights, renormalized over the channels a user
/// actually answered for a given competency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelWeights {
    pub likert: f32,
    pub open_text: f32,
    pub multi_choice: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityPolicy {
    /// Denominator factor: matches / (keyword_count * ratio_divisor).
    pub ratio_divisor: f32,
    /// Weight of a prefix-based partial keyword match.
    pub partial_match_weight: f32,
    /// Minimum token/keyword length for prefix partial matching.
    pub partial_min_len: usize,
    /// Bonus per generic-vocabulary occurrence, and its cap.
    pub generic_bonus_step: f32,
    pub generic_bonus_cap: f32,
    /// Length bonus: token_count / length_divisor, capped.
    pub length_divisor: f32,
    pub length_bonus_cap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetencyPolicy {
    /// Non-linear mapping of Likert ratings 1-5, index 0 unused.
    pub likert_curve: [f32; 6],
    /// Floor applied to the open-text channel when any text exists.
    pub open_text_floor: f32,
    /// Divisor for the multi-choice selected-count ratio.
    pub choice_divisor: f32,
    /// Flat bonus when the user answered anything anywhere.
    pub participation_bonus: f32,
    /// Hard cap on self-reported competency scores.
    pub score_cap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPolicy {
    /// Required competency below this counts as missing.
    pub missing_threshold: f32,
    /// Base score split between coverage and domain fit.
    pub coverage_weight: f32,
    pub domain_fit_weight: f32,
    /// Multiplier when the job's family is outside the detected
    /// interest's compatibility set.
    pub family_penalty: f32,
    /// Minimum pattern hits for a family interest to count as dominant.
    pub family_min_hits: usize,
    /// Seniority gate: max(floor, 1 - gap * slope).
    pub seniority_floor: f32,
    pub seniority_slope: f32,
    /// Compatibility tier cut-offs, descending.
    pub tier_excellent: f32,
    pub tier_good: f32,
    pub tier_moderate: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisPolicy {
    /// Competencies at or above this are strengths.
    pub strength_threshold: f32,
    /// Competencies below this are weaknesses.
    pub weakness_threshold: f32,
    /// How many strengths/weaknesses to report.
    pub highlight_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            version: "policy-2024.4".to_string(),
            channels: ChannelWeights {
                likert: 0.30,
                open_text: 0.50,
                multi_choice: 0.20,
            },
            similarity: SimilarityPolicy {
                ratio_divisor: 0.6,
                partial_match_weight: 0.5,
                partial_min_len: 4,
                generic_bonus_step: 0.02,
                generic_bonus_cap: 0.10,
                length_divisor: 80.0,
                length_bonus_cap: 0.15,
            },
            competency: CompetencyPolicy {
                likert_curve: [0.0, 0.10, 0.25, 0.45, 0.65, 0.80],
                open_text_floor: 0.10,
                choice_divisor: 4.0,
                participation_bonus: 0.08,
                score_cap: 0.80,
            },
            recommendation: RecommendationPolicy {
                missing_threshold: 0.30,
                coverage_weight: 0.6,
                domain_fit_weight: 0.4,
                family_penalty: 0.25,
                family_min_hits: 2,
                seniority_floor: 0.15,
                seniority_slope: 2.5,
                tier_excellent: 0.55,
                tier_good: 0.40,
                tier_moderate: 0.25,
            },
            synthesis: SynthesisPolicy {
                strength_threshold: 0.40,
                weakness_threshold: 0.30,
                highlight_count: 5,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                SkillAlignerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillAlignerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-aligner")
            .join("config.toml")
    }
}
