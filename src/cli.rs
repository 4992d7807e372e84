//! CLI interface for the skill aligner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-aligner")]
#[command(about = "Self-assessment scoring and job recommendation tool")]
#[command(
    long_about = "Score questionnaire responses against a competency referential and recommend the data jobs that fit best"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a set of questionnaire responses
    Analyze {
        /// Path to the responses file (JSON)
        #[arg(short, long)]
        responses: PathBuf,

        /// Override the embedded competency referential
        #[arg(long)]
        referential: Option<PathBuf>,

        /// Override the embedded keyword table
        #[arg(long)]
        keywords: Option<PathBuf>,

        /// Output format: console, json, markdown (defaults to the
        /// configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save the report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include per-competency scores and the full job ranking
        #[arg(short, long)]
        detailed: bool,

        /// Skip progression plan and bio generation
        #[arg(long)]
        no_generation: bool,
    },

    /// Inspect the competency referential
    Referential {
        #[command(subcommand)]
        action: ReferentialAction,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ReferentialAction {
    /// Print domains, competencies, and the job catalogue
    Show {
        /// Referential file to inspect instead of the embedded one
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Check the referential for dangling references
    Validate {
        /// Referential file to validate instead of the embedded one
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Show configuration file path
    Path,
}

pub fn parse_output_format(s: &str) -> std::result::Result<crate::config::OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        other => Err(format!(
            "unknown output format '{other}', expected console, json, or markdown"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_parses() {
        let cli = Cli::try_parse_from([
            "skill-aligner",
            "analyze",
            "--responses",
            "answers.json",
            "--output",
            "json",
            "--detailed",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                responses,
                output,
                detailed,
                no_generation,
                ..
            } => {
                assert_eq!(responses, PathBuf::from("answers.json"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(detailed);
                assert!(!no_generation);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_output_flag_defers_to_configured_format() {
        let cli = Cli::try_parse_from(["skill-aligner", "analyze", "--responses", "a.json"])
            .unwrap();
        match cli.command {
            Commands::Analyze { output, .. } => assert_eq!(output, None),
            _ => panic!("expected analyze command"),
        }
        // With no flag given, the analyze path falls back to
        // Config::default().output.format.
        assert_eq!(
            crate::config::Config::default().output.format,
            crate::config::OutputFormat::Console
        );
    }

    #[test]
    fn test_referential_validate_parses() {
        let cli =
            Cli::try_parse_from(["skill-aligner", "referential", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Referential {
                action: ReferentialAction::Validate { file: None }
            }
        ));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["skill-aligner", "config", "show", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_responses_is_an_error() {
        assert!(Cli::try_parse_from(["skill-aligner", "analyze"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        use crate::config::OutputFormat;
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }
}
