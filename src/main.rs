//! Skill aligner: self-assessment scoring and job recommendation tool

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use skill_aligner::cli::{Cli, Commands, ConfigAction, ReferentialAction};
use skill_aligner::config::{Config, OutputFormat};
use skill_aligner::error::{Result, SkillAlignerError};
use skill_aligner::generation::{bio_digest, progression_digest, TextGenerator};
use skill_aligner::output::ReportRenderer;
use skill_aligner::referential::{load_keywords, load_referential};
use skill_aligner::scoring::AnalysisEngine;
use skill_aligner::session::UserResponses;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

/// Simulated generation latency, wrapped in [`GENERATION_TIMEOUT`].
const GENERATION_LATENCY: Duration = Duration::from_millis(400);
const GENERATION_TIMEOUT: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            responses,
            referential,
            keywords,
            output,
            save,
            detailed,
            no_generation,
        } => {
            let format = match &output {
                Some(requested) => skill_aligner::cli::parse_output_format(requested)
                    .map_err(SkillAlignerError::InvalidInput)?,
                None => config.output.format,
            };
            run_analyze(
                &config,
                &responses,
                referential.as_deref(),
                keywords.as_deref(),
                format,
                save,
                detailed,
                no_generation,
            )
            .await
        }

        Commands::Referential { action } => match action {
            ReferentialAction::Show { file } => show_referential(file.as_deref()),
            ReferentialAction::Validate { file } => validate_referential(file.as_deref()),
        },

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    SkillAlignerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{content}");
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
                Ok(())
            }
        },
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_analyze(
    config: &Config,
    responses_path: &Path,
    referential_path: Option<&Path>,
    keywords_path: Option<&Path>,
    format: OutputFormat,
    save: Option<PathBuf>,
    detailed: bool,
    no_generation: bool,
) -> Result<()> {
    info!("Starting skill analysis");

    let referential = load_referential(referential_path)?;
    let keywords = load_keywords(keywords_path)?;
    let responses = load_responses(responses_path)?;

    let incomplete = responses.incomplete_open_answers(&referential);
    if !incomplete.is_empty() {
        warn!(
            "Open answers below their minimum word count: {}",
            incomplete.join(", ")
        );
    }

    let engine = AnalysisEngine::new(&referential, &keywords, &config.policy);
    let mut result = engine.analyze(&responses);
    info!(
        "Scored {} competencies across {} domains",
        referential.competency_count(),
        referential.domains.len()
    );

    if !no_generation && responses.has_any_response() {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Generating progression plan and bio...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let generator = TextGenerator::new(GENERATION_LATENCY);
        let plan_digest = progression_digest(&result);
        let profile_digest = bio_digest(&result);

        match tokio::time::timeout(GENERATION_TIMEOUT, async {
            let plan = generator.generate_plan(&plan_digest).await?;
            let bio = generator.generate_bio(&profile_digest).await?;
            Ok::<_, SkillAlignerError>((plan, bio))
        })
        .await
        {
            Ok(Ok((plan, bio))) => {
                result.progression_plan = Some(plan);
                result.professional_bio = Some(bio);
            }
            Ok(Err(e)) => warn!("Text generation failed: {}", e),
            Err(_) => warn!("Text generation timed out, continuing without it"),
        }
        spinner.finish_and_clear();
    }

    let renderer = ReportRenderer::new(
        config.output.color_output && format == OutputFormat::Console,
        detailed || config.output.detailed,
    );
    println!("{}", renderer.render(&result, format)?);

    if let Some(path) = save {
        renderer.save(&result, format, &path)?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn load_responses(path: &Path) -> Result<UserResponses> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SkillAlignerError::InvalidInput(format!(
            "cannot read responses file {}: {e}",
            path.display()
        ))
    })?;
    let responses: UserResponses = serde_json::from_str(&content)?;
    Ok(responses)
}

fn show_referential(path: Option<&Path>) -> Result<()> {
    let referential = load_referential(path)?;
    println!(
        "{} (version {})\n",
        "Competency referential".bold(),
        referential.version
    );

    for domain in &referential.domains {
        println!(
            "{} {} (weight {:.1})",
            domain.id.cyan(),
            domain.name.bold(),
            domain.weight
        );
        for competency in &domain.competencies {
            println!("  {} {}", competency.id, competency.name);
        }
        println!();
    }

    println!("{}", "Job catalogue".bold());
    for job in &referential.jobs {
        println!(
            "  {} {} [{}] family={}",
            job.id.cyan(),
            job.title,
            job.level,
            job.family.label()
        );
    }
    Ok(())
}

fn validate_referential(path: Option<&Path>) -> Result<()> {
    let referential = load_referential(path)?;
    let problems = referential.validate();
    if problems.is_empty() {
        println!(
            "{} referential version {} is consistent",
            "OK".green(),
            referential.version
        );
        Ok(())
    } else {
        for problem in &problems {
            println!("{} {problem}", "ERROR".red());
        }
        Err(SkillAlignerError::Referential(format!(
            "{} consistency problem(s) found",
            problems.len()
        )))
    }
}
