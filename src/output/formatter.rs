//! Report formatters with multiple format support

use crate::config::OutputFormat;
use crate::error::{Result, SkillAlignerError};
use crate::generation::level_estimate;
use crate::scoring::AnalysisResult;
use colored::{Color, Colorize};

/// Trait for rendering an analysis result into one output format.
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a compact/detailed switch.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for programmatic consumption.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports.
pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        let line = "=".repeat(title.len());
        if self.use_colors {
            format!("\n{}\n{}\n", title.bold(), line)
        } else {
            format!("\n{title}\n{line}\n")
        }
    }

    fn score_color(score: f32) -> Color {
        if score >= 0.7 {
            Color::Green
        } else if score >= 0.4 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn score_bar(score: f32) -> String {
        let filled = (score.clamp(0.0, 1.0) * 20.0).round() as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 SKILL PROFILE ANALYSIS"));
        let percent = format!("{:.0}%", result.global_score * 100.0);
        output.push_str(&format!(
            "Overall score: {} ({})\n",
            self.colorize(&percent, Self::score_color(result.global_score)),
            level_estimate(result.global_score)
        ));

        output.push_str(&self.format_header("Domain Scores"));
        for domain in &result.domain_scores {
            output.push_str(&format!(
                "  {} {:.0}%  {}\n",
                Self::score_bar(domain.score),
                domain.score * 100.0,
                domain.domain_name
            ));
            if self.detailed {
                for (id, score) in &domain.competency_scores {
                    output.push_str(&format!("      {id}: {:.0}%\n", score * 100.0));
                }
            }
        }

        if !result.strongest_competencies.is_empty() {
            output.push_str(&self.format_header("✅ Strengths"));
            for name in &result.strongest_competencies {
                output.push_str(&format!("  • {}\n", self.colorize(name, Color::Green)));
            }
        }

        if !result.weakest_competencies.is_empty() {
            output.push_str(&self.format_header("🎯 Areas to Develop"));
            for name in &result.weakest_competencies {
                output.push_str(&format!("  • {}\n", self.colorize(name, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("💼 Job Recommendations"));
        let shown = if self.detailed {
            result.recommendations.len()
        } else {
            5
        };
        for (i, rec) in result.recommendations.iter().take(shown).enumerate() {
            output.push_str(&format!(
                "{}. {} {} ({:.0}%, {})\n",
                i + 1,
                self.colorize(&rec.job.title, Color::White),
                self.colorize(&format!("[{}]", rec.job.level), Color::BrightBlack),
                rec.score * 100.0,
                self.colorize(rec.tier.label(), Self::score_color(rec.score))
            ));
            if !rec.missing_competencies.is_empty() {
                output.push_str(&format!(
                    "   Missing: {}\n",
                    rec.missing_competencies.join(", ")
                ));
            }
        }

        if let Some(plan) = &result.progression_plan {
            output.push_str(&self.format_header("🗺️  Progression Plan"));
            output.push_str(plan);
            output.push('\n');
        }

        if let Some(bio) = &result.professional_bio {
            output.push_str(&self.format_header("👤 Professional Bio"));
            output.push_str(bio);
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Skill Profile Analysis\n\n");
        output.push_str(&format!(
            "**Overall score:** {:.0}% ({})\n\n",
            result.global_score * 100.0,
            level_estimate(result.global_score)
        ));

        output.push_str("## Domain Scores\n\n");
        output.push_str("| Domain | Score |\n|--------|-------|\n");
        for domain in &result.domain_scores {
            output.push_str(&format!(
                "| {} | {:.0}% |\n",
                domain.domain_name,
                domain.score * 100.0
            ));
        }
        output.push('\n');

        if !result.strongest_competencies.is_empty() {
            output.push_str("## Strengths\n\n");
            for name in &result.strongest_competencies {
                output.push_str(&format!("- {name}\n"));
            }
            output.push('\n');
        }

        if !result.weakest_competencies.is_empty() {
            output.push_str("## Areas to Develop\n\n");
            for name in &result.weakest_competencies {
                output.push_str(&format!("- {name}\n"));
            }
            output.push('\n');
        }

        output.push_str("## Job Recommendations\n\n");
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "{}. **{}** ({}) - {:.0}%, {}\n",
                i + 1,
                rec.job.title,
                rec.job.level,
                rec.score * 100.0,
                rec.tier.label()
            ));
            if !rec.missing_competencies.is_empty() {
                output.push_str(&format!(
                    "   - Missing: {}\n",
                    rec.missing_competencies.join(", ")
                ));
            }
        }
        output.push('\n');

        if let Some(plan) = &result.progression_plan {
            output.push_str(plan);
            output.push('\n');
        }
        if let Some(bio) = &result.professional_bio {
            output.push_str(bio);
            output.push('\n');
        }

        output.push_str(&format!("\n---\n*Policy: {}*\n", result.policy_version));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Dispatches to the formatter matching the requested format.
pub struct ReportRenderer {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ReportRenderer {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors, detailed),
            json: JsonFormatter::new(true),
            markdown: MarkdownFormatter::new(),
        }
    }

    pub fn render(&self, result: &AnalysisResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_result(result),
            OutputFormat::Json => self.json.format_result(result),
            OutputFormat::Markdown => self.markdown.format_result(result),
        }
    }

    /// Write a rendered report to disk, inferring nothing from the path.
    pub fn save(
        &self,
        result: &AnalysisResult,
        format: OutputFormat,
        path: &std::path::Path,
    ) -> Result<()> {
        let rendered = self.render(result, format)?;
        std::fs::write(path, rendered).map_err(|e| {
            SkillAlignerError::OutputFormatting(format!(
                "failed to write report to {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringPolicy;
    use crate::referential::{load_keywords, load_referential};
    use crate::scoring::AnalysisEngine;
    use crate::session::UserResponses;

    fn sample_result() -> AnalysisResult {
        let referential = load_referential(None).unwrap();
        let keywords = load_keywords(None).unwrap();
        let policy = ScoringPolicy::default();
        let engine = AnalysisEngine::new(&referential, &keywords, &policy);

        let mut responses = UserResponses::default();
        responses.likert.insert("L01".to_string(), 4);
        responses.open.insert(
            "O01".to_string(),
            "built dashboards with python and sql".to_string(),
        );
        engine.analyze(&responses)
    }

    #[test]
    fn test_console_output_has_sections() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_result(&sample_result()).unwrap();
        assert!(output.contains("SKILL PROFILE ANALYSIS"));
        assert!(output.contains("Domain Scores"));
        assert!(output.contains("Job Recommendations"));
    }

    #[test]
    fn test_console_detailed_lists_competencies() {
        let result = sample_result();
        let compact = ConsoleFormatter::new(false, false)
            .format_result(&result)
            .unwrap();
        let detailed = ConsoleFormatter::new(false, true)
            .format_result(&result)
            .unwrap();
        assert!(detailed.len() > compact.len());
        assert!(detailed.contains("C01"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let result = sample_result();
        let output = JsonFormatter::new(true).format_result(&result).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.global_score, result.global_score);
        assert_eq!(parsed.policy_version, result.policy_version);
    }

    #[test]
    fn test_markdown_output_has_table() {
        let output = MarkdownFormatter::new()
            .format_result(&sample_result())
            .unwrap();
        assert!(output.starts_with("# Skill Profile Analysis"));
        assert!(output.contains("| Domain | Score |"));
    }

    #[test]
    fn test_renderer_dispatch() {
        let renderer = ReportRenderer::new(false, false);
        let result = sample_result();
        assert!(renderer
            .render(&result, OutputFormat::Json)
            .unwrap()
            .starts_with('{'));
        assert!(renderer
            .render(&result, OutputFormat::Markdown)
            .unwrap()
            .starts_with('#'));
    }
}
