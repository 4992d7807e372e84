//! Report rendering for console, JSON, and markdown output.

pub mod formatter;

pub use formatter::{
    ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter, ReportRenderer,
};
