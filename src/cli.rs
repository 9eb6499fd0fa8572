//! CLI interface for the resume relevance checker

use crate::config::{ExtractionMode, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-relevance")]
#[command(about = "Score resumes against a job description by keyword coverage")]
#[command(long_about = "Extract keywords from a job description, check which of them appear in each resume, and report a weighted coverage score with a High/Medium/Low verdict")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one or more resumes against a job description
    Evaluate {
        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD); repeat or list several
        #[arg(short, long, num_args = 1.., required = true)]
        resume: Vec<PathBuf>,

        /// Keyword extraction mode: token, phrase, words
        #[arg(short, long)]
        mode: Option<String>,

        /// Maximum number of job keywords to keep
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        top_n: Option<i64>,

        /// TOML file with a [weights] table
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Single keyword weight, e.g. --weight Python=3
        #[arg(long = "weight", value_name = "KEYWORD=WEIGHT")]
        weight: Vec<String>,

        /// Output format: console, json, csv, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save formatted output to file (default: a timestamped resume_scores file)
        #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
        save: Option<Option<PathBuf>>,

        /// Export the summary table as CSV (default: resume_scores.csv)
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        export_csv: Option<Option<PathBuf>>,

        /// Include the job description preview
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the keywords extracted from a job description
    Keywords {
        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Keyword extraction mode: token, phrase, words
        #[arg(short, long)]
        mode: Option<String>,

        /// Maximum number of keywords to keep
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        top_n: Option<i64>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, csv, markdown, html",
            format
        )),
    }
}

pub fn parse_extraction_mode(mode: &str) -> Result<ExtractionMode, String> {
    match mode.to_lowercase().as_str() {
        "token" | "tokens" => Ok(ExtractionMode::Token),
        "phrase" | "phrases" => Ok(ExtractionMode::Phrase),
        "words" | "word" => Ok(ExtractionMode::Words),
        _ => Err(format!("Invalid extraction mode: {}. Supported: token, phrase, words", mode)),
    }
}

/// Parse `KEYWORD=WEIGHT`; the keyword may itself contain spaces
pub fn parse_weight_pair(pair: &str) -> Result<(String, f64), String> {
    let (keyword, weight) = pair
        .rsplit_once('=')
        .ok_or_else(|| format!("Invalid weight '{}': expected KEYWORD=WEIGHT", pair))?;

    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(format!("Invalid weight '{}': keyword is empty", pair));
    }

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("Invalid weight '{}': '{}' is not a number", pair, weight.trim()))?;

    Ok((keyword.to_string(), weight))
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
