//! Resume relevance checker: keyword coverage scoring of resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_relevance::cli::{self, Cli, Commands, ConfigAction};
use resume_relevance::config::{Config, OutputFormat};
use resume_relevance::error::{RelevanceError, Result};
use resume_relevance::input::InputManager;
use resume_relevance::output::formatter::{export_csv, save_report_to_file, suggest_filename, ReportGenerator};
use resume_relevance::processing::evaluator::{EvaluationSession, Evaluator};
use std::path::{Path, PathBuf};
use std::process;

const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            report_failure("Failed to load configuration", &e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        report_failure("Command failed", &e);
        process::exit(1);
    }
}

/// Validation errors go straight to the user; anything else is logged
fn report_failure(context: &str, e: &RelevanceError) {
    if e.is_validation() {
        eprintln!("❌ {}", e);
    } else {
        error!("{}: {}", context, e);
    }
}

async fn run_command(command: Commands, mut config: Config, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Evaluate {
            job,
            resume,
            mode,
            top_n,
            weights,
            weight,
            output,
            save,
            export_csv: export_target,
            detailed,
        } => {
            apply_extraction_overrides(&mut config, mode.as_deref(), top_n)?;

            if let Some(weights_path) = &weights {
                config.merge_weights_file(weights_path)?;
            }
            for pair in &weight {
                let (keyword, value) = cli::parse_weight_pair(pair).map_err(RelevanceError::Configuration)?;
                config.scoring.weights.insert(keyword, value);
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(RelevanceError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            // Rejects bad settings before any file is read
            let evaluation_config = config.evaluation_config()?;

            validate_input(&job, "Job description file")?;
            for path in &resume {
                validate_input(path, "Resume file")?;
            }

            let chatty = output_format == OutputFormat::Console;
            if chatty {
                println!("🚀 Resume relevance check");
                println!("💼 Job Description: {}", job.display());
                println!("📄 Resumes: {}", resume.len());
                println!(
                    "🔧 Mode: {:?} | Top keywords: {} | Weighted: {}",
                    evaluation_config.mode,
                    evaluation_config.top_n,
                    !evaluation_config.weights.is_empty()
                );
            }

            let mut input_manager = InputManager::new();
            let mut session = EvaluationSession::new();

            info!("Loading job description {}", job.display());
            session.set_job(input_manager.load_document(&job).await?);

            let progress = if chatty {
                ProgressBar::new(resume.len() as u64)
            } else {
                ProgressBar::hidden()
            };
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            for path in &resume {
                progress.set_message(path.display().to_string());
                session.add_resume(input_manager.load_resume(path).await?);
                progress.inc(1);
            }
            progress.finish_and_clear();

            let evaluator = Evaluator::new(&evaluation_config);
            let report = session.evaluate(&evaluator)?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed,
                config.output.preview_chars,
                true,
                true,
                true,
            );
            let content = generator.generate_report(&report, &output_format)?;
            println!("{}", content);

            if let Some(target) = save {
                let save_path = target.unwrap_or_else(|| PathBuf::from(suggest_filename(&output_format, true)));
                let plain = ReportGenerator::with_options(false, detailed, config.output.preview_chars, true, true, true);
                save_report_to_file(&plain.generate_report(&report, &output_format)?, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }

            if let Some(target) = export_target {
                let csv_path = target.unwrap_or_else(|| config.output.export_file.clone());
                export_csv(&report, &csv_path)?;
                println!("📁 Results exported to {}", csv_path.display());
            }
        }

        Commands::Keywords { job, mode, top_n } => {
            apply_extraction_overrides(&mut config, mode.as_deref(), top_n)?;
            let evaluation_config = config.evaluation_config()?;

            validate_input(&job, "Job description file")?;

            let mut input_manager = InputManager::new();
            let document = input_manager.load_document(&job).await?;

            let evaluator = Evaluator::new(&evaluation_config);
            let keywords = evaluator.extract_keywords(&document.text);

            println!("🔑 JD Keywords for Evaluation ({:?} mode)\n", evaluation_config.mode);
            if keywords.is_empty() {
                println!("None");
            }
            for (index, keyword) in keywords.iter().enumerate() {
                println!("{:>3}. {}", index + 1, keyword);
            }
        }

        Commands::Config { action } => {
            let config_path = config_override.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        RelevanceError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

fn apply_extraction_overrides(config: &mut Config, mode: Option<&str>, top_n: Option<i64>) -> Result<()> {
    if let Some(mode) = mode {
        config.extraction.mode = cli::parse_extraction_mode(mode).map_err(RelevanceError::Configuration)?;
    }
    if let Some(top_n) = top_n {
        config.extraction.top_n = top_n;
    }
    Ok(())
}

fn validate_input(path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Err(RelevanceError::MissingInput(format!("{} not found: {}", label, path.display())));
    }
    cli::validate_file_extension(path, &ACCEPTED_EXTENSIONS)
        .map_err(|e| RelevanceError::InvalidInput(format!("{}: {}", label, e)))
}
