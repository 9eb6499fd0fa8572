//! Resume relevance checker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::{Config, ExtractionMode, OutputFormat};
pub use error::{RelevanceError, Result};
pub use output::report::{EvaluationReport, JobSummary, ResumeRecord};
pub use processing::evaluator::{evaluate, Document, EvaluationConfig, EvaluationSession, Evaluator};
pub use processing::scorer::{KeywordWeights, Verdict};
