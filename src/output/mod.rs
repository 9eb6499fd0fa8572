//! Report assembly and rendering

pub mod formatter;
pub mod report;

pub use formatter::{export_csv, OutputFormatter, ReportGenerator};
pub use report::{EvaluationReport, ReportAggregator, ResumeRecord};
