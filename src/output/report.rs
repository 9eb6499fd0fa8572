//! Report structures for one evaluation session

use crate::config::ExtractionMode;
use crate::processing::scorer::{ScoreResult, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One evaluated resume. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Resume identifier (file name)
    pub resume: String,
    pub score: f64,
    pub verdict: Verdict,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl ResumeRecord {
    pub fn new(resume: impl Into<String>, result: ScoreResult) -> Self {
        Self {
            resume: resume.into(),
            score: result.score,
            verdict: result.verdict,
            matched: result.matched,
            missing: result.missing,
        }
    }

    /// Comma-joined matched keywords, as exported
    pub fn matched_skills(&self) -> String {
        self.matched.join(", ")
    }

    pub fn missing_skills(&self) -> String {
        self.missing.join(", ")
    }
}

/// The job description side of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub name: String,
    pub keywords: Vec<String>,
    pub text: String,
}

impl JobSummary {
    /// First `max_chars` characters, with `...` appended when cut
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() > max_chars {
            let cut: String = self.text.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub extraction_mode: ExtractionMode,
    pub top_n: usize,
    pub weighted: bool,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Full result of one evaluation run; records keep the input resume order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub job: JobSummary,
    pub records: Vec<ResumeRecord>,
    pub metadata: ReportMetadata,
}

impl EvaluationReport {
    pub fn verdict_counts(&self) -> VerdictCounts {
        self.records
            .iter()
            .fold(VerdictCounts::default(), |mut counts, record| {
                match record.verdict {
                    Verdict::High => counts.high += 1,
                    Verdict::Medium => counts.medium += 1,
                    Verdict::Low => counts.low += 1,
                }
                counts
            })
    }

    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|r| r.score).sum::<f64>() / self.records.len() as f64
        }
    }

    /// Highest score; the earlier resume wins a tie
    pub fn best_record(&self) -> Option<&ResumeRecord> {
        self.records.iter().fold(None, |best: Option<&ResumeRecord>, record| match best {
            Some(current) if current.score >= record.score => Some(current),
            _ => Some(record),
        })
    }
}

/// Collects records for one session in the order resumes were evaluated
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    records: Vec<ResumeRecord>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResumeRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self, job: JobSummary, metadata: ReportMetadata) -> EvaluationReport {
        EvaluationReport {
            job,
            records: self.records,
            metadata,
        }
    }
}
