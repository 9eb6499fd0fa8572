//! Evaluation pipeline: JD keywords, per-resume scoring, aggregated report

use crate::config::{ExtractionMode, DEFAULT_MAX_PHRASE_WORDS, DEFAULT_TOP_N};
use crate::error::{RelevanceError, Result};
use crate::output::report::{EvaluationReport, JobSummary, ReportAggregator, ReportMetadata, ResumeRecord};
use crate::processing::keyword_extractor::KeywordExtractor;
use crate::processing::scorer::{KeywordWeights, Scorer};
use crate::processing::stopwords::StopWords;
use crate::processing::tagger::{LexiconTagger, NounPhraseChunker};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Validated settings for one evaluation run
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    pub mode: ExtractionMode,
    pub top_n: usize,
    pub weights: KeywordWeights,
    pub max_phrase_words: usize,
    pub extra_stopwords: Vec<String>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::Token,
            top_n: DEFAULT_TOP_N as usize,
            weights: KeywordWeights::default(),
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
            extra_stopwords: Vec::new(),
        }
    }
}

impl EvaluationConfig {
    pub fn new(mode: ExtractionMode, top_n: i64, weights: KeywordWeights) -> Result<Self> {
        let top_n = usize::try_from(top_n).map_err(|_| {
            RelevanceError::Configuration(format!("top_n must be zero or positive, got {}", top_n))
        })?;

        Ok(Self {
            mode,
            top_n,
            weights,
            ..Self::default()
        })
    }

    pub fn with_max_phrase_words(mut self, max_phrase_words: usize) -> Self {
        self.max_phrase_words = max_phrase_words;
        self
    }

    pub fn with_extra_stopwords(mut self, extra_stopwords: Vec<String>) -> Self {
        self.extra_stopwords = extra_stopwords;
        self
    }
}

/// A named piece of already-extracted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Extracts JD keywords once, then scores each resume against them.
/// Read-only after construction, so one evaluator can serve many runs.
pub struct Evaluator {
    extractor: KeywordExtractor,
    scorer: Scorer,
    top_n: usize,
}

impl Evaluator {
    /// Uses the built-in tagger and chunker plus the English stopwords
    pub fn new(config: &EvaluationConfig) -> Self {
        let mut stop_words = StopWords::english();
        stop_words.extend(&config.extra_stopwords);

        let extractor = KeywordExtractor::new(
            config.mode,
            Box::new(LexiconTagger::new()),
            Box::new(NounPhraseChunker::new(LexiconTagger::new())),
            stop_words,
        )
        .with_max_phrase_words(config.max_phrase_words);

        Self::with_extractor(extractor, config)
    }

    /// Bring your own linguistic capability
    pub fn with_extractor(extractor: KeywordExtractor, config: &EvaluationConfig) -> Self {
        Self {
            extractor,
            scorer: Scorer::new(config.weights.clone()),
            top_n: config.top_n,
        }
    }

    pub fn extract_keywords(&self, jd_text: &str) -> Vec<String> {
        self.extractor.extract(jd_text, self.top_n)
    }

    pub fn score_resume(&self, keywords: &[String], resume: &Document) -> ResumeRecord {
        if resume.text.trim().is_empty() {
            warn!("Resume '{}' has no text; it will score 0", resume.name);
        }
        let result = self.scorer.score(keywords, &resume.text);
        debug!("{}: {} ({})", resume.name, result.score, result.verdict);
        ResumeRecord::new(resume.name.clone(), result)
    }

    /// Evaluate raw JD text against resumes, keeping resume order
    pub fn evaluate(&self, jd_text: &str, resumes: &[Document]) -> Result<EvaluationReport> {
        self.evaluate_job(&Document::new("job description", jd_text), resumes)
    }

    pub fn evaluate_job(&self, job: &Document, resumes: &[Document]) -> Result<EvaluationReport> {
        if resumes.is_empty() {
            return Err(RelevanceError::MissingInput(
                "Please provide at least one resume".to_string(),
            ));
        }

        let started = Instant::now();

        if job.text.trim().is_empty() {
            warn!("Job description '{}' has no text; no keywords can be extracted", job.name);
        }
        let keywords = self.extract_keywords(&job.text);
        info!("Extracted {} keywords from '{}'", keywords.len(), job.name);

        let mut aggregator = ReportAggregator::new();
        for resume in resumes {
            aggregator.push(self.score_resume(&keywords, resume));
        }
        info!("Scored {} resumes", aggregator.len());

        let metadata = ReportMetadata {
            generated_at: chrono::Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            extraction_mode: self.extractor.mode(),
            top_n: self.top_n,
            weighted: !self.scorer.weights().is_empty(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        let job = JobSummary {
            name: job.name.clone(),
            keywords,
            text: job.text.clone(),
        };

        Ok(aggregator.finish(job, metadata))
    }
}

/// Evaluate with the built-in linguistic capability
pub fn evaluate(jd_text: &str, resumes: &[Document], config: &EvaluationConfig) -> Result<EvaluationReport> {
    Evaluator::new(config).evaluate(jd_text, resumes)
}

/// Inputs gathered before an evaluation is triggered
#[derive(Debug, Clone, Default)]
pub struct EvaluationSession {
    job: Option<Document>,
    resumes: Vec<Document>,
}

impl EvaluationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_job(&mut self, job: Document) {
        self.job = Some(job);
    }

    pub fn add_resume(&mut self, resume: Document) {
        self.resumes.push(resume);
    }

    /// Fails before any extraction if the JD or every resume is missing
    pub fn evaluate(&self, evaluator: &Evaluator) -> Result<EvaluationReport> {
        let job = self.job.as_ref().ok_or_else(|| {
            RelevanceError::MissingInput("Please provide a job description first".to_string())
        })?;
        evaluator.evaluate_job(job, &self.resumes)
    }
}
