//! Weighted keyword scoring and verdict classification

use crate::error::{RelevanceError, Result};
use crate::processing::normalizer::normalize;
use aho_corasick::AhoCorasick;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const HIGH_THRESHOLD: f64 = 75.0;
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Per-keyword weights. Keywords without an entry weigh `DEFAULT_WEIGHT`.
/// Lookup ignores case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordWeights {
    weights: HashMap<String, f64>,
}

impl KeywordWeights {
    pub fn new<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut weights = HashMap::new();
        for (keyword, weight) in pairs {
            let keyword = keyword.as_ref();
            if !weight.is_finite() || weight < 0.0 {
                return Err(RelevanceError::Configuration(format!(
                    "Weight for '{}' must be a finite number >= 0, got {}",
                    keyword, weight
                )));
            }
            weights.insert(Self::key(keyword), weight);
        }
        Ok(Self { weights })
    }

    pub fn weight(&self, keyword: &str) -> f64 {
        self.weights
            .get(&Self::key(keyword))
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    fn key(keyword: &str) -> String {
        keyword.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    /// Thresholds are inclusive at the lower edge
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Verdict::High
        } else if score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        }
    }

    /// CSS colour the HTML report gives the verdict cell
    pub fn color_name(&self) -> &'static str {
        match self {
            Verdict::High => "green",
            Verdict::Medium => "orange",
            Verdict::Low => "red",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Percentage in [0, 100], rounded to two decimals
    pub score: f64,
    pub verdict: Verdict,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores resume text against a keyword list. Unweighted scoring is the
/// case of an empty `KeywordWeights`.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: KeywordWeights,
}

impl Scorer {
    pub fn new(weights: KeywordWeights) -> Self {
        Self { weights }
    }

    pub fn unweighted() -> Self {
        Self::default()
    }

    pub fn weights(&self) -> &KeywordWeights {
        &self.weights
    }

    pub fn score<S: AsRef<str>>(&self, keywords: &[S], resume_text: &str) -> ScoreResult {
        let haystack = normalize(resume_text);
        let patterns: Vec<String> = keywords.iter().map(|k| normalize(k.as_ref())).collect();
        let present = find_present(&patterns, &haystack);

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut total_weight = 0.0;
        let mut obtained_weight = 0.0;

        for (keyword, found) in keywords.iter().zip(present) {
            let keyword = keyword.as_ref();
            let weight = self.weights.weight(keyword);
            total_weight += weight;

            if found {
                obtained_weight += weight;
                matched.push(keyword.to_string());
            } else {
                missing.push(keyword.to_string());
            }
        }

        let score = if total_weight > 0.0 {
            round_to_hundredths(obtained_weight / total_weight * 100.0)
        } else {
            0.0
        };

        debug!(
            "Scored {} keywords: {} matched, weight {}/{} -> {}",
            keywords.len(),
            matched.len(),
            obtained_weight,
            total_weight,
            score
        );

        ScoreResult {
            score,
            verdict: Verdict::from_score(score),
            matched,
            missing,
        }
    }
}

/// Score with optional weights; `None` means every keyword weighs 1
pub fn score<S: AsRef<str>>(
    keywords: &[S],
    weights: Option<&KeywordWeights>,
    resume_text: &str,
) -> ScoreResult {
    match weights {
        Some(weights) => Scorer::new(weights.clone()).score(keywords, resume_text),
        None => Scorer::unweighted().score(keywords, resume_text),
    }
}

/// Two decimals, ties to even (90.625 -> 90.62)
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Substring containment of every pattern in `haystack`, in pattern order.
/// An empty pattern is contained in any text.
fn find_present(patterns: &[String], haystack: &str) -> Vec<bool> {
    let mut present: Vec<bool> = patterns.iter().map(|p| p.is_empty()).collect();

    let searchable: Vec<(usize, &str)> = patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_empty())
        .map(|(i, p)| (i, p.as_str()))
        .collect();

    if searchable.is_empty() || haystack.is_empty() {
        return present;
    }

    match AhoCorasick::new(searchable.iter().map(|(_, p)| *p)) {
        Ok(matcher) => {
            for mat in matcher.find_overlapping_iter(haystack) {
                let (index, _) = searchable[mat.pattern().as_usize()];
                present[index] = true;
            }
        }
        Err(e) => {
            warn!("Falling back to per-keyword search: {}", e);
            for (index, pattern) in &searchable {
                present[*index] = haystack.contains(pattern);
            }
        }
    }

    present
}
