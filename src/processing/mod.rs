//! Keyword extraction and scoring

pub mod normalizer;
pub mod stopwords;
pub mod tagger;
pub mod keyword_extractor;
pub mod scorer;
pub mod evaluator;
