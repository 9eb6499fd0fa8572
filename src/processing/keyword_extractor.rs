//! Keyword extraction from job description text

use crate::config::{ExtractionMode, DEFAULT_MAX_PHRASE_WORDS};
use crate::processing::stopwords::StopWords;
use crate::processing::tagger::{tokenize, Chunker, LexiconTagger, NounPhraseChunker, Tagger};
use log::debug;
use std::collections::HashSet;

/// Turns a job description into an ordered, deduplicated keyword list.
///
/// The tagger, chunker and stopword set are injected once and reused for
/// every call. Deduplication ignores case and keeps the first occurrence
/// (with its casing) in every mode.
pub struct KeywordExtractor {
    mode: ExtractionMode,
    tagger: Box<dyn Tagger>,
    chunker: Box<dyn Chunker>,
    stop_words: StopWords,
    max_phrase_words: usize,
}

impl KeywordExtractor {
    pub fn new(
        mode: ExtractionMode,
        tagger: Box<dyn Tagger>,
        chunker: Box<dyn Chunker>,
        stop_words: StopWords,
    ) -> Self {
        Self {
            mode,
            tagger,
            chunker,
            stop_words,
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
        }
    }

    /// Built-in rule-based tagger and chunker with the English stopword list
    pub fn with_defaults(mode: ExtractionMode) -> Self {
        Self::new(
            mode,
            Box::new(LexiconTagger::new()),
            Box::new(NounPhraseChunker::default()),
            StopWords::english(),
        )
    }

    pub fn with_max_phrase_words(mut self, max_phrase_words: usize) -> Self {
        self.max_phrase_words = max_phrase_words;
        self
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn extract(&self, text: &str, top_n: usize) -> Vec<String> {
        if top_n == 0 || text.trim().is_empty() {
            return Vec::new();
        }

        let keywords = match self.mode {
            ExtractionMode::Token => self.extract_tokens(text, top_n),
            ExtractionMode::Phrase => self.extract_phrases(text, top_n),
            ExtractionMode::Words => self.extract_words(text, top_n),
        };

        debug!("Extracted {} keywords in {:?} mode (limit {})", keywords.len(), self.mode, top_n);
        keywords
    }

    fn extract_tokens(&self, text: &str, top_n: usize) -> Vec<String> {
        let tokens = tokenize(text);
        let tags = self.tagger.tag(&tokens);

        let candidates = tokens
            .iter()
            .zip(tags)
            .filter(|(token, tag)| tag.is_noun() && !self.stop_words.contains(token.text))
            .map(|(token, _)| token.text.to_string());

        dedup_first_seen(candidates, top_n)
    }

    fn extract_phrases(&self, text: &str, top_n: usize) -> Vec<String> {
        let candidates = self
            .chunker
            .noun_chunks(text)
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|phrase| {
                !phrase.is_empty()
                    && !self.stop_words.contains(phrase)
                    && phrase.split_whitespace().count() <= self.max_phrase_words
            });

        dedup_first_seen(candidates, top_n)
    }

    fn extract_words(&self, text: &str, top_n: usize) -> Vec<String> {
        let candidates = text
            .split_whitespace()
            .filter(|word| word.chars().count() > 2)
            .map(str::to_lowercase)
            .filter(|word| !self.stop_words.contains(word));

        dedup_first_seen(candidates, top_n)
    }
}

/// Case-insensitive dedup that keeps first-seen order, stopping at `limit`
fn dedup_first_seen<I>(candidates: I, limit: usize) -> Vec<String>
where
    I: Iterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for candidate in candidates {
        if keywords.len() >= limit {
            break;
        }
        if seen.insert(candidate.to_lowercase()) {
            keywords.push(candidate);
        }
    }

    keywords
}
