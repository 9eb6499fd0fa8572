//! Input manager for handling different file types

use crate::error::{RelevanceError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::evaluator::Document;
use crate::processing::normalizer::tidy_whitespace;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Extracts document text, caching it per path for the life of the manager
pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Extract and whitespace-tidy the text of a file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(RelevanceError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let raw = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(RelevanceError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let text = tidy_whitespace(&raw);

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Load a document, failing on any extraction error
    pub async fn load_document(&mut self, path: &Path) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::new(display_name(path), text))
    }

    /// Load a resume. A PDF whose text cannot be extracted becomes an empty
    /// document so the rest of the batch still gets scored.
    pub async fn load_resume(&mut self, path: &Path) -> Result<Document> {
        let text = match self.extract_text(path).await {
            Ok(text) => text,
            Err(RelevanceError::PdfExtraction(reason)) => {
                warn!("{}; scoring '{}' as empty text", reason, path.display());
                String::new()
            }
            Err(e) => return Err(e),
        };

        if text.is_empty() {
            warn!("No extractable text in '{}'", path.display());
        }

        Ok(Document::new(display_name(path), text))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// File name shown in reports
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
