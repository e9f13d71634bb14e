//! Heuristic input-token estimation for prompts and uploaded files.
//!
//! Nothing here runs a real tokenizer. Text is approximated at ~4 characters
//! per token, images cost a flat amount, and PDFs are priced per page where
//! the page count comes from a byte-pattern scan. All of it sits behind
//! [`TokenEstimator`] so a model-specific tokenizer can replace it without
//! touching callers.

use memchr::memmem;
use serde::Serialize;

/// Approximate characters per token for natural-language text.
pub const CHARS_PER_TOKEN: usize = 4;

/// Flat token cost of one image, independent of size or resolution.
pub const IMAGE_TOKENS: u64 = 1600;

/// Token cost of one PDF page.
pub const TOKENS_PER_PDF_PAGE: u64 = 500;

/// Byte pattern counted as one PDF page.
pub const PDF_PAGE_MARKER: &[u8] = b"/Page";

/// Extensions (lower-case, without the dot) priced as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Which breakdown bucket an uploaded file contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Text,
    Image,
    Document,
}

/// Per-category input-token counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenBreakdown {
    pub text_tokens: u64,
    pub image_tokens: u64,
    pub document_tokens: u64,
}

impl TokenBreakdown {
    /// Sum of all categories.
    pub fn total(&self) -> u64 {
        self.text_tokens + self.image_tokens + self.document_tokens
    }

    /// Accumulate `tokens` into the bucket for `category`.
    pub fn add(&mut self, category: FileCategory, tokens: u64) {
        match category {
            FileCategory::Text => self.text_tokens += tokens,
            FileCategory::Image => self.image_tokens += tokens,
            FileCategory::Document => self.document_tokens += tokens,
        }
    }
}

/// Source of input-token estimates.
pub trait TokenEstimator: Send + Sync {
    /// Tokens for a freeform prompt.
    fn text_tokens(&self, text: &str) -> u64;

    /// Category and tokens for one uploaded file, or `None` when the file
    /// type is not priced and should be skipped.
    fn file_tokens(&self, filename: &str, content: &[u8]) -> Option<(FileCategory, u64)>;
}

/// The character-count / file-type heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl TokenEstimator for HeuristicEstimator {
    fn text_tokens(&self, text: &str) -> u64 {
        estimate_text_tokens(text)
    }

    fn file_tokens(&self, filename: &str, content: &[u8]) -> Option<(FileCategory, u64)> {
        estimate_file_tokens(filename, content)
    }
}

/// Estimate tokens from text (~4 chars = 1 token).
///
/// Empty text is 0. Any non-empty text, including whitespace only, is at
/// least 1 token.
pub fn estimate_text_tokens(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }
    let chars = text.trim().chars().count();
    ((chars / CHARS_PER_TOKEN) as u64).max(1)
}

/// Estimate tokens for one uploaded file from its extension and content.
///
/// Returns `None` for unsupported extensions.
pub fn estimate_file_tokens(filename: &str, content: &[u8]) -> Option<(FileCategory, u64)> {
    let ext = file_extension(filename)?;

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Some((FileCategory::Image, IMAGE_TOKENS));
    }

    match ext.as_str() {
        "pdf" => Some((
            FileCategory::Document,
            count_pdf_pages(content) * TOKENS_PER_PDF_PAGE,
        )),
        "txt" => {
            let tokens = match std::str::from_utf8(content) {
                Ok(text) => estimate_text_tokens(text),
                Err(e) => {
                    tracing::debug!(
                        filename,
                        valid_up_to = e.valid_up_to(),
                        "Text upload is not UTF-8, estimating from byte length"
                    );
                    (content.len() / CHARS_PER_TOKEN) as u64
                }
            };
            Some((FileCategory::Text, tokens))
        }
        _ => None,
    }
}

/// Count PDF pages by occurrences of `/Page`. Never less than 1.
///
/// `/Pages` tree nodes match too, so this over-counts slightly on real PDFs.
pub fn count_pdf_pages(content: &[u8]) -> u64 {
    let pages = memmem::find_iter(content, PDF_PAGE_MARKER).count() as u64;
    pages.max(1)
}

/// Lower-cased extension of the final path component, without the dot.
///
/// `"../scans/Report.PDF"` → `Some("pdf")`; `".png"` → `Some("png")`;
/// `"README"` → `None`.
pub fn file_extension(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
