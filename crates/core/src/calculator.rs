//! Orchestrates estimation for one request: files and text → token
//! breakdown → output estimate → cost.

use serde::Serialize;

use crate::cost::{calculate_cost, CostBreakdown};
use crate::error::CalcError;
use crate::estimator::{HeuristicEstimator, TokenBreakdown, TokenEstimator};
use crate::output::estimate_output_tokens;
use crate::pricing::{default_pricing, ModelPricing, DEFAULT_MODEL_ID, DEFAULT_REQUESTS_PER_DAY};

/// One uploaded file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Everything a caller can submit for estimation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalcInput {
    pub text: Option<String>,
    pub files: Vec<UploadedFile>,
}

/// A successful estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub model_id: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub breakdown: TokenBreakdown,
    pub cost: CostBreakdown,
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
}

/// Cost calculator bound to one pricing model and projection volume.
pub struct Calculator {
    pricing: ModelPricing,
    requests_per_day: u32,
    estimator: Box<dyn TokenEstimator>,
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("pricing", &self.pricing)
            .field("requests_per_day", &self.requests_per_day)
            .finish_non_exhaustive()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        let pricing = default_pricing()
            .remove(DEFAULT_MODEL_ID)
            .unwrap_or_else(|| ModelPricing::new(DEFAULT_MODEL_ID, "Claude Sonnet 4.5", 0.003, 0.015));
        Self::new(pricing, DEFAULT_REQUESTS_PER_DAY)
    }
}

impl Calculator {
    /// Calculator using the built-in heuristics.
    pub fn new(pricing: ModelPricing, requests_per_day: u32) -> Self {
        Self {
            pricing,
            requests_per_day,
            estimator: Box::new(HeuristicEstimator),
        }
    }

    /// Swap in a different token estimator.
    pub fn with_estimator(mut self, estimator: impl TokenEstimator + 'static) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    pub fn pricing(&self) -> &ModelPricing {
        &self.pricing
    }

    pub fn requests_per_day(&self) -> u32 {
        self.requests_per_day
    }

    /// Per-category input tokens for `input`.
    ///
    /// Files with an empty name are dropped, unpriced types are skipped.
    /// Non-empty text replaces (does not add to) the text tokens derived
    /// from `.txt` uploads.
    pub fn breakdown(&self, input: &CalcInput) -> TokenBreakdown {
        let mut breakdown = TokenBreakdown::default();

        for file in input.files.iter().filter(|f| !f.filename.trim().is_empty()) {
            match self.estimator.file_tokens(&file.filename, &file.content) {
                Some((category, tokens)) => {
                    tracing::debug!(
                        filename = %file.filename,
                        bytes = file.content.len(),
                        ?category,
                        tokens,
                        "Estimated upload"
                    );
                    breakdown.add(category, tokens);
                }
                None => {
                    tracing::debug!(filename = %file.filename, "Skipping unsupported upload");
                }
            }
        }

        // FIXME: explicit text overwrites tokens from uploaded .txt files
        // instead of accumulating. Kept until the intended behavior is confirmed.
        if let Some(text) = input.text.as_deref().filter(|t| !t.is_empty()) {
            breakdown.text_tokens = self.estimator.text_tokens(text);
        }

        breakdown
    }

    /// Estimate tokens and cost for `input`.
    pub fn calculate(&self, input: &CalcInput) -> Result<Calculation, CalcError> {
        let breakdown = self.breakdown(input);
        let input_tokens = breakdown.total();
        if input_tokens == 0 {
            return Err(CalcError::NoInput);
        }

        let output_tokens = estimate_output_tokens(input_tokens);
        let cost = calculate_cost(input_tokens, output_tokens, &self.pricing, self.requests_per_day);

        Ok(Calculation {
            model_id: self.pricing.model_id.clone(),
            input_tokens,
            output_tokens,
            breakdown,
            cost,
            input_price_per_1k: self.pricing.input_price_per_1k,
            output_price_per_1k: self.pricing.output_price_per_1k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::FileCategory;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CalcInput {
        CalcInput {
            text: Some(s.to_string()),
            files: vec![],
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let calc = Calculator::default();
        assert_eq!(calc.calculate(&CalcInput::default()), Err(CalcError::NoInput));
        assert_eq!(calc.calculate(&text("")), Err(CalcError::NoInput));
    }

    #[test]
    fn test_sample_prompt() {
        let calc = Calculator::default();
        let result = calc
            .calculate(&text("Hello world, this is a test prompt for the calculator"))
            .unwrap();

        assert_eq!(result.model_id, DEFAULT_MODEL_ID);
        assert_eq!(result.input_tokens, 13);
        assert_eq!(result.output_tokens, 50);
        assert_eq!(
            result.breakdown,
            TokenBreakdown {
                text_tokens: 13,
                image_tokens: 0,
                document_tokens: 0,
            }
        );
        assert!((result.cost.total_per_request - 0.000789).abs() < 1e-9);
        assert_eq!(result.input_price_per_1k, 0.003);
        assert_eq!(result.output_price_per_1k, 0.015);
    }

    #[test]
    fn test_files_accumulate_by_category() {
        let calc = Calculator::default();
        let input = CalcInput {
            text: None,
            files: vec![
                UploadedFile::new("a.png", vec![]),
                UploadedFile::new("b.JPG", vec![1, 2, 3]),
                UploadedFile::new("c.pdf", b"/Page /Page".to_vec()),
                UploadedFile::new("d.txt", b"abcdefghijkl".to_vec()),
                UploadedFile::new("e.docx", b"ignored".to_vec()),
            ],
        };
        let result = calc.calculate(&input).unwrap();
        assert_eq!(
            result.breakdown,
            TokenBreakdown {
                text_tokens: 3,
                image_tokens: 3200,
                document_tokens: 1000,
            }
        );
        assert_eq!(result.input_tokens, 4203);
        assert_eq!(result.output_tokens, 2522);
    }

    #[test]
    fn test_nameless_files_dropped() {
        let calc = Calculator::default();
        let input = CalcInput {
            text: None,
            files: vec![UploadedFile::new("", b"/Page".to_vec())],
        };
        assert_eq!(calc.calculate(&input), Err(CalcError::NoInput));
    }

    #[test]
    fn test_only_unsupported_files_is_no_input() {
        let calc = Calculator::default();
        let input = CalcInput {
            text: None,
            files: vec![UploadedFile::new("data.csv", b"a,b,c".to_vec())],
        };
        assert_eq!(calc.calculate(&input), Err(CalcError::NoInput));
    }

    #[test]
    fn test_text_replaces_txt_upload_tokens() {
        let calc = Calculator::default();
        let input = CalcInput {
            text: Some("abcdefgh".into()),
            files: vec![
                UploadedFile::new("long.txt", vec![b'x'; 400]),
                UploadedFile::new("pic.webp", vec![]),
            ],
        };
        let breakdown = calc.breakdown(&input);
        assert_eq!(breakdown.text_tokens, 2);
        assert_eq!(breakdown.image_tokens, 1600);
    }

    #[test]
    fn test_whitespace_text_counts_one_token() {
        let calc = Calculator::default();
        let result = calc.calculate(&text("   ")).unwrap();
        assert_eq!(result.input_tokens, 1);
    }

    #[test]
    fn test_projection_volume_is_configurable() {
        let pricing = default_pricing().remove(DEFAULT_MODEL_ID).unwrap();
        let calc = Calculator::new(pricing, 10);
        assert_eq!(calc.requests_per_day(), 10);
        let result = calc.calculate(&text(&"x".repeat(4000))).unwrap();
        // 1000 in / 600 out → 0.012 per request
        assert!((result.cost.weekly_estimate - 0.84).abs() < 1e-9);
    }

    struct FixedEstimator;

    impl TokenEstimator for FixedEstimator {
        fn text_tokens(&self, _text: &str) -> u64 {
            42
        }

        fn file_tokens(&self, _filename: &str, _content: &[u8]) -> Option<(FileCategory, u64)> {
            Some((FileCategory::Document, 8))
        }
    }

    #[test]
    fn test_custom_estimator() {
        let calc = Calculator::default().with_estimator(FixedEstimator);
        let input = CalcInput {
            text: Some("anything".into()),
            files: vec![UploadedFile::new("any.bin", vec![])],
        };
        let result = calc.calculate(&input).unwrap();
        assert_eq!(result.breakdown.text_tokens, 42);
        assert_eq!(result.breakdown.document_tokens, 8);
        assert_eq!(result.input_tokens, 50);
    }
}
