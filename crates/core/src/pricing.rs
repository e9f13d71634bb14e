//! Pricing table for cost estimation.
//!
//! Single source of truth for:
//! - `ModelPricing` struct (per-model rates, USD per 1000 tokens)
//! - `PricingTable` keyed by model identifier
//! - `lookup_pricing()` with exact → prefix fallback
//! - Hardcoded defaults for the calculator

use serde::Serialize;
use std::collections::HashMap;

/// Model served by the calculator when nothing else is configured.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-5-20250929-v1:0";

/// Daily request volume assumed for weekly/monthly projections.
pub const DEFAULT_REQUESTS_PER_DAY: u32 = 100;

/// Per-model pricing in USD per 1000 tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPricing {
    pub model_id: String,
    /// Human-readable name reported by the health probe.
    pub name: String,
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
}

impl ModelPricing {
    pub fn new(
        model_id: impl Into<String>,
        name: impl Into<String>,
        input_price_per_1k: f64,
        output_price_per_1k: f64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            name: name.into(),
            input_price_per_1k,
            output_price_per_1k,
        }
    }
}

/// Pricing entries keyed by model identifier.
pub type PricingTable = HashMap<String, ModelPricing>;

/// Look up pricing for a model ID.
///
/// Fallback chain:
/// 1. Exact match (e.g. "us.anthropic.claude-sonnet-4-5-20250929-v1:0")
/// 2. Key is prefix of model_id (e.g. key "claude-sonnet-4-5" matches "claude-sonnet-4-5-20250929")
/// 3. model_id is prefix of key (e.g. "us.anthropic.claude-sonnet" matches the full Bedrock id)
pub fn lookup_pricing<'a>(model_id: &str, pricing: &'a PricingTable) -> Option<&'a ModelPricing> {
    if model_id.is_empty() {
        return None;
    }
    if let Some(p) = pricing.get(model_id) {
        return Some(p);
    }
    for (key, p) in pricing {
        if model_id.starts_with(key.as_str()) {
            return Some(p);
        }
    }
    for (key, p) in pricing {
        if key.starts_with(model_id) {
            return Some(p);
        }
    }
    None
}

/// Built-in pricing table.
///
/// Only Claude Sonnet 4.5 on Bedrock is priced today ($3/M input, $15/M output).
pub fn default_pricing() -> PricingTable {
    let mut m = HashMap::new();

    m.insert(
        DEFAULT_MODEL_ID.into(),
        ModelPricing::new(DEFAULT_MODEL_ID, "Claude Sonnet 4.5", 0.003, 0.015),
    );

    m
}
