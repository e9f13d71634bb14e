//! Per-request cost and projections.
//!
//! Costs are computed from [`ModelPricing`] rates (USD per 1000 tokens) and
//! extrapolated to a week and a month assuming a constant number of requests
//! per day. Per-request figures are rounded to 6 decimals, projections to 4.

use serde::Serialize;

use crate::pricing::ModelPricing;

/// Decimal places kept for per-request figures.
pub const REQUEST_COST_DECIMALS: i32 = 6;

/// Decimal places kept for weekly/monthly projections.
pub const PROJECTION_DECIMALS: i32 = 4;

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Itemized cost in USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub input: f64,
    pub output: f64,
    pub total_per_request: f64,
    pub weekly_estimate: f64,
    pub monthly_estimate: f64,
}

/// Calculate cost for one request and project it over a week and a month.
pub fn calculate_cost(
    input_tokens: u64,
    output_tokens: u64,
    pricing: &ModelPricing,
    requests_per_day: u32,
) -> CostBreakdown {
    let input_cost = (input_tokens as f64 / 1000.0) * pricing.input_price_per_1k;
    let output_cost = (output_tokens as f64 / 1000.0) * pricing.output_price_per_1k;
    let total_cost = input_cost + output_cost;

    let daily_cost = total_cost * f64::from(requests_per_day);
    let weekly_cost = daily_cost * DAYS_PER_WEEK;
    let monthly_cost = daily_cost * DAYS_PER_MONTH;

    CostBreakdown {
        input: round_to(input_cost, REQUEST_COST_DECIMALS),
        output: round_to(output_cost, REQUEST_COST_DECIMALS),
        total_per_request: round_to(total_cost, REQUEST_COST_DECIMALS),
        weekly_estimate: round_to(weekly_cost, PROJECTION_DECIMALS),
        monthly_estimate: round_to(monthly_cost, PROJECTION_DECIMALS),
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
