// crates/server/src/routes/calc.rs
//! Cost calculation endpoint.
//!
//! Accepts a JSON body, a urlencoded form, or a multipart upload with any
//! number of `files` parts. Text always comes from the `text_input` field.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    routing::post,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokencost_core::{CalcInput, Calculation, CostBreakdown, TokenBreakdown, UploadedFile};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying uploaded files.
pub const FILES_FIELD: &str = "files";

/// Field carrying the prompt text, in every encoding.
pub const TEXT_FIELD: &str = "text_input";

/// JSON or urlencoded request body.
#[derive(Debug, Default, Deserialize)]
pub struct CalcRequest {
    #[serde(default)]
    pub text_input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenSummary {
    pub input: u64,
    pub output: u64,
    pub breakdown: TokenBreakdown,
}

#[derive(Debug, Serialize)]
pub struct PricingPer1k {
    pub input: f64,
    pub output: f64,
}

/// Successful calculation response.
#[derive(Debug, Serialize)]
pub struct CalcResponse {
    pub success: bool,
    pub model_id: String,
    pub tokens: TokenSummary,
    pub cost: CostBreakdown,
    pub pricing_per_1k: PricingPer1k,
}

impl From<Calculation> for CalcResponse {
    fn from(calc: Calculation) -> Self {
        Self {
            success: true,
            model_id: calc.model_id,
            tokens: TokenSummary {
                input: calc.input_tokens,
                output: calc.output_tokens,
                breakdown: calc.breakdown,
            },
            cost: calc.cost,
            pricing_per_1k: PricingPer1k {
                input: calc.input_price_per_1k,
                output: calc.output_price_per_1k,
            },
        }
    }
}

/// POST /api/calc - Estimate tokens and cost for a prompt and/or uploads.
///
/// Returns:
/// - 200 OK: estimate computed
/// - 400 Bad Request: no text and no priced files
/// - 413 Payload Too Large: body over the configured upload limit
/// - 500 Internal Server Error: unreadable body
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> ApiResult<Json<CalcResponse>> {
    let input = read_input(request, &state).await?;
    let calculation = state.calculator.calculate(&input)?;

    tracing::info!(
        files = input.files.len(),
        input_tokens = calculation.input_tokens,
        output_tokens = calculation.output_tokens,
        total_per_request = calculation.cost.total_per_request,
        "Calculated request cost"
    );

    Ok(Json(calculation.into()))
}

/// Pull text and files out of whichever encoding the client used.
///
/// Unknown or missing content types carry no input.
async fn read_input(request: Request, state: &Arc<AppState>) -> ApiResult<CalcInput> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime == "multipart/form-data" {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        read_multipart(multipart).await
    } else if is_json(mime) {
        let Json(body) = Json::<CalcRequest>::from_request(request, state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        Ok(CalcInput {
            text: body.text_input,
            files: Vec::new(),
        })
    } else if mime == "application/x-www-form-urlencoded" {
        let Form(body) = Form::<CalcRequest>::from_request(request, state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        Ok(CalcInput {
            text: body.text_input,
            files: Vec::new(),
        })
    } else {
        tracing::debug!(content_type = %content_type, "No recognised body encoding");
        Ok(CalcInput::default())
    }
}

async fn read_multipart(mut multipart: Multipart) -> ApiResult<CalcInput> {
    let mut input = CalcInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILES_FIELD) => {
                let filename = field.file_name().map(sanitize_filename);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                match filename {
                    Some(filename) if !filename.is_empty() => {
                        input.files.push(UploadedFile::new(filename, content.to_vec()));
                    }
                    _ => {
                        tracing::debug!(bytes = content.len(), "Skipping upload without a filename")
                    }
                }
            }
            Some(TEXT_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                // First value wins when the field repeats.
                if input.text.is_none() {
                    input.text = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(input)
}

/// `application/json` or any `application/*+json` subtype.
fn is_json(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Final path component, trimmed and lower-cased.
pub fn sanitize_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_lowercase()
}

fn body_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::Internal(message)
    }
}

/// Create the calc routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/calc", post(calculate))
}
