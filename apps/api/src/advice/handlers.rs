//! Axum route handler for the advice chat.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::advice::prompts::fallback_message;
use crate::advice::{AdviceOutcome, Language};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_language")]
    pub language: Language,
}

/// Missing, null, non-string or unrecognised tags all mean English.
fn deserialize_language<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) => Language::from_tag(&tag),
        _ => Language::English,
    })
}

#[derive(Debug, Serialize)]
pub struct AdviceAnswer {
    pub response: String,
    pub language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceFailure {
    pub error: String,
    pub fallback_response: String,
}

fn failure(status: StatusCode, error: String, fallback: String) -> Response {
    (
        status,
        Json(AdviceFailure {
            error,
            fallback_response: fallback,
        }),
    )
        .into_response()
}

/// POST /api/v1/advice
///
/// 200 `{response, language}` on success. On failure the body always carries
/// a displayable `fallbackResponse`: 400 for a blank message or an unreadable
/// body, 502 when the upstream model couldn't answer.
pub async fn handle_advice(
    State(state): State<AppState>,
    body: Result<Json<AdviceRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable advice request: {}", rejection.body_text());
            return failure(
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                fallback_message(Language::English).to_string(),
            );
        }
    };

    let blank = request.message.trim().is_empty();
    match state
        .advice
        .consult(&request.message, request.language)
        .await
    {
        AdviceOutcome::Answered(response) => (
            StatusCode::OK,
            Json(AdviceAnswer {
                response,
                language: request.language,
            }),
        )
            .into_response(),
        AdviceOutcome::Fallback { error, fallback } => {
            let status = if blank {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::BAD_GATEWAY
            };
            failure(status, error, fallback)
        }
    }
}
