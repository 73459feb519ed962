use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::application::services::payload::RawProfilePayload;
use crate::application::services::rating_service::RatingService;
use crate::domain::errors::ApiError;

/// Request body for POST /rate: platform key → raw provider payload.
pub type RateRequest = BTreeMap<String, RawProfilePayload>;

fn error_response(err: ApiError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({
            "error": err.to_string(),
            "status_code": status.as_u16(),
        })),
    )
}

/// Rate a set of gathered per-platform payloads.
///
/// Malformed input (unknown platform key, unparseable count) surfaces as a
/// client error; anything else the engine cannot handle is a server error.
pub async fn rate(
    State(service): State<Arc<RatingService>>,
    Json(request): Json<RateRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    debug!(platforms = request.len(), "Received rate request");

    let outcome = service
        .rate(&request, Utc::now())
        .await
        .map_err(|err| error_response(ApiError::InvalidRequest(err.to_string())))?;

    let mut data = serde_json::to_value(&outcome.report).map_err(|err| {
        error_response(ApiError::InternalServerError(format!(
            "Failed to serialize report: {}",
            err
        )))
    })?;

    if let (Some(object), Some(feedback)) = (data.as_object_mut(), outcome.feedback) {
        object.insert("feedback".to_string(), Value::String(feedback));
    }

    Ok(Json(serde_json::json!({
        "data": data,
        "status_code": StatusCode::OK.as_u16(),
    })))
}
