use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;

use crate::{error::AppError, state::SharedState};

// Body is taken raw so malformed JSON gets the same fallback as a backend failure.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let data = state.relay.forward(payload).await?;

    Ok(Json(data))
}
