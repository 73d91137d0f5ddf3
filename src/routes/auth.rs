use axum::{extract::State, response::IntoResponse, Json};

use crate::dto::auth_dto::LoginPayload;
use crate::dto::envelope::ApiResponse;
use crate::error::Result;
use crate::AppState;

/// A missing or unparsable body is treated as missing credentials.
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginPayload>>,
) -> Result<impl IntoResponse> {
    let payload = payload.map(|Json(payload)| payload).unwrap_or_default();
    let response = state.auth_service.login(&payload).await?;
    Ok(ApiResponse::ok(response))
}
