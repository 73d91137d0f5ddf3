use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::AppState;

/// Rejects requests without a valid `Bearer` session token and exposes the
/// decoded `Claims` to handlers as a request extension.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return Error::Unauthorized("Access token required").into_response();
    };
    let Some(token) = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    else {
        return Error::Unauthorized("Malformed authorization header").into_response();
    };

    match state.credentials.decode_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "bearer token rejected");
            Error::Unauthorized("Invalid or expired token").into_response()
        }
    }
}
