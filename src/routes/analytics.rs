use axum::{extract::State, response::IntoResponse};

use crate::dto::envelope::ApiResponse;
use crate::error::Result;
use crate::AppState;

pub async fn get_statistics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let statistics = state.analytics_service.statistics().await?;
    Ok(ApiResponse::ok(statistics))
}

pub async fn get_referral_network(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let network = state.referral_service.network().await?;
    Ok(ApiResponse::ok(network))
}
