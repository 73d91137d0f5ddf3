use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::dto::candidate_dto::{CandidateListQuery, UpdateScorePayload, UpdateStatusPayload};
use crate::dto::envelope::ApiResponse;
use crate::error::{Error, Result};
use crate::utils::credentials::Claims;
use crate::AppState;

/// A candidate id that does not parse cannot name any row.
fn candidate_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "unparsable candidate id");
        Error::NotFound("Candidate")
    })
}

pub async fn list_candidates(
    State(state): State<AppState>,
    query: std::result::Result<Query<CandidateListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let candidates = state.candidate_service.list_candidates(&query).await?;
    let count = candidates.len();
    Ok(ApiResponse::ok(candidates).with_count(count))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let id = candidate_id(path)?;
    let candidate = state.candidate_service.get_candidate(id).await?;
    Ok(ApiResponse::ok(candidate))
}

/// A missing or unparsable body carries no status and is rejected as an
/// invalid status.
pub async fn update_candidate_status(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    claims: Option<Extension<Claims>>,
    payload: Option<Json<UpdateStatusPayload>>,
) -> Result<impl IntoResponse> {
    let id = candidate_id(path)?;
    let payload = payload.map(|Json(payload)| payload).unwrap_or_default();
    let actor = claims.as_ref().map(|Extension(claims)| claims);
    let candidate = state
        .status_service
        .update_status(id, payload.status.as_deref(), actor)
        .await?;
    Ok(ApiResponse::ok(candidate).with_message("Candidate status updated"))
}

pub async fn update_candidate_score(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    claims: Option<Extension<Claims>>,
    payload: std::result::Result<Json<UpdateScorePayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let id = candidate_id(path)?;
    let Json(payload) = payload?;
    payload.validate()?;
    let actor = claims.as_ref().map(|Extension(claims)| claims);
    let candidate = state
        .status_service
        .update_score(id, payload.score, actor)
        .await?;
    Ok(ApiResponse::ok(candidate).with_message("Candidate score updated"))
}
