use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /api/candidates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub status: Option<String>,
    pub min_score: Option<f64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateScorePayload {
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
}
