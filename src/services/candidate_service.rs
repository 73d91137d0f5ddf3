use std::sync::Arc;

use crate::database::repository::{CandidateFilter, CandidateRepository, SortColumn, SortOrder};
use crate::dto::candidate_dto::CandidateListQuery;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};

#[derive(Clone)]
pub struct CandidateService {
    repository: Arc<dyn CandidateRepository>,
}

impl CandidateService {
    pub fn new(repository: Arc<dyn CandidateRepository>) -> Self {
        Self { repository }
    }

    /// Lists candidates matching `query`. A status outside the pipeline
    /// vocabulary matches nothing and never reaches the store.
    pub async fn list_candidates(&self, query: &CandidateListQuery) -> Result<Vec<Candidate>> {
        let Some(filter) = build_filter(query) else {
            tracing::debug!(status = ?query.status, "status filter matches no pipeline stage");
            return Ok(Vec::new());
        };
        let candidates = self.repository.list_candidates(&filter).await?;
        Ok(candidates)
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        self.repository
            .get_candidate(id)
            .await?
            .ok_or(Error::NotFound("Candidate"))
    }
}

/// `None` when the requested status cannot match any row.
pub fn build_filter(query: &CandidateListQuery) -> Option<CandidateFilter> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<CandidateStatus>().ok()?),
    };

    Some(CandidateFilter {
        status,
        min_score: query.min_score,
        sort_by: SortColumn::from_param(query.sort_by.as_deref()),
        order: SortOrder::from_param(query.order.as_deref()),
    })
}
