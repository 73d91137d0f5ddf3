use std::sync::Arc;

use crate::database::repository::CandidateRepository;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::utils::credentials::Claims;

/// Applies pipeline mutations: status transitions and AI score updates.
///
/// Transitions are permissive; any stage may follow any other, including a
/// final stage going back to `pending`.
#[derive(Clone)]
pub struct StatusService {
    repository: Arc<dyn CandidateRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn CandidateRepository>) -> Self {
        Self { repository }
    }

    pub async fn update_status(
        &self,
        id: i64,
        requested: Option<&str>,
        actor: Option<&Claims>,
    ) -> Result<Candidate> {
        let status = parse_status(requested)?;

        let candidate = self
            .repository
            .update_candidate_status(id, status)
            .await?
            .ok_or(Error::NotFound("Candidate"))?;

        tracing::info!(
            candidate_id = id,
            status = %status,
            actor_id = actor.map(|claims| claims.id),
            "candidate status updated"
        );
        Ok(candidate)
    }

    pub async fn update_score(
        &self,
        id: i64,
        score: f64,
        actor: Option<&Claims>,
    ) -> Result<Candidate> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(Error::InvalidScore(format!(
                "score must be between 0 and 100, got {}",
                score
            )));
        }

        let candidate = self
            .repository
            .update_candidate_score(id, score)
            .await?
            .ok_or(Error::NotFound("Candidate"))?;

        tracing::info!(
            candidate_id = id,
            score,
            actor_id = actor.map(|claims| claims.id),
            "candidate score updated"
        );
        Ok(candidate)
    }
}

fn parse_status(requested: Option<&str>) -> Result<CandidateStatus> {
    requested
        .ok_or(Error::InvalidStatus)?
        .parse()
        .map_err(|_| Error::InvalidStatus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::database::repository::MockCandidateRepository;
    use crate::models::candidate::NewCandidate;

    async fn seeded() -> (Arc<MemoryStore>, Candidate) {
        let store = Arc::new(MemoryStore::new());
        let candidate = store
            .insert_candidate(NewCandidate {
                name: "Rahul".into(),
                email: "rahul@example.com".into(),
                status: CandidateStatus::Hired,
                ..NewCandidate::default()
            })
            .await
            .unwrap();
        (store, candidate)
    }

    #[tokio::test]
    async fn invalid_status_is_rejected_before_the_store() {
        let mut repository = MockCandidateRepository::new();
        repository.expect_update_candidate_status().never();
        let service = StatusService::new(Arc::new(repository));

        for requested in [Some("archived"), Some("Hired"), Some(""), None] {
            match service.update_status(1, requested, None).await {
                Err(Error::InvalidStatus) => {}
                other => panic!("expected invalid status for {requested:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn invalid_status_leaves_row_untouched() {
        let (store, candidate) = seeded().await;
        let service = StatusService::new(store.clone());

        assert!(service
            .update_status(candidate.id, Some("promoted"), None)
            .await
            .is_err());
        let stored = store.get_candidate(candidate.id).await.unwrap().unwrap();
        assert_eq!(stored, candidate);
    }

    #[tokio::test]
    async fn any_stage_may_follow_any_other() {
        let (store, candidate) = seeded().await;
        let service = StatusService::new(store);

        let mut last = candidate.updated_at;
        for status in ["pending", "pending", "rejected", "interview", "hired", "shortlisted"] {
            let updated = service
                .update_status(candidate.id, Some(status), None)
                .await
                .unwrap();
            assert_eq!(updated.status.as_str(), status);
            assert!(updated.updated_at > last);
            assert_eq!(updated.created_at, candidate.created_at);
            last = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn missing_candidate_is_not_found() {
        let (store, _) = seeded().await;
        let service = StatusService::new(store);
        match service.update_status(404, Some("hired"), None).await {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn score_updates_are_range_checked() {
        let (store, candidate) = seeded().await;
        let service = StatusService::new(store);

        for score in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            match service.update_score(candidate.id, score, None).await {
                Err(Error::InvalidScore(_)) => {}
                other => panic!("expected invalid score for {score}, got {other:?}"),
            }
        }

        let updated = service.update_score(candidate.id, 87.5, None).await.unwrap();
        assert_eq!(updated.ai_score, 87.5);
        assert!(updated.updated_at > candidate.updated_at);
    }
}
