//! In-process store used by tests and local demos. Tables are kept behind a
//! single `tokio::sync::RwLock`; every mutation is a read-modify-write under
//! one write guard.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::repository::{
    sort_candidates, CandidateFilter, CandidateRepository, ReferralRepository, UserRepository,
};
use crate::database::{StoreError, StoreResult};
use crate::models::candidate::{encode_list, Candidate, CandidateRow, CandidateStatus, NewCandidate};
use crate::models::referral::{NewReferral, Referral};
use crate::models::user::{NewUser, User};
use crate::utils::time;

#[derive(Debug, Default)]
struct Tables {
    candidates: Vec<CandidateRow>,
    referrals: Vec<Referral>,
    users: Vec<User>,
    next_candidate_id: i64,
    next_referral_id: i64,
    next_user_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw row as-is, bypassing list encoding. Lets callers load
    /// rows exactly as an external import left them.
    pub async fn insert_row(&self, mut row: CandidateRow) -> StoreResult<Candidate> {
        let mut tables = self.tables.write().await;
        if tables.candidates.iter().any(|c| c.email == row.email) {
            return Err(StoreError::Conflict(
                "A candidate with this email already exists".to_string(),
            ));
        }
        tables.next_candidate_id += 1;
        row.id = tables.next_candidate_id;
        tables.candidates.push(row.clone());
        Candidate::try_from(row)
    }

    async fn mutate_candidate<F>(&self, id: i64, apply: F) -> StoreResult<Option<Candidate>>
    where
        F: FnOnce(&mut CandidateRow) + Send,
    {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.candidates.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        apply(row);
        row.updated_at = time::advance(row.updated_at);
        Candidate::try_from(row.clone()).map(Some)
    }
}

#[async_trait]
impl CandidateRepository for MemoryStore {
    async fn get_candidate(&self, id: i64) -> StoreResult<Option<Candidate>> {
        let tables = self.tables.read().await;
        tables
            .candidates
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .map(Candidate::try_from)
            .transpose()
    }

    async fn list_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>> {
        let tables = self.tables.read().await;
        let mut candidates = Vec::with_capacity(tables.candidates.len());
        for row in tables.candidates.iter().cloned() {
            let candidate = Candidate::try_from(row)?;
            if filter.matches(&candidate) {
                candidates.push(candidate);
            }
        }
        drop(tables);

        sort_candidates(&mut candidates, filter.sort_by, filter.order);
        Ok(candidates)
    }

    async fn update_candidate_status(
        &self,
        id: i64,
        status: CandidateStatus,
    ) -> StoreResult<Option<Candidate>> {
        self.mutate_candidate(id, |row| row.status = status.as_str().to_string())
            .await
    }

    async fn update_candidate_score(&self, id: i64, score: f64) -> StoreResult<Option<Candidate>> {
        self.mutate_candidate(id, |row| row.ai_score = score).await
    }

    async fn list_candidates_with_referrer(&self) -> StoreResult<Vec<Candidate>> {
        let tables = self.tables.read().await;
        tables
            .candidates
            .iter()
            .filter(|row| row.referred_by.is_some())
            .cloned()
            .map(Candidate::try_from)
            .collect()
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> StoreResult<Candidate> {
        let now = time::now();
        let row = CandidateRow {
            id: 0,
            skills: Some(encode_list(&candidate.skills)),
            projects: Some(encode_list(&candidate.projects)),
            experience: Some(encode_list(&candidate.experience)),
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            college: candidate.college,
            degree: candidate.degree,
            graduation_year: candidate.graduation_year,
            cgpa: candidate.cgpa,
            resume_path: candidate.resume_path,
            ai_score: candidate.ai_score,
            status: candidate.status.as_str().to_string(),
            referred_by: candidate.referred_by,
            created_at: now,
            updated_at: now,
        };
        self.insert_row(row).await
    }
}

#[async_trait]
impl ReferralRepository for MemoryStore {
    async fn list_referrals(&self) -> StoreResult<Vec<Referral>> {
        Ok(self.tables.read().await.referrals.clone())
    }

    async fn insert_referral(&self, referral: NewReferral) -> StoreResult<Referral> {
        let mut tables = self.tables.write().await;
        if tables
            .referrals
            .iter()
            .any(|r| r.referrer_name == referral.referrer_name)
        {
            return Err(StoreError::Conflict(
                "A referrer with this name already exists".to_string(),
            ));
        }
        tables.next_referral_id += 1;
        let referral = Referral {
            id: tables.next_referral_id,
            referrer_name: referral.referrer_name,
            referrer_email: referral.referrer_email,
            total_referrals: referral.total_referrals,
            successful_hires: referral.successful_hires,
            conversion_rate: referral.conversion_rate,
            created_at: time::now(),
        };
        tables.referrals.push(referral.clone());
        Ok(referral)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role.as_str().to_string(),
            created_at: time::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::{SortColumn, SortOrder};

    fn new_candidate(email: &str, ai_score: f64) -> NewCandidate {
        NewCandidate {
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            skills: vec!["Rust".into(), "SQL".into()],
            ai_score,
            ..NewCandidate::default()
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let first = store.insert_candidate(new_candidate("a@x.io", 10.0)).await.unwrap();
        let second = store.insert_candidate(new_candidate("b@x.io", 20.0)).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(first.skills, vec!["Rust".to_string(), "SQL".to_string()]);

        match store.insert_candidate(new_candidate("a@x.io", 30.0)).await {
            Err(StoreError::Conflict(_)) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn raw_rows_with_malformed_lists_decode_to_empty() {
        let store = MemoryStore::new();
        let now = time::now();
        let inserted = store
            .insert_row(CandidateRow {
                id: 0,
                name: "Raw".into(),
                email: "raw@x.io".into(),
                phone: None,
                college: None,
                degree: None,
                graduation_year: None,
                cgpa: None,
                skills: Some("[\"Python\"".into()),
                projects: None,
                experience: Some("[\"Intern\"]".into()),
                resume_path: None,
                ai_score: 0.0,
                status: "pending".into(),
                referred_by: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        assert!(inserted.skills.is_empty());
        assert!(inserted.projects.is_empty());
        assert_eq!(inserted.experience, vec!["Intern".to_string()]);
    }

    #[tokio::test]
    async fn status_update_bumps_updated_at_even_when_unchanged() {
        let store = MemoryStore::new();
        let candidate = store.insert_candidate(new_candidate("a@x.io", 10.0)).await.unwrap();

        let first = store
            .update_candidate_status(candidate.id, CandidateStatus::Pending)
            .await
            .unwrap()
            .unwrap();
        let second = store
            .update_candidate_status(candidate.id, CandidateStatus::Pending)
            .await
            .unwrap()
            .unwrap();
        assert!(first.updated_at > candidate.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, candidate.created_at);
    }

    #[tokio::test]
    async fn updates_on_missing_ids_return_none() {
        let store = MemoryStore::new();
        assert!(store
            .update_candidate_status(42, CandidateStatus::Hired)
            .await
            .unwrap()
            .is_none());
        assert!(store.update_candidate_score(42, 50.0).await.unwrap().is_none());
        assert!(store.get_candidate(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_applies_filter_and_sort() {
        let store = MemoryStore::new();
        for (email, score) in [("a@x.io", 40.0), ("b@x.io", 90.0), ("c@x.io", 70.0)] {
            store.insert_candidate(new_candidate(email, score)).await.unwrap();
        }
        let filter = CandidateFilter {
            min_score: Some(70.0),
            sort_by: SortColumn::AiScore,
            order: SortOrder::Asc,
            ..CandidateFilter::default()
        };
        let listed = store.list_candidates(&filter).await.unwrap();
        let scores: Vec<f64> = listed.iter().map(|c| c.ai_score).collect();
        assert_eq!(scores, vec![70.0, 90.0]);
    }

    #[tokio::test]
    async fn concurrent_updates_on_one_row_never_tear() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let candidate = store.insert_candidate(new_candidate("a@x.io", 10.0)).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let status = CandidateStatus::ALL[i % CandidateStatus::ALL.len()];
                store.update_candidate_status(candidate.id, status).await
            }));
        }
        let mut stamps = Vec::new();
        for handle in handles {
            let updated = handle.await.unwrap().unwrap().unwrap();
            stamps.push(updated.updated_at);
        }
        stamps.sort();
        stamps.dedup();
        assert_eq!(stamps.len(), 20, "every update gets its own timestamp");
    }
}
