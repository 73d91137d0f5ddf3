use async_trait::async_trait;
use std::cmp::Ordering;

use crate::database::StoreResult;
use crate::models::candidate::{Candidate, CandidateStatus, NewCandidate};
use crate::models::referral::{NewReferral, Referral};
use crate::models::user::{NewUser, User};

/// Column a candidate listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    AiScore,
    Cgpa,
    CreatedAt,
    Name,
}

impl SortColumn {
    /// Resolves a requested column against the allow-list. Anything unknown
    /// falls back to the AI score.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("aiScore") | Some("ai_score") => SortColumn::AiScore,
            Some("cgpa") => SortColumn::Cgpa,
            Some("createdAt") | Some("created_at") => SortColumn::CreatedAt,
            Some("name") => SortColumn::Name,
            _ => SortColumn::AiScore,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortColumn::AiScore => "ai_score",
            SortColumn::Cgpa => "cgpa",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only a case-insensitive "asc" sorts ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub status: Option<CandidateStatus>,
    pub min_score: Option<f64>,
    pub sort_by: SortColumn,
    pub order: SortOrder,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.status.map_or(true, |status| candidate.status == status)
            && self
                .min_score
                .map_or(true, |min_score| candidate.ai_score >= min_score)
    }
}

/// Orders candidates in place the same way the SQL store does:
/// `ORDER BY <column> <order> NULLS LAST, id ASC`.
pub fn sort_candidates(candidates: &mut [Candidate], sort_by: SortColumn, order: SortOrder) {
    candidates.sort_by(|a, b| {
        let primary = match sort_by {
            SortColumn::AiScore => directed(a.ai_score.total_cmp(&b.ai_score), order),
            SortColumn::Cgpa => match (a.cgpa, b.cgpa) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortColumn::CreatedAt => directed(a.created_at.cmp(&b.created_at), order),
            SortColumn::Name => directed(a.name.cmp(&b.name), order),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn get_candidate(&self, id: i64) -> StoreResult<Option<Candidate>>;

    async fn list_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>>;

    /// Sets the status and bumps `updated_at` in one atomic row update.
    async fn update_candidate_status(
        &self,
        id: i64,
        status: CandidateStatus,
    ) -> StoreResult<Option<Candidate>>;

    /// Sets the AI score and bumps `updated_at` in one atomic row update.
    async fn update_candidate_score(&self, id: i64, score: f64) -> StoreResult<Option<Candidate>>;

    /// Candidates with a non-null `referred_by`, in id order.
    async fn list_candidates_with_referrer(&self) -> StoreResult<Vec<Candidate>>;

    async fn insert_candidate(&self, candidate: NewCandidate) -> StoreResult<Candidate>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// All referral rows, in id order.
    async fn list_referrals(&self) -> StoreResult<Vec<Referral>>;

    async fn insert_referral(&self, referral: NewReferral) -> StoreResult<Referral>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
}
