//! Postgres-backed store. All SQL is runtime-checked (`sqlx::query_as`),
//! so building the crate does not need a live database.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::repository::{
    CandidateFilter, CandidateRepository, ReferralRepository, UserRepository,
};
use crate::database::{StoreError, StoreResult};
use crate::models::candidate::{encode_list, Candidate, CandidateRow, CandidateStatus, NewCandidate};
use crate::models::referral::{NewReferral, Referral};
use crate::models::user::{NewUser, User};

const CANDIDATE_COLUMNS: &str = "id, name, email, phone, college, degree, graduation_year, cgpa, \
     skills, projects, experience, resume_path, ai_score, status, referred_by, created_at, updated_at";

const REFERRAL_COLUMNS: &str = "id, referrer_name, referrer_email, total_referrals, \
     successful_hires, conversion_rate, created_at";

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_rows(rows: Vec<CandidateRow>) -> StoreResult<Vec<Candidate>> {
    rows.into_iter().map(Candidate::try_from).collect()
}

fn map_unique_violation(err: sqlx::Error, what: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(format!("{} already exists", what))
        }
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl CandidateRepository for PgStore {
    async fn get_candidate(&self, id: i64) -> StoreResult<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn list_candidates(&self, filter: &CandidateFilter) -> StoreResult<Vec<Candidate>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE 1=1"));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(min_score) = filter.min_score {
            query.push(" AND ai_score >= ").push_bind(min_score);
        }
        // Column and direction come from closed enums, never from raw input.
        query.push(format!(
            " ORDER BY {} {} NULLS LAST, id ASC",
            filter.sort_by.column(),
            filter.order.keyword()
        ));

        let rows = query
            .build_query_as::<CandidateRow>()
            .fetch_all(&self.pool)
            .await?;
        decode_rows(rows)
    }

    async fn update_candidate_status(
        &self,
        id: i64,
        status: CandidateStatus,
    ) -> StoreResult<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            UPDATE candidates
            SET status = $1, updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $2
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn update_candidate_score(&self, id: i64, score: f64) -> StoreResult<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            UPDATE candidates
            SET ai_score = $1, updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $2
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(score)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn list_candidates_with_referrer(&self) -> StoreResult<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE referred_by IS NOT NULL ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        decode_rows(rows)
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> StoreResult<Candidate> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            INSERT INTO candidates (
                name, email, phone, college, degree, graduation_year, cgpa,
                skills, projects, experience, resume_path, ai_score, status, referred_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.college)
        .bind(&candidate.degree)
        .bind(candidate.graduation_year)
        .bind(candidate.cgpa)
        .bind(encode_list(&candidate.skills))
        .bind(encode_list(&candidate.projects))
        .bind(encode_list(&candidate.experience))
        .bind(&candidate.resume_path)
        .bind(candidate.ai_score)
        .bind(candidate.status.as_str())
        .bind(&candidate.referred_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A candidate with this email"))?;
        Candidate::try_from(row)
    }
}

#[async_trait]
impl ReferralRepository for PgStore {
    async fn list_referrals(&self) -> StoreResult<Vec<Referral>> {
        let referrals = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {REFERRAL_COLUMNS} FROM referrals ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(referrals)
    }

    async fn insert_referral(&self, referral: NewReferral) -> StoreResult<Referral> {
        let referral = sqlx::query_as::<_, Referral>(&format!(
            r#"
            INSERT INTO referrals (referrer_name, referrer_email, total_referrals, successful_hires, conversion_rate)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REFERRAL_COLUMNS}
            "#
        ))
        .bind(&referral.referrer_name)
        .bind(&referral.referrer_email)
        .bind(referral.total_referrals)
        .bind(referral.successful_hires)
        .bind(referral.conversion_rate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A referrer with this name"))?;
        Ok(referral)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A user with this email"))?;
        Ok(user)
    }
}
