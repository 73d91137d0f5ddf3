use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::database::StoreError;

/// Pipeline stage of a candidate. Any stage may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Shortlisted,
    Interview,
    Rejected,
    Hired,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        CandidateStatus::Pending,
        CandidateStatus::Shortlisted,
        CandidateStatus::Interview,
        CandidateStatus::Rejected,
        CandidateStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Interview => "interview",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::Hired => "hired",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown candidate status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for CandidateStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CandidateStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    pub cgpa: Option<f64>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub experience: Vec<String>,
    pub resume_path: Option<String>,
    pub ai_score: f64,
    pub status: CandidateStatus,
    pub referred_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape of the `candidates` table. List columns hold JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    pub cgpa: Option<f64>,
    pub skills: Option<String>,
    pub projects: Option<String>,
    pub experience: Option<String>,
    pub resume_path: Option<String>,
    pub ai_score: f64,
    pub status: String,
    pub referred_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = StoreError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: UnknownStatus| StoreError::Decode(format!("candidate {}: {}", row.id, e)))?;

        Ok(Candidate {
            id: row.id,
            skills: decode_list(row.skills.as_deref()),
            projects: decode_list(row.projects.as_deref()),
            experience: decode_list(row.experience.as_deref()),
            name: row.name,
            email: row.email,
            phone: row.phone,
            college: row.college,
            degree: row.degree,
            graduation_year: row.graduation_year,
            cgpa: row.cgpa,
            resume_path: row.resume_path,
            ai_score: row.ai_score,
            status,
            referred_by: row.referred_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Candidate as received from a seed or import, before the store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    pub resume_path: Option<String>,
    #[serde(default)]
    pub ai_score: f64,
    #[serde(default)]
    pub status: CandidateStatus,
    pub referred_by: Option<String>,
}

/// Decodes a stored JSON list column. Absent or malformed text yields an empty list.
pub fn decode_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::debug!(error = %err, "discarding malformed list column");
            Vec::new()
        }
    }
}

pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
