use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregate record for one referrer. Counters and `conversion_rate` are
/// maintained outside this service and are reported exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: i64,
    pub referrer_name: String,
    pub referrer_email: Option<String>,
    pub total_referrals: i32,
    pub successful_hires: i32,
    pub conversion_rate: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReferral {
    pub referrer_name: String,
    pub referrer_email: Option<String>,
    pub total_referrals: i32,
    pub successful_hires: i32,
    pub conversion_rate: f64,
}
