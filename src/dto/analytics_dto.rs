use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStatistics {
    pub total: u64,
    pub shortlisted: u64,
    pub pending: u64,
    pub average_score: f64,
    pub average_cgpa: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralNetwork {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NetworkNode {
    #[serde(rename_all = "camelCase")]
    Referrer {
        id: String,
        email: Option<String>,
        total_referrals: i32,
        successful_hires: i32,
        conversion_rate: f64,
        value: f64,
    },
    #[serde(rename_all = "camelCase")]
    Candidate {
        id: String,
        name: String,
        status: CandidateStatus,
        score: f64,
    },
}

impl NetworkNode {
    pub fn id(&self) -> &str {
        match self {
            NetworkNode::Referrer { id, .. } | NetworkNode::Candidate { id, .. } => id,
        }
    }
}

/// Edge from a referrer name to a candidate node. `source` may name a
/// referrer that has no node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}
