use std::sync::Arc;

use crate::database::repository::{CandidateFilter, CandidateRepository};
use crate::dto::analytics_dto::PipelineStatistics;
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateStatus};

#[derive(Clone)]
pub struct AnalyticsService {
    candidates: Arc<dyn CandidateRepository>,
}

impl AnalyticsService {
    pub fn new(candidates: Arc<dyn CandidateRepository>) -> Self {
        Self { candidates }
    }

    pub async fn statistics(&self) -> Result<PipelineStatistics> {
        let candidates = self
            .candidates
            .list_candidates(&CandidateFilter::default())
            .await?;
        Ok(summarize(&candidates))
    }
}

/// Pipeline summary in a single pass. Averages of an empty set are `0.0`;
/// the CGPA average only counts candidates with a CGPA above zero.
pub fn summarize(candidates: &[Candidate]) -> PipelineStatistics {
    let mut shortlisted = 0u64;
    let mut pending = 0u64;
    let mut score_sum = 0.0;
    let mut cgpa_sum = 0.0;
    let mut cgpa_count = 0u64;

    for candidate in candidates {
        match candidate.status {
            CandidateStatus::Shortlisted => shortlisted += 1,
            CandidateStatus::Pending => pending += 1,
            _ => {}
        }
        score_sum += candidate.ai_score;
        if let Some(cgpa) = candidate.cgpa.filter(|cgpa| *cgpa > 0.0) {
            cgpa_sum += cgpa;
            cgpa_count += 1;
        }
    }

    let total = candidates.len() as u64;
    PipelineStatistics {
        total,
        shortlisted,
        pending,
        average_score: rounded_mean(score_sum, total),
        average_cgpa: rounded_mean(cgpa_sum, cgpa_count),
    }
}

fn rounded_mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_one_decimal(sum / count as f64)
}

/// Half away from zero, one decimal digit.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
