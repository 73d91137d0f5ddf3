use std::sync::Arc;

use crate::database::repository::{CandidateRepository, ReferralRepository};
use crate::dto::analytics_dto::{NetworkLink, NetworkNode, ReferralNetwork};
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::referral::Referral;

pub const CANDIDATE_NODE_PREFIX: &str = "candidate_";

#[derive(Clone)]
pub struct ReferralService {
    referrals: Arc<dyn ReferralRepository>,
    candidates: Arc<dyn CandidateRepository>,
}

impl ReferralService {
    pub fn new(
        referrals: Arc<dyn ReferralRepository>,
        candidates: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            referrals,
            candidates,
        }
    }

    /// Two independent reads; no cross-table snapshot is taken.
    pub async fn network(&self) -> Result<ReferralNetwork> {
        let referrals = self.referrals.list_referrals().await?;
        let candidates = self.candidates.list_candidates_with_referrer().await?;
        Ok(build_network(&referrals, &candidates))
    }
}

pub fn candidate_node_id(candidate_id: i64) -> String {
    format!("{CANDIDATE_NODE_PREFIX}{candidate_id}")
}

/// Projects referral and candidate rows onto a node/link graph: referrer
/// nodes first, then one candidate node and one link per referred
/// candidate. Links to referrers without a row are kept.
pub fn build_network(referrals: &[Referral], candidates: &[Candidate]) -> ReferralNetwork {
    let mut nodes = Vec::with_capacity(referrals.len() + candidates.len());
    let mut links = Vec::with_capacity(candidates.len());

    nodes.extend(referrals.iter().map(|referral| NetworkNode::Referrer {
        id: referral.referrer_name.clone(),
        email: referral.referrer_email.clone(),
        total_referrals: referral.total_referrals,
        successful_hires: referral.successful_hires,
        conversion_rate: referral.conversion_rate,
        value: referral.conversion_rate * 100.0,
    }));

    for candidate in candidates {
        let Some(referrer) = candidate.referred_by.as_ref() else {
            continue;
        };
        let node_id = candidate_node_id(candidate.id);
        nodes.push(NetworkNode::Candidate {
            id: node_id.clone(),
            name: candidate.name.clone(),
            status: candidate.status,
            score: candidate.ai_score,
        });
        links.push(NetworkLink {
            source: referrer.clone(),
            target: node_id,
            value: candidate.ai_score,
        });
    }

    ReferralNetwork { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;
    use chrono::Utc;
    use std::collections::HashSet;

    fn referral(id: i64, name: &str, total: i32, hires: i32, rate: f64) -> Referral {
        Referral {
            id,
            referrer_name: name.to_string(),
            referrer_email: Some(format!("{}@company.com", name.to_lowercase().replace(' ', "."))),
            total_referrals: total,
            successful_hires: hires,
            conversion_rate: rate,
            created_at: Utc::now(),
        }
    }

    fn candidate(id: i64, referred_by: Option<&str>, ai_score: f64) -> Candidate {
        let now = Utc::now();
        Candidate {
            id,
            name: format!("Candidate {id}"),
            email: format!("c{id}@example.com"),
            phone: None,
            college: None,
            degree: None,
            graduation_year: None,
            cgpa: None,
            skills: vec![],
            projects: vec![],
            experience: vec![],
            resume_path: None,
            ai_score,
            status: CandidateStatus::Shortlisted,
            referred_by: referred_by.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn referrers_first_then_candidate_pairs() {
        let network = build_network(
            &[
                referral(1, "Amit Kumar", 5, 2, 0.4),
                referral(2, "Sneha Reddy", 3, 2, 0.67),
            ],
            &[
                candidate(1, Some("Amit Kumar"), 92.0),
                candidate(2, Some("Sneha Reddy"), 95.0),
            ],
        );

        let ids: Vec<&str> = network.nodes.iter().map(NetworkNode::id).collect();
        assert_eq!(ids, vec!["Amit Kumar", "Sneha Reddy", "candidate_1", "candidate_2"]);
        assert_eq!(
            network.links,
            vec![
                NetworkLink {
                    source: "Amit Kumar".into(),
                    target: "candidate_1".into(),
                    value: 92.0,
                },
                NetworkLink {
                    source: "Sneha Reddy".into(),
                    target: "candidate_2".into(),
                    value: 95.0,
                },
            ]
        );
    }

    #[test]
    fn referrer_counters_are_reported_as_stored() {
        // 2 / 5 is 0.4, but the stored rate wins.
        let network = build_network(&[referral(1, "Amit Kumar", 5, 2, 0.25)], &[]);
        match &network.nodes[0] {
            NetworkNode::Referrer {
                conversion_rate,
                value,
                total_referrals,
                successful_hires,
                ..
            } => {
                assert_eq!(*conversion_rate, 0.25);
                assert_eq!(*value, 25.0);
                assert_eq!((*total_referrals, *successful_hires), (5, 2));
            }
            other => panic!("expected referrer node, got {other:?}"),
        }
    }

    #[test]
    fn dangling_links_are_kept() {
        let network = build_network(
            &[referral(1, "Amit Kumar", 1, 0, 0.0)],
            &[candidate(9, Some("Nobody Known"), 60.0)],
        );
        let node_ids: HashSet<&str> = network.nodes.iter().map(NetworkNode::id).collect();
        assert_eq!(network.links.len(), 1);
        assert_eq!(network.links[0].source, "Nobody Known");
        assert!(!node_ids.contains(network.links[0].source.as_str()));
        assert!(node_ids.contains(network.links[0].target.as_str()));
    }

    #[test]
    fn unreferred_candidates_are_skipped() {
        let network = build_network(&[], &[candidate(1, None, 50.0)]);
        assert!(network.nodes.is_empty());
        assert!(network.links.is_empty());
    }

    #[test]
    fn prefix_keeps_node_ids_unique() {
        // A referrer literally named like a candidate id still cannot collide.
        let network = build_network(
            &[referral(1, "1", 1, 0, 0.0)],
            &[candidate(1, Some("1"), 10.0)],
        );
        let ids: HashSet<&str> = network.nodes.iter().map(NetworkNode::id).collect();
        assert_eq!(ids.len(), network.nodes.len());
    }

    #[test]
    fn nodes_serialize_with_type_tag() {
        let network = build_network(
            &[referral(1, "Amit Kumar", 5, 2, 0.4)],
            &[candidate(3, Some("Amit Kumar"), 92.0)],
        );
        let value = serde_json::to_value(&network).unwrap();
        assert_eq!(value["nodes"][0]["type"], "referrer");
        assert_eq!(value["nodes"][0]["totalReferrals"], 5);
        assert_eq!(value["nodes"][0]["conversionRate"], 0.4);
        assert_eq!(value["nodes"][1]["type"], "candidate");
        assert_eq!(value["nodes"][1]["id"], "candidate_3");
        assert_eq!(value["nodes"][1]["status"], "shortlisted");
        assert_eq!(value["nodes"][1]["score"], 92.0);
        assert_eq!(value["links"][0]["source"], "Amit Kumar");
    }
}
