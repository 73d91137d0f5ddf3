use crate::database::repository::{CandidateRepository, ReferralRepository, UserRepository};
use crate::database::{StoreError, StoreResult};
use crate::error::{Error, Result};
use crate::models::candidate::{CandidateStatus, NewCandidate};
use crate::models::referral::NewReferral;
use crate::models::user::{NewUser, UserRole};
use crate::utils::credentials::CredentialService;

pub const DEMO_USER_EMAIL: &str = "recruiter@company.com";
pub const DEMO_USER_PASSWORD: &str = "demo123";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub candidates: usize,
    pub referrals: usize,
    pub users: usize,
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_candidates() -> Vec<NewCandidate> {
    vec![
        NewCandidate {
            name: "Rahul Sharma".into(),
            email: "rahul.sharma@example.com".into(),
            phone: Some("+91-9876543210".into()),
            college: Some("IIT Delhi".into()),
            degree: Some("B.Tech Computer Science".into()),
            graduation_year: Some(2025),
            cgpa: Some(8.7),
            skills: list(&["React", "Node.js", "Python", "MongoDB", "Docker"]),
            projects: list(&["E-commerce Platform", "ML Chatbot"]),
            experience: list(&["SDE Intern at Flipkart - 3 months"]),
            resume_path: None,
            ai_score: 92.0,
            status: CandidateStatus::Shortlisted,
            referred_by: Some("Amit Kumar".into()),
        },
        NewCandidate {
            name: "Priya Patel".into(),
            email: "priya.patel@example.com".into(),
            phone: Some("+91-9876543211".into()),
            college: Some("BITS Pilani".into()),
            degree: Some("B.Tech Electronics".into()),
            graduation_year: Some(2025),
            cgpa: Some(9.1),
            skills: list(&["JavaScript", "React", "TypeScript", "PostgreSQL", "AWS"]),
            projects: list(&["Social Analytics Dashboard", "IoT Automation"]),
            experience: list(&["Frontend Intern at Zomato - 6 months"]),
            resume_path: None,
            ai_score: 95.0,
            status: CandidateStatus::Shortlisted,
            referred_by: Some("Sneha Reddy".into()),
        },
        NewCandidate {
            name: "Arjun Mehta".into(),
            email: "arjun.mehta@example.com".into(),
            phone: Some("+91-9876543212".into()),
            college: Some("NIT Trichy".into()),
            degree: Some("B.Tech Computer Science".into()),
            graduation_year: Some(2025),
            cgpa: Some(7.8),
            skills: list(&["Java", "Spring Boot", "MySQL", "Git"]),
            projects: list(&["Library Management System"]),
            experience: Vec::new(),
            resume_path: None,
            ai_score: 78.0,
            status: CandidateStatus::Pending,
            referred_by: None,
        },
    ]
}

pub fn demo_referrals() -> Vec<NewReferral> {
    vec![
        NewReferral {
            referrer_name: "Amit Kumar".into(),
            referrer_email: Some("amit.kumar@company.com".into()),
            total_referrals: 5,
            successful_hires: 2,
            conversion_rate: 0.4,
        },
        NewReferral {
            referrer_name: "Sneha Reddy".into(),
            referrer_email: Some("sneha.reddy@company.com".into()),
            total_referrals: 3,
            successful_hires: 2,
            conversion_rate: 0.67,
        },
    ]
}

/// `Ok(true)` when inserted, `Ok(false)` when the row already existed.
fn inserted<T>(result: StoreResult<T>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(StoreError::Conflict(_)) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Loads the demo data set. Rows whose unique key already exists are skipped,
/// so running it twice is harmless.
pub async fn seed_demo_data<S>(store: &S, credentials: &CredentialService) -> Result<SeedReport>
where
    S: CandidateRepository + ReferralRepository + UserRepository,
{
    let mut report = SeedReport::default();

    for candidate in demo_candidates() {
        if inserted(store.insert_candidate(candidate).await)? {
            report.candidates += 1;
        }
    }
    for referral in demo_referrals() {
        if inserted(store.insert_referral(referral).await)? {
            report.referrals += 1;
        }
    }

    let password_hash = credentials
        .hash_password(DEMO_USER_PASSWORD)
        .map_err(|e| Error::Internal(format!("Failed to hash demo password: {}", e)))?;
    let demo_user = NewUser {
        email: DEMO_USER_EMAIL.into(),
        password_hash,
        name: "Demo Recruiter".into(),
        role: UserRole::Admin,
    };
    if inserted(store.insert_user(demo_user).await)? {
        report.users += 1;
    }

    tracing::info!(
        candidates = report.candidates,
        referrals = report.referrals,
        users = report.users,
        "demo data seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use chrono::Duration;

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let store = MemoryStore::new();
        let credentials = CredentialService::new("secret", Duration::hours(1));

        let first = seed_demo_data(&store, &credentials).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                candidates: 3,
                referrals: 2,
                users: 1
            }
        );

        let second = seed_demo_data(&store, &credentials).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(store.list_referrals().await.unwrap().len(), 2);
    }
}
