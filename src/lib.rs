pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::repository::{CandidateRepository, ReferralRepository, UserRepository};
use crate::services::{
    analytics_service::AnalyticsService, auth_service::AuthService,
    candidate_service::CandidateService, referral_service::ReferralService,
    status_service::StatusService,
};
use crate::utils::credentials::CredentialService;

/// Per-process handles shared by every request. Built once from an explicit
/// store; nothing here is global.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
    pub candidate_service: CandidateService,
    pub status_service: StatusService,
    pub analytics_service: AnalyticsService,
    pub referral_service: ReferralService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, credentials: CredentialService) -> Self
    where
        S: CandidateRepository + ReferralRepository + UserRepository + 'static,
    {
        let candidates: Arc<dyn CandidateRepository> = store.clone();
        let referrals: Arc<dyn ReferralRepository> = store.clone();
        let users: Arc<dyn UserRepository> = store;

        Self {
            candidate_service: CandidateService::new(candidates.clone()),
            status_service: StatusService::new(candidates.clone()),
            analytics_service: AnalyticsService::new(candidates.clone()),
            referral_service: ReferralService::new(referrals, candidates),
            auth_service: AuthService::new(users, credentials.clone()),
            credentials,
        }
    }
}
