pub mod analytics_service;
pub mod auth_service;
pub mod candidate_service;
pub mod referral_service;
pub mod status_service;
