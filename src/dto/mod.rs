pub mod analytics_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod envelope;
