pub mod candidate;
pub mod referral;
pub mod user;
