pub mod credentials;
pub mod time;
