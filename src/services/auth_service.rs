use std::sync::Arc;

use crate::database::repository::UserRepository;
use crate::dto::auth_dto::{LoginPayload, LoginResponse, UserSummary};
use crate::error::{Error, Result};
use crate::utils::credentials::CredentialService;

/// Turns an email/password pair into a session token. Unknown users and
/// wrong passwords fail identically.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    credentials: CredentialService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, credentials: CredentialService) -> Self {
        Self { users, credentials }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse> {
        let email = payload
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());
        let password = payload.password.as_deref().filter(|p| !p.is_empty());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(Error::MissingCredentials);
        };

        let Some(user) = self.users.find_user_by_email(email).await? else {
            tracing::info!("login rejected: unknown email");
            return Err(Error::InvalidCredentials);
        };
        if !self.credentials.verify_password(&user.password_hash, password) {
            tracing::info!(user_id = user.id, "login rejected: password mismatch");
            return Err(Error::InvalidCredentials);
        }

        let issued = self.credentials.issue_token(&user)?;
        tracing::info!(user_id = user.id, expires_at = %issued.expires_at, "session issued");

        Ok(LoginResponse {
            token: issued.token,
            user: UserSummary::from(&user),
        })
    }
}
