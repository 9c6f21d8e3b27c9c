use papdaew_domain::user::AuthProvider;

use crate::domain::repository::UserRepository;
use crate::domain::types::PublicUser;
use crate::error::AuthServiceError;
use crate::security::password::CredentialHasher;

pub struct LoginInput {
    /// Email (matched case-insensitively) or username.
    pub identifier: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub hasher: CredentialHasher,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<PublicUser, AuthServiceError> {
        let identifier = input.identifier.trim();
        let credentials = self
            .users
            .find_credentials(&identifier.to_lowercase(), identifier)
            .await?
            .ok_or_else(|| {
                tracing::info!("login rejected: unknown identifier");
                AuthServiceError::InvalidCredentials
            })?;

        match credentials.provider {
            AuthProvider::Google => {
                tracing::info!(user_id = %credentials.id, "login rejected: google-linked account");
                return Err(AuthServiceError::GoogleLinkedAccount);
            }
            AuthProvider::Local => {
                let digest = credentials
                    .password_digest
                    .as_deref()
                    .ok_or(AuthServiceError::InvalidCredentials)?;
                if !self.hasher.verify(&input.password, digest).await? {
                    tracing::info!(user_id = %credentials.id, "login rejected: password mismatch");
                    return Err(AuthServiceError::InvalidCredentials);
                }
            }
        }

        let user = self
            .users
            .find_by_id(credentials.id)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        Ok(user.into_public())
    }
}
