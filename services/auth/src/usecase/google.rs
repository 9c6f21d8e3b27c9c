use papdaew_domain::user::AuthProvider;

use crate::domain::repository::{EventPublisher, PermissionRepository, UserRepository};
use crate::domain::types::{GoogleProfile, PublicUser};
use crate::error::AuthServiceError;
use crate::usecase::signup::{SignupInput, SignupUseCase};

/// Sign in with a profile from a completed Google OAuth handshake.
///
/// First sight of a profile registers it; a repeat with the same provider id returns the same
/// account. If the email already belongs to a local account, that account is returned. A
/// collision with a different Google identity is a conflict.
pub struct GoogleSignInUseCase<U, P, E>
where
    U: UserRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    pub signup: SignupUseCase<U, P, E>,
}

impl<U, P, E> GoogleSignInUseCase<U, P, E>
where
    U: UserRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    pub async fn execute(&self, profile: GoogleProfile) -> Result<PublicUser, AuthServiceError> {
        let input = SignupInput {
            email: profile.email,
            provider: AuthProvider::Google,
            provider_id: Some(profile.provider_id),
            ..Default::default()
        };
        let email = input.email.trim().to_lowercase();
        let provider_id = input.provider_id.clone();

        match self.signup.execute(input).await {
            Err(AuthServiceError::UserAlreadyExists) => {
                let user = self
                    .signup
                    .users
                    .find_by_email(&email)
                    .await?
                    .ok_or(AuthServiceError::UserAlreadyExists)?;
                // Another Google subject owns this email.
                if user.provider == AuthProvider::Google && user.provider_id != provider_id {
                    tracing::warn!(user_id = %user.id, "google sign-in rejected: provider id mismatch");
                    return Err(AuthServiceError::UserAlreadyExists);
                }
                tracing::info!(user_id = %user.id, "google sign-in matched existing account");
                Ok(user.into_public())
            }
            other => other,
        }
    }
}
