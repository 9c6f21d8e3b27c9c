use chrono::Utc;

use crate::domain::events::{EMAIL_NOTIFICATIONS_QUEUE, EmailNotificationEvent, verification_url};
use crate::domain::repository::{EventPublisher, UserRepository};
use crate::domain::types::{PublicUser, UserChanges};
use crate::error::AuthServiceError;
use crate::security::verification_token::{VerificationToken, digest_token};
use crate::usecase::publish::publish_direct;

pub const RESEND_SUCCESS_MESSAGE: &str = "Verification email resent successfully";

// ── VerifyEmail ───────────────────────────────────────────────────────────────

pub struct VerifyEmailUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> VerifyEmailUseCase<U> {
    /// Consume `token`: on success the account is verified and the token can never match again.
    pub async fn execute(&self, token: &str) -> Result<PublicUser, AuthServiceError> {
        let digest = digest_token(token);
        let now = Utc::now();

        let Some(user) = self
            .users
            .find_by_verification_digest(&digest, Some(now))
            .await?
        else {
            return match self.users.find_by_verification_digest(&digest, None).await? {
                Some(user) => {
                    tracing::info!(user_id = %user.id, "verification rejected: token expired");
                    Err(AuthServiceError::VerificationTokenExpired)
                }
                None => {
                    tracing::info!("verification rejected: unknown token");
                    Err(AuthServiceError::InvalidVerificationToken)
                }
            };
        };

        let user = self
            .users
            .update(user.id, &UserChanges::mark_verified())
            .await?;
        tracing::info!(user_id = %user.id, "email verified");
        Ok(user.into_public())
    }
}

// ── ResendVerification ────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ResendVerificationOutput {
    pub message: &'static str,
}

pub struct ResendVerificationUseCase<U: UserRepository, E: EventPublisher> {
    pub users: U,
    pub events: E,
    pub api_url: String,
}

impl<U: UserRepository, E: EventPublisher> ResendVerificationUseCase<U, E> {
    pub async fn execute(&self, email: &str) -> Result<ResendVerificationOutput, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if user.is_verified {
            return Err(AuthServiceError::AlreadyVerified);
        }

        let token = VerificationToken::generate();
        let user = self
            .users
            .update(
                user.id,
                &UserChanges::replace_verification(token.pending(Utc::now())),
            )
            .await?;

        let event = EmailNotificationEvent::verification(
            &user.email,
            &user.username,
            verification_url(&self.api_url, &token.plaintext),
        );
        publish_direct(
            &self.events,
            EMAIL_NOTIFICATIONS_QUEUE,
            &event,
            RESEND_SUCCESS_MESSAGE,
        )
        .await?;

        Ok(ResendVerificationOutput {
            message: RESEND_SUCCESS_MESSAGE,
        })
    }
}
