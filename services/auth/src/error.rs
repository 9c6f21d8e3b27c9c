use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// Every variant belongs to exactly one client-facing class (see [`ErrorClass`]); the HTTP
/// status follows from the class.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("This account is linked to Google, please login with Google")]
    GoogleLinkedAccount,
    #[error("Verification token has expired. Please request a new one.")]
    VerificationTokenExpired,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid verification token")]
    InvalidVerificationToken,
    #[error("User not found")]
    UserNotFound,
    #[error("invalid token")]
    InvalidToken,
    #[error("event payload rejected by schema")]
    InvalidEvent(#[from] validator::ValidationErrors),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// Coarse error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Conflict,
    BadRequest,
    NotFound,
    Unauthorized,
    Internal,
}

impl AuthServiceError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UserAlreadyExists => ErrorClass::Conflict,
            Self::InvalidCredentials
            | Self::GoogleLinkedAccount
            | Self::VerificationTokenExpired
            | Self::AlreadyVerified
            | Self::InvalidInput(_) => ErrorClass::BadRequest,
            Self::InvalidVerificationToken | Self::UserNotFound => ErrorClass::NotFound,
            Self::InvalidToken => ErrorClass::Unauthorized,
            Self::InvalidEvent(_) | Self::Internal(_) => ErrorClass::Internal,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::GoogleLinkedAccount => "GOOGLE_LINKED_ACCOUNT",
            Self::VerificationTokenExpired => "VERIFICATION_TOKEN_EXPIRED",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidVerificationToken => "INVALID_VERIFICATION_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidEvent(_) | Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.class() {
            ErrorClass::Conflict => StatusCode::CONFLICT,
            ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only 500s log their cause here.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::InvalidEvent(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "event schema violation")
            }
            _ => {}
        }
        let message = match self.class() {
            ErrorClass::Internal => "internal error".to_owned(),
            _ => self.to_string(),
        };
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}
