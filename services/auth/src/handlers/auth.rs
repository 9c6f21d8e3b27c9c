use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use papdaew_auth_types::{
    cookie::{clear_session_cookie, set_session_cookie},
    token::issue_session_token,
};

use crate::domain::types::PublicUser;
use crate::error::AuthServiceError;
use crate::handlers::validate_body;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::signup::{SignupInput, SignupUseCase};
use crate::usecase::verification::{ResendVerificationUseCase, VerifyEmailUseCase};

const SUCCESS: &str = "success";

#[derive(Serialize)]
pub struct SessionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub token: String,
    pub data: PublicUser,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Sign a session token for `user` and attach it as the session cookie.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: &PublicUser,
) -> Result<(CookieJar, String), AuthServiceError> {
    let session = issue_session_token(
        user.id,
        user.role,
        &state.jwt_secret,
        state.session_ttl_secs,
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    let jar = set_session_cookie(jar, session.token.clone(), state.secure_cookies);
    Ok((jar, session.token))
}

// ── POST /auth/signup ─────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    validate_body(&body)?;

    let usecase = SignupUseCase {
        users: state.user_repo(),
        permissions: state.permission_repo(),
        events: state.event_publisher(),
        hasher: state.hasher.clone(),
        api_url: state.api_url.clone(),
    };

    let user = usecase
        .execute(SignupInput {
            email: body.email,
            username: body.username,
            password: Some(body.password),
            ..Default::default()
        })
        .await?;

    let (jar, token) = start_session(&state, jar, &user)?;
    let body = SessionResponse {
        status: SUCCESS,
        message: "User registered successfully",
        token,
        data: user,
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    validate_body(&body)?;

    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
    };

    let user = usecase
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
        })
        .await?;

    let (jar, token) = start_session(&state, jar, &user)?;
    let body = SessionResponse {
        status: SUCCESS,
        message: "User logged in successfully",
        token,
        data: user,
    };
    Ok((StatusCode::OK, jar, Json(body)))
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let body = MessageResponse {
        status: SUCCESS,
        message: "User logged out successfully",
    };
    (StatusCode::OK, clear_session_cookie(jar), Json(body))
}

// ── GET /auth/verify-email/{token} ────────────────────────────────────────────

pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&token).await?;

    Ok(Json(MessageResponse {
        status: SUCCESS,
        message: "Email verified successfully",
    }))
}

// ── POST /auth/resend-verification-email ──────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

pub async fn resend_verification(
    State(state): State<AppState>,
    Json(body): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    validate_body(&body)?;

    let usecase = ResendVerificationUseCase {
        users: state.user_repo(),
        events: state.event_publisher(),
        api_url: state.api_url.clone(),
    };
    let out = usecase.execute(&body.email).await?;

    Ok(Json(MessageResponse {
        status: SUCCESS,
        message: out.message,
    }))
}
