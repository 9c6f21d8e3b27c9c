use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use papdaew_auth_types::{
    cookie::SESSION_COOKIE,
    token::{bearer_token, validate_session_token},
};
use papdaew_domain::user::UserRole;

use crate::error::AuthServiceError;
use crate::state::AppState;

// ── GET /auth/token ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub id: uuid::Uuid,
    pub role: UserRole,
    pub exp: u64,
}

/// Validate the session token from the `token` cookie, falling back to `Authorization: Bearer`.
pub async fn check_token(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthServiceError> {
    let token_value = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
        .or_else(|| bearer_token(&headers).map(str::to_owned))
        .ok_or(AuthServiceError::InvalidToken)?;

    let info = validate_session_token(&token_value, &state.jwt_secret)
        .map_err(|_| AuthServiceError::InvalidToken)?;

    let body = CheckTokenResponse {
        id: info.user_id,
        role: info.role,
        exp: info.expires_at,
    };
    Ok((StatusCode::OK, Json(body)))
}
