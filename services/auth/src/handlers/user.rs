use axum::{Json, extract::State, response::IntoResponse};

use papdaew_auth_types::identity::IdentityHeaders;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::user::GetUserUseCase;

// ── GET /auth/me ──────────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    identity: IdentityHeaders,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user))
}
