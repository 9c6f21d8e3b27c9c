use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use papdaew_core::health::healthz;
use papdaew_core::middleware::{propagate_request_id_layer, request_id_layer, request_span};

use crate::handlers::{
    auth::{login, logout, resend_verification, signup, verify_email},
    health::readyz,
    token::check_token,
    user::me,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Credentials
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        // Email verification
        .route("/auth/verify-email/{token}", get(verify_email))
        .route(
            "/auth/resend-verification-email",
            post(resend_verification),
        )
        // Session
        .route("/auth/token", get(check_token))
        .route("/auth/me", get(me))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
