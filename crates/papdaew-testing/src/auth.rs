//! Mock identity helpers for HTTP tests.
//!
//! Services behind the gateway receive `x-user-id` + `x-user-role` headers once the gateway
//! has validated the session token. `MockAuth` produces those headers directly so tests need
//! no gateway or JWT.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use papdaew_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use papdaew_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A customer with a fresh random id.
    pub fn customer() -> Self {
        Self::new(Uuid::new_v4(), UserRole::Customer)
    }

    /// Header pairs as the gateway would inject them.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from_static(self.role.as_str()),
            ),
        ]
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        self.header_pairs().into_iter().collect()
    }
}
