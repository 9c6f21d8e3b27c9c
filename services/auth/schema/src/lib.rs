//! sea-orm entities for the auth service database.

pub mod outbox_events;
pub mod user_permissions;
pub mod users;
