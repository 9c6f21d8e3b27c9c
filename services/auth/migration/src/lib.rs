pub use sea_orm_migration::prelude::*;

mod m20241102_000001_create_users;
mod m20241102_000002_create_user_permissions;
mod m20241102_000003_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241102_000001_create_users::Migration),
            Box::new(m20241102_000002_create_user_permissions::Migration),
            Box::new(m20241102_000003_create_outbox_events::Migration),
        ]
    }
}
