use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, RuntimeErr, sqlx,
};
use uuid::Uuid;

use papdaew_auth_schema::{user_permissions, users};
use papdaew_domain::permission::Permission;
use papdaew_domain::user::{AuthProvider, UserRole};

use crate::domain::repository::{PermissionRepository, UserRepository};
use crate::domain::types::{NewUser, PendingVerification, StoredCredentials, User, UserChanges};
use crate::error::AuthServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn email_or_username(email: &str, username: &str) -> Condition {
    Condition::any()
        .add(users::Column::Email.eq(email))
        .add(users::Column::Username.eq(username))
}

impl UserRepository for DbUserRepository {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(email_or_username(email, username))
            .one(&self.db)
            .await
            .context("find user by email or username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_credentials(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AuthServiceError> {
        let row = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .column(users::Column::PasswordDigest)
            .column(users::Column::Provider)
            .filter(email_or_username(email, username))
            .into_tuple::<(Uuid, Option<String>, String)>()
            .one(&self.db)
            .await
            .context("find user credentials")?;

        row.map(|(id, password_digest, provider)| {
            Ok(StoredCredentials {
                id,
                password_digest,
                provider: parse_provider(id, &provider)?,
            })
        })
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_verification_digest(
        &self,
        digest: &str,
        valid_at: Option<DateTime<Utc>>,
    ) -> Result<Option<User>, AuthServiceError> {
        let mut query =
            users::Entity::find().filter(users::Column::VerificationTokenDigest.eq(digest));
        if let Some(now) = valid_at {
            query = query.filter(users::Column::VerificationTokenExpiresAt.gt(now));
        }
        let model = query
            .one(&self.db)
            .await
            .context("find user by verification digest")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, AuthServiceError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            password_digest: Set(user.password_digest.clone()),
            role: Set(user.role.as_str().to_owned()),
            provider: Set(user.provider.as_str().to_owned()),
            provider_id: Set(user.provider_id.clone()),
            is_verified: Set(false),
            verification_token_digest: Set(Some(user.pending_verification.token_digest.clone())),
            verification_token_expires_at: Set(Some(user.pending_verification.expires_at)),
            created_at: Set(user.created_at),
            updated_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthServiceError::UserAlreadyExists
            } else {
                anyhow::Error::new(e).context("create user").into()
            }
        })?;
        user_from_model(model)
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, AuthServiceError> {
        let mut active = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(is_verified) = changes.is_verified {
            active.is_verified = Set(is_verified);
        }
        if let Some(pending) = &changes.pending_verification {
            active.verification_token_digest = Set(pending.as_ref().map(|p| p.token_digest.clone()));
            active.verification_token_expires_at = Set(pending.as_ref().map(|p| p.expires_at));
        }

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AuthServiceError::UserNotFound,
            e => anyhow::Error::new(e).context("update user").into(),
        })?;
        user_from_model(model)
    }
}

/// A concurrent insert won the race for the same email or username.
fn is_unique_violation(e: &DbErr) -> bool {
    match e {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db))) => {
            db.is_unique_violation()
        }
        _ => false,
    }
}

fn parse_provider(id: Uuid, raw: &str) -> Result<AuthProvider, AuthServiceError> {
    Ok(raw
        .parse::<AuthProvider>()
        .with_context(|| format!("user {id} has unreadable provider"))?)
}

fn user_from_model(model: users::Model) -> Result<User, AuthServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has unreadable role", model.id))?;
    let provider = parse_provider(model.id, &model.provider)?;
    let pending_verification = match (
        model.verification_token_digest,
        model.verification_token_expires_at,
    ) {
        (Some(token_digest), Some(expires_at)) => Some(PendingVerification {
            token_digest,
            expires_at,
        }),
        _ => None,
    };

    Ok(User {
        id: model.id,
        email: model.email,
        username: model.username,
        password_digest: model.password_digest,
        role,
        provider,
        provider_id: model.provider_id,
        is_verified: model.is_verified,
        pending_verification,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Permission repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn grant(
        &self,
        user_id: Uuid,
        permissions: &[Permission],
    ) -> Result<(), AuthServiceError> {
        if permissions.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let rows = permissions.iter().map(|p| user_permissions::ActiveModel {
            user_id: Set(user_id),
            permission: Set(p.as_str().to_owned()),
            granted_at: Set(now),
        });

        user_permissions::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    user_permissions::Column::UserId,
                    user_permissions::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .context("grant default permissions")?;
        Ok(())
    }
}
