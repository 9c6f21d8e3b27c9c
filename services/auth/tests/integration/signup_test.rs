use papdaew_auth::domain::events::{EMAIL_NOTIFICATIONS_QUEUE, EventType, USER_CREATION_QUEUE};
use papdaew_auth::error::AuthServiceError;
use papdaew_auth::usecase::signup::SignupInput;
use papdaew_domain::permission::{Permission, default_permissions};
use papdaew_domain::user::{AuthProvider, UserRole};

use crate::helpers::{MockUserRepo, RecordingPermissionRepo, RecordingPublisher, signup_usecase};

fn local(email: &str, password: &str) -> SignupInput {
    SignupInput {
        email: email.to_owned(),
        password: Some(password.to_owned()),
        ..Default::default()
    }
}

fn google(email: &str, provider_id: &str) -> SignupInput {
    SignupInput {
        email: email.to_owned(),
        provider: AuthProvider::Google,
        provider_id: Some(provider_id.to_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn should_create_unverified_customer_and_publish_events() {
    let users = MockUserRepo::empty();
    let permissions = RecordingPermissionRepo::default();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &permissions, &events);

    let user = usecase.execute(local("a@b.com", "pw")).await.unwrap();

    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.username, "a");
    assert_eq!(user.role, UserRole::Customer);
    assert_eq!(user.provider, AuthProvider::Local);
    assert!(!user.is_verified);

    let sent = events.sent();
    assert_eq!(sent.len(), 2);

    let (destination, verification) = &sent[0];
    assert_eq!(destination, EMAIL_NOTIFICATIONS_QUEUE);
    assert_eq!(verification.event_type, EventType::EmailNotification);
    assert_eq!(verification.data["type"], "VERIFICATION");
    assert_eq!(verification.data["recipient"], "a@b.com");
    assert_eq!(verification.data["data"]["username"], "a");
    let url = verification.data["data"]["verificationUrl"].as_str().unwrap();
    let token = url
        .strip_prefix("http://localhost:3000/auth/verify-email/")
        .unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    let (destination, created) = &sent[1];
    assert_eq!(destination, USER_CREATION_QUEUE);
    assert_eq!(created.event_type, EventType::UserCreated);
    assert_eq!(created.data["role"], "CUSTOMER");
    assert_eq!(created.data["id"], user.id.to_string());
    assert_eq!(created.data["version"], 1);
}

#[tokio::test]
async fn should_store_only_token_digest_and_password_digest() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &RecordingPermissionRepo::default(), &events);

    let user = usecase.execute(local("a@b.com", "pw")).await.unwrap();
    let stored = users.get(user.id).unwrap();
    let token = events.verification_tokens().pop().unwrap();

    let digest = stored.password_digest.unwrap();
    assert_ne!(digest, "pw");
    assert!(digest.starts_with("$argon2id$"));

    let pending = stored.pending_verification.unwrap();
    assert_ne!(pending.token_digest, token);
    assert_eq!(pending.token_digest.len(), 64);
}

#[tokio::test]
async fn should_never_publish_password_material() {
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(
        &MockUserRepo::empty(),
        &RecordingPermissionRepo::default(),
        &events,
    );

    usecase.execute(local("a@b.com", "hunter2")).await.unwrap();

    for (_, envelope) in events.sent() {
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}

#[tokio::test]
async fn should_reject_duplicate_email_without_writing() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &RecordingPermissionRepo::default(), &events);
    usecase.execute(local("a@b.com", "pw")).await.unwrap();

    let result = usecase.execute(local("A@B.com", "other")).await;

    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
    assert_eq!(users.count(), 1);
    assert_eq!(events.sent().len(), 2);
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let users = MockUserRepo::empty();
    let usecase = signup_usecase(
        &users,
        &RecordingPermissionRepo::default(),
        &RecordingPublisher::default(),
    );
    usecase.execute(local("alice@one.com", "pw")).await.unwrap();

    let result = usecase.execute(local("alice@two.com", "pw")).await;

    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn should_map_insert_race_to_conflict() {
    let users = MockUserRepo::empty();
    let permissions = RecordingPermissionRepo::default();
    let events = RecordingPublisher::default();
    signup_usecase(&users, &permissions, &events)
        .execute(local("a@b.com", "pw"))
        .await
        .unwrap();
    let sent_before = events.sent().len();

    let result = signup_usecase(&users.with_stale_lookup(), &permissions, &events)
        .execute(local("a@b.com", "other"))
        .await;

    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
    assert_eq!(users.count(), 1);
    assert_eq!(events.sent().len(), sent_before);
    assert_eq!(permissions.grants.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_google_signup_colliding_with_other_google_identity() {
    let users = MockUserRepo::empty();
    let usecase = signup_usecase(
        &users,
        &RecordingPermissionRepo::default(),
        &RecordingPublisher::default(),
    );
    usecase.execute(google("john@gmail.com", "g-1")).await.unwrap();

    let same_username = usecase.execute(google("john@other.com", "g-2")).await;
    let same_email = usecase.execute(google("john@gmail.com", "g-2")).await;

    assert!(matches!(same_username, Err(AuthServiceError::UserAlreadyExists)));
    assert!(matches!(same_email, Err(AuthServiceError::UserAlreadyExists)));
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn should_return_existing_google_account_on_repeat_signup() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &RecordingPermissionRepo::default(), &events);

    let first = usecase.execute(google("g@b.com", "google-1")).await.unwrap();
    let second = usecase.execute(google("g@b.com", "google-1")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(users.count(), 1);
    let created = events
        .sent()
        .iter()
        .filter(|(_, e)| e.event_type == EventType::UserCreated)
        .count();
    assert_eq!(created, 1);
}

#[tokio::test]
async fn should_store_google_users_without_password() {
    let users = MockUserRepo::empty();
    let usecase = signup_usecase(
        &users,
        &RecordingPermissionRepo::default(),
        &RecordingPublisher::default(),
    );

    let user = usecase.execute(google("g@b.com", "google-1")).await.unwrap();

    let stored = users.get(user.id).unwrap();
    assert!(stored.password_digest.is_none());
    assert_eq!(stored.provider_id.as_deref(), Some("google-1"));
}

#[tokio::test]
async fn should_reject_local_signup_over_google_account() {
    let users = MockUserRepo::empty();
    let usecase = signup_usecase(
        &users,
        &RecordingPermissionRepo::default(),
        &RecordingPublisher::default(),
    );
    usecase.execute(google("g@b.com", "google-1")).await.unwrap();

    let result = usecase.execute(local("g@b.com", "pw")).await;
    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_reject_missing_password_before_lookup() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &RecordingPermissionRepo::default(), &events);

    let result = usecase
        .execute(SignupInput {
            email: "a@b.com".to_owned(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AuthServiceError::InvalidInput(_))));
    assert_eq!(users.count(), 0);
    assert!(events.sent().is_empty());
}

#[tokio::test]
async fn should_seed_default_permissions_for_role() {
    let permissions = RecordingPermissionRepo::default();
    let usecase = signup_usecase(
        &MockUserRepo::empty(),
        &permissions,
        &RecordingPublisher::default(),
    );

    let vendor = usecase
        .execute(SignupInput {
            role: Some(UserRole::Vendor),
            ..local("v@b.com", "pw")
        })
        .await
        .unwrap();

    let granted = permissions.granted_to(vendor.id);
    assert_eq!(granted, default_permissions(UserRole::Vendor));
    assert!(granted.contains(&Permission::ManageQueues));
    assert!(!granted.contains(&Permission::ManageUsers));
}

#[tokio::test]
async fn should_succeed_when_permission_seeding_fails() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = signup_usecase(&users, &RecordingPermissionRepo::failing(), &events);

    let user = usecase.execute(local("a@b.com", "pw")).await.unwrap();

    assert!(users.get(user.id).is_some());
    assert_eq!(events.sent().len(), 2);
}

#[tokio::test]
async fn should_keep_user_when_publish_fails() {
    let users = MockUserRepo::empty();
    let usecase = signup_usecase(
        &users,
        &RecordingPermissionRepo::default(),
        &RecordingPublisher::failing(),
    );

    let result = usecase.execute(local("a@b.com", "pw")).await;

    assert!(matches!(result, Err(AuthServiceError::Internal(_))));
    assert_eq!(users.count(), 1);
}
