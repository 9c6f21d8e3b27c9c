use papdaew_auth::domain::types::GoogleProfile;
use papdaew_auth::error::AuthServiceError;
use papdaew_auth::usecase::google::GoogleSignInUseCase;
use papdaew_auth::usecase::signup::SignupInput;
use papdaew_auth::usecase::user::GetUserUseCase;
use papdaew_domain::user::AuthProvider;

use crate::helpers::{MockUserRepo, RecordingPermissionRepo, RecordingPublisher, signup_usecase};

fn google_sign_in(
    users: &MockUserRepo,
    events: &RecordingPublisher,
) -> GoogleSignInUseCase<MockUserRepo, RecordingPermissionRepo, RecordingPublisher> {
    GoogleSignInUseCase {
        signup: signup_usecase(users, &RecordingPermissionRepo::default(), events),
    }
}

fn profile(email: &str) -> GoogleProfile {
    google_profile(email, "google-42")
}

fn google_profile(email: &str, provider_id: &str) -> GoogleProfile {
    GoogleProfile {
        email: email.to_owned(),
        provider_id: provider_id.to_owned(),
    }
}

#[tokio::test]
async fn should_register_new_google_user() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();

    let user = google_sign_in(&users, &events)
        .execute(profile("g@b.com"))
        .await
        .unwrap();

    assert_eq!(user.provider, AuthProvider::Google);
    assert_eq!(user.provider_id.as_deref(), Some("google-42"));
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn should_return_same_account_on_repeat_sign_in() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = google_sign_in(&users, &events);

    let first = usecase.execute(profile("g@b.com")).await.unwrap();
    let second = usecase.execute(profile("G@b.com")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn should_fall_back_to_existing_local_account() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let local = signup_usecase(&users, &RecordingPermissionRepo::default(), &events)
        .execute(SignupInput {
            email: "a@b.com".to_owned(),
            password: Some("pw".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap();

    let user = google_sign_in(&users, &events)
        .execute(profile("a@b.com"))
        .await
        .unwrap();

    assert_eq!(user.id, local.id);
    assert_eq!(user.provider, AuthProvider::Local);
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn should_propagate_conflict_when_only_username_collides() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    signup_usecase(&users, &RecordingPermissionRepo::default(), &events)
        .execute(SignupInput {
            email: "sam@one.com".to_owned(),
            password: Some("pw".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap();

    let result = google_sign_in(&users, &events)
        .execute(profile("sam@two.com"))
        .await;

    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_not_hand_one_google_account_to_another() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = google_sign_in(&users, &events);

    let first = usecase
        .execute(google_profile("john@gmail.com", "g-1"))
        .await
        .unwrap();
    let second = usecase
        .execute(google_profile("john@other.com", "g-2"))
        .await;

    assert!(matches!(second, Err(AuthServiceError::UserAlreadyExists)));
    assert_eq!(users.count(), 1);
    assert_eq!(users.get(first.id).unwrap().provider_id.as_deref(), Some("g-1"));
}

#[tokio::test]
async fn should_reject_other_google_subject_with_same_email() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let usecase = google_sign_in(&users, &events);
    usecase
        .execute(google_profile("john@gmail.com", "g-1"))
        .await
        .unwrap();

    let result = usecase
        .execute(google_profile("john@gmail.com", "g-2"))
        .await;

    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_fall_back_to_existing_account_after_insert_race() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let first = google_sign_in(&users, &events)
        .execute(profile("g@b.com"))
        .await
        .unwrap();
    let sent_before = events.sent().len();

    let second = google_sign_in(&users.with_stale_lookup(), &events)
        .execute(profile("g@b.com"))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(users.count(), 1);
    assert_eq!(events.sent().len(), sent_before);
}

// ── GetUserUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_load_current_user_by_id() {
    let users = MockUserRepo::empty();
    let events = RecordingPublisher::default();
    let created = google_sign_in(&users, &events)
        .execute(profile("g@b.com"))
        .await
        .unwrap();

    let usecase = GetUserUseCase {
        users: users.clone(),
    };
    let user = usecase.execute(created.id).await.unwrap();
    assert_eq!(user.email, "g@b.com");

    let missing = usecase.execute(uuid::Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AuthServiceError::UserNotFound)));
}
