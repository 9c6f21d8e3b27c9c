use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::PublicUser;
use crate::error::AuthServiceError;

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: Uuid) -> Result<PublicUser, AuthServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .map(|user| user.into_public())
            .ok_or(AuthServiceError::UserNotFound)
    }
}
