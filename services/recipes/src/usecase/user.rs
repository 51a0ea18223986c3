use uuid::Uuid;

use pantry_domain::id::UserId;
use pantry_domain::pagination::PageRequest;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, validate_username};
use crate::error::RecipesServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    /// Id assigned by the identity service. A fresh v7 id is used when absent.
    pub id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, RecipesServiceError> {
        if !validate_username(&input.username) {
            return Err(RecipesServiceError::InvalidUsername);
        }
        if !input.email.contains('@')
            || input.first_name.trim().is_empty()
            || input.last_name.trim().is_empty()
        {
            return Err(RecipesServiceError::MissingData);
        }
        let user = NewUser {
            id: UserId(input.id.unwrap_or_else(Uuid::now_v7)),
            email: input.email,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        let created = self.repo.create(&user).await?;
        tracing::info!(user_id = %created.id, "user created");
        Ok(created)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, RecipesServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        self.repo.list(page.clamped()).await
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListSubscriptionsUseCase<R> {
    pub async fn execute(
        &self,
        follower: UserId,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        self.repo.list_followed(follower, page.clamped()).await
    }
}
