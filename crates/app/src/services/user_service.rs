//! User service: use-cases for managing users.

use taskhub_domain::error::{ConflictError, NotFoundError, TaskHubError};
use taskhub_domain::id::UserId;
use taskhub_domain::user::{User, UserChanges};

use crate::ports::UserRepository;

fn not_found(id: UserId) -> TaskHubError {
    NotFoundError {
        entity: "User",
        id: id.to_string(),
    }
    .into()
}

/// Application service for user CRUD operations.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fails when `email` already belongs to a user other than `owner`.
    async fn ensure_email_free(
        &self,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), TaskHubError> {
        let taken = self
            .repo
            .find_by_email(email)
            .await?
            .is_some_and(|other| Some(other.id) != owner);
        if taken {
            return Err(ConflictError::DuplicateEmail(email.to_string()).into());
        }
        Ok(())
    }

    /// Create a new user after validating it and checking the e-mail is free.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail,
    /// [`TaskHubError::Conflict`] if the e-mail is already registered, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, user), fields(user_name = %user.name))]
    pub async fn create_user(&self, user: User) -> Result<User, TaskHubError> {
        user.validate()?;
        self.ensure_email_free(&user.email, None).await?;
        self.repo.create(user).await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, TaskHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<User>, TaskHubError> {
        self.repo.get_all().await
    }

    /// Apply `changes` to the stored user and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no user with `id` exists,
    /// [`TaskHubError::Validation`] if the result is invalid,
    /// [`TaskHubError::Conflict`] if the new e-mail belongs to someone else,
    /// or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<User, TaskHubError> {
        let user = self.get_user(id).await?.apply(changes);
        user.validate()?;
        self.ensure_email_free(&user.email, Some(id)).await?;
        self.repo.update(user).await?.ok_or_else(|| not_found(id))
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), TaskHubError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
