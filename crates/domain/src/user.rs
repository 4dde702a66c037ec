//! User: a standalone name and e-mail record with no relations.

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// Uniqueness of the e-mail address needs storage and is enforced by the
    /// user service.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `name` or `email` is blank,
    /// or when `email` has no `@` separating two non-empty parts. Values are
    /// expected to be trimmed already, as [`UserBuilder::build`] and
    /// [`User::apply`] do.
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.email.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::InvalidEmail(self.email.clone()).into()),
        }
    }

    /// Apply a partial update, leaving absent fields untouched. Incoming
    /// values are trimmed.
    #[must_use]
    pub fn apply(mut self, changes: UserChanges) -> Self {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = changes.email {
            self.email = email.trim().to_string();
        }
        self
    }
}

/// Fields a client may change on an existing [`User`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Consume the builder, trim `name` and `email`, validate, and return a
    /// [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if `name` or `email` is invalid.
    pub fn build(self) -> Result<User, TaskHubError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            name: self.name.as_deref().map(str::trim).unwrap_or_default().to_string(),
            email: self.email.as_deref().map(str::trim).unwrap_or_default().to_string(),
        };
        user.validate()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_user() {
        let user = User::builder()
            .name("Ada")
            .email("ada@example.com")
            .build()
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn should_reject_missing_email() {
        let result = User::builder().name("Ada").build();
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::EmptyEmail))
        ));
    }

    #[test]
    fn should_reject_email_without_at_sign() {
        let result = User::builder().name("Ada").email("ada.example.com").build();
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::InvalidEmail(_)))
        ));
    }

    #[test]
    fn should_reject_email_with_empty_domain() {
        let result = User::builder().name("Ada").email("ada@").build();
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_missing_name() {
        let result = User::builder().email("ada@example.com").build();
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_trim_name_and_email_on_build() {
        let user = User::builder()
            .name("  Ada ")
            .email(" ada@example.com\t")
            .build()
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn should_reject_whitespace_only_email() {
        let result = User::builder().name("Ada").email("   ").build();
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::EmptyEmail))
        ));
    }

    #[test]
    fn should_trim_values_when_applying_changes() {
        let user = User::builder()
            .name("Ada")
            .email("ada@example.com")
            .build()
            .unwrap()
            .apply(UserChanges {
                name: None,
                email: Some(" lovelace@example.com ".to_string()),
            });
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "lovelace@example.com");
    }
}
