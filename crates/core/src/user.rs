//! User accounts.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail};

use crate::entity::{ConcurrencySafeEntity, EntityMeta};
use crate::error::CoreError;
use crate::state::UserState;
use crate::types::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub meta: EntityMeta,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub state: UserState,
}

impl ConcurrencySafeEntity for User {
    const KIND: EntityKind = EntityKind::User;
    const REQUIRED_PROPERTIES: &'static [&'static str] =
        &["id", "version", "timeAdded", "name", "email", "state"];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Activate,
    Lock,
    Unlock,
}

impl UserAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
        }
    }
}

impl User {
    pub fn is_registered(&self) -> bool {
        self.state == UserState::Registered
    }

    pub fn is_active(&self) -> bool {
        self.state == UserState::Active
    }

    pub fn is_locked(&self) -> bool {
        self.state == UserState::Locked
    }

    /// Registered users may be activated; any unlocked user may be locked;
    /// only locked users may be unlocked.
    pub fn check_transition(&self, action: UserAction) -> Result<(), CoreError> {
        match (action, self.state) {
            (UserAction::Activate, UserState::Registered) => Ok(()),
            (UserAction::Activate, UserState::Active) => {
                Err(CoreError::transition("already active"))
            }
            (UserAction::Activate, UserState::Locked) => Err(CoreError::transition(
                "cannot activate user in locked state",
            )),
            (UserAction::Lock, UserState::Locked) => Err(CoreError::transition("already locked")),
            (UserAction::Lock, _) => Ok(()),
            (UserAction::Unlock, UserState::Locked) => Ok(()),
            (UserAction::Unlock, _) => Err(CoreError::transition("not locked")),
        }
    }
}

/// DTO for registering a user.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "invalid avatar url"))]
    pub avatar_url: Option<String>,
}

/// Validate an email address on its own, for single-field updates.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.to_string().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("invalid email address: {email}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(state: UserState) -> User {
        User {
            meta: EntityMeta::default(),
            slug: String::new(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            avatar_url: None,
            state,
        }
    }

    #[test]
    fn activate_only_from_registered() {
        assert!(user(UserState::Registered).check_transition(UserAction::Activate).is_ok());
        assert_eq!(
            user(UserState::Active)
                .check_transition(UserAction::Activate)
                .unwrap_err()
                .to_string(),
            "already active"
        );
        assert!(user(UserState::Locked).check_transition(UserAction::Activate).is_err());
    }

    #[test]
    fn lock_and_unlock() {
        assert!(user(UserState::Active).check_transition(UserAction::Lock).is_ok());
        assert_eq!(
            user(UserState::Locked)
                .check_transition(UserAction::Lock)
                .unwrap_err()
                .to_string(),
            "already locked"
        );
        assert!(user(UserState::Locked).check_transition(UserAction::Unlock).is_ok());
        assert_eq!(
            user(UserState::Active)
                .check_transition(UserAction::Unlock)
                .unwrap_err()
                .to_string(),
            "not locked"
        );
    }

    #[test]
    fn new_user_validation() {
        let dto = NewUser {
            name: "Jo Smith".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            avatar_url: None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn email_helper() {
        assert!(validate_email("a@b.org").is_ok());
        assert!(validate_email("nope").is_err());
    }
}
