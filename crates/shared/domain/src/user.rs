//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    EMAIL_SEPARATOR, FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_PASSWORD,
};
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Stored credential value; hashing happens upstream of this crate
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    /// Disable timestamp (None = active, Some = disabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_at: Option<DateTime<Utc>>,
    pub api_key: Uuid,
}

impl User {
    /// Check if the account has been disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled_at.is_some()
    }

    /// Check if the account is active (not disabled)
    pub fn is_active(&self) -> bool {
        self.disabled_at.is_none()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account registration data.
///
/// `id` and `api_key` are generated when left unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub api_key: Option<Uuid>,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: None,
            api_key: None,
        }
    }

    /// Use an explicit primary key instead of a generated one
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Use an explicit API key instead of a generated one
    pub fn with_api_key(mut self, api_key: Uuid) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            (FIELD_EMAIL, &self.email),
            (FIELD_PASSWORD, &self.password),
            (FIELD_FIRST_NAME, &self.first_name),
            (FIELD_LAST_NAME, &self.last_name),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{} is required", field)));
            }
        }

        if !self.email.contains(EMAIL_SEPARATOR) {
            return Err(DomainError::validation("email must contain '@'"));
        }

        Ok(())
    }
}

/// Account update data. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.password.is_none()
    }

    /// Check that no supplied field would blank out a required value.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            (FIELD_PASSWORD, &self.password),
            (FIELD_FIRST_NAME, &self.first_name),
            (FIELD_LAST_NAME, &self.last_name),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::validation(format!("{} is required", field)));
            }
        }

        Ok(())
    }
}

/// User response (safe to print or return to a client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
            last_updated_at: user.last_updated_at,
            disabled_at: user.disabled_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password: "secret".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: now,
            last_updated_at: now,
            disabled_at: None,
            api_key: Uuid::new_v4(),
        }
    }

    #[test]
    fn disabled_state_follows_disabled_at() {
        let mut user = sample_user();
        assert!(user.is_active());
        assert!(!user.is_disabled());

        user.disabled_at = Some(Utc::now());
        assert!(user.is_disabled());
        assert!(!user.is_active());
    }

    #[test]
    fn full_name_joins_names() {
        assert_eq!(sample_user().full_name(), "A B");
    }

    #[test]
    fn validate_accepts_complete_registration() {
        let new_user = NewUser::new("a@x.com", "secret", "A", "B");
        assert!(new_user.validate().is_ok());
    }

    #[test]
    fn validate_reports_missing_field() {
        let new_user = NewUser::new("a@x.com", "secret", "  ", "B");
        let err = new_user.validate().unwrap_err();
        assert_eq!(err, DomainError::validation("first_name is required"));
    }

    #[test]
    fn validate_rejects_email_without_separator() {
        let new_user = NewUser::new("not-an-email", "secret", "A", "B");
        assert!(matches!(new_user.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn builder_sets_explicit_identifiers() {
        let id = Uuid::new_v4();
        let key = Uuid::new_v4();
        let new_user = NewUser::new("a@x.com", "secret", "A", "B")
            .with_id(id)
            .with_api_key(key);
        assert_eq!(new_user.id, Some(id));
        assert_eq!(new_user.api_key, Some(key));
    }

    #[test]
    fn empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            last_name: Some("C".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn changes_validate_rejects_blank_values() {
        let changes = UserChanges {
            first_name: Some("   ".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        let err = changes.validate().unwrap_err();
        assert_eq!(err, DomainError::validation("password is required"));

        let changes = UserChanges {
            last_name: Some("C".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
        assert!(UserChanges::default().validate().is_ok());
    }

    #[test]
    fn serialized_user_hides_password() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("disabled_at").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn response_omits_credentials() {
        let user = sample_user();
        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(response.id, user.id);
        assert!(json.get("api_key").is_none());
        assert!(json.get("password").is_none());
    }
}
