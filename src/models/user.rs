use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// An account as kept in the store.
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

/// Partial update of an account. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("a@b.com".into(), "A".into(), "$2b$12$secret".into());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["name"], "A");
        assert!(json["createdAt"].is_string());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn test_apply_update() {
        let mut user = User::new("a@b.com".into(), "A".into(), "hash".into());

        user.apply(UserUpdate::default());
        assert_eq!(user.name, "A");

        user.apply(UserUpdate {
            name: Some("Alice".into()),
        });
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn test_user_update_validation() {
        assert!(UserUpdate { name: None }.validate().is_ok());
        assert!(UserUpdate {
            name: Some("".into())
        }
        .validate()
        .is_err());
    }
}
