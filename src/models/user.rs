use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as held by the user store.
/// Deliberately not `Serialize`: the password hash never leaves the process.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_omits_password_hash() {
        let user = NewUser {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            created_at: Utc::now(),
        }
        .into_user(5);

        let profile = UserProfile::from(&user);
        assert_eq!(profile.id, 5);
        assert_eq!(profile.username, "testuser");

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json["createdAt"].is_string());
    }
}
