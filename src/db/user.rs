//! User model for VDRIVE.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp (optional).
    pub last_login: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (Argon2; hash before constructing).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Email address (optional).
    pub email: Option<String>,
}

impl NewUser {
    /// Create a new NewUser.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            nickname: nickname.into(),
            email: None,
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("alice", "hash", "Alice").with_email("alice@example.com");

        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash");
        assert_eq!(user.nickname, "Alice");
        assert_eq!(user.email, Some("alice@example.com".to_string()));
    }
}
