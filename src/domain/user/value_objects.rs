use serde::Serialize;
use std::fmt;

/// Maximum length of a username, in characters
pub const USERNAME_MAX_LEN: usize = 80;

/// Maximum length of a password, in characters
pub const PASSWORD_MAX_LEN: usize = 120;

/// Username value object
///
/// # Invariants
/// - Must not be empty
/// - At most 80 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use users_api::domain::user::value_objects::Username;
    ///
    /// let username = Username::new("alice").expect("valid username");
    /// assert_eq!(username.as_str(), "alice");
    /// ```
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        let username = username.into();
        if username.is_empty() {
            return Err("Username must not be empty".to_string());
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LEN
            ));
        }
        Ok(Username(username))
    }

    /// Returns the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Password value object
///
/// Stored as given; never serialized and redacted from `Debug` output.
///
/// # Invariants
/// - Must not be empty
/// - At most 120 characters long
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new Password value object
    pub fn new(password: impl Into<String>) -> Result<Self, String> {
        let password = password.into();
        if password.is_empty() {
            return Err("Password must not be empty".to_string());
        }
        if password.chars().count() > PASSWORD_MAX_LEN {
            return Err(format!(
                "Password must be at most {} characters",
                PASSWORD_MAX_LEN
            ));
        }
        Ok(Password(password))
    }

    /// Returns the password as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_username() {
        assert!(Username::new("alice").is_ok());
    }

    #[test]
    fn username_at_max_length() {
        let name = "a".repeat(USERNAME_MAX_LEN);
        assert!(Username::new(name).is_ok());
    }

    #[test]
    fn username_too_long() {
        let name = "a".repeat(USERNAME_MAX_LEN + 1);
        assert_eq!(
            Username::new(name).unwrap_err(),
            "Username must be at most 80 characters"
        );
    }

    #[test]
    fn username_length_counts_characters_not_bytes() {
        let name = "é".repeat(USERNAME_MAX_LEN);
        assert!(Username::new(name).is_ok());
    }

    #[test]
    fn invalid_username_empty() {
        assert!(Username::new("").is_err());
    }

    #[test]
    fn username_display() {
        let username = Username::new("alice").unwrap();
        assert_eq!(format!("{}", username), "alice");
    }

    #[test]
    fn username_serializes_as_plain_string() {
        let username = Username::new("alice").unwrap();
        assert_eq!(serde_json::to_string(&username).unwrap(), "\"alice\"");
    }

    #[test]
    fn valid_password() {
        let password = Password::new("pw1").unwrap();
        assert_eq!(password.as_str(), "pw1");
    }

    #[test]
    fn password_too_long() {
        let pw = "x".repeat(PASSWORD_MAX_LEN + 1);
        assert!(Password::new(pw).is_err());
    }

    #[test]
    fn invalid_password_empty() {
        assert!(Password::new("").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains("hunter2"));
    }
}
