//! Session rules: email format and the derived display name.
//!
//! There is no password and no confirmation flow. A session is just a
//! [`User`] built from a well-formed email address.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::User;

/// `<non-space>+@<non-space>+.<non-space>+`, nothing more.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

impl User {
    /// Build a session user. The name is everything before the first `@`.
    pub fn from_email(email: &str) -> Result<Self, ValidationError> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        let name = email.split('@').next().unwrap_or_default().to_string();
        Ok(Self {
            name,
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "user@example.com",
            "a@b.c",
            "first.last@sub.domain.org",
            "x@y@z.io",
            "user@example.com.",
            "a@b.c.",
            "a@b..",
        ] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "not-an-email",
            "@example.com",
            "user@.com",
            "user@example.",
            "user@example",
            "us er@example.com",
            "user@exa mple.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn test_user_from_email() {
        let user = User::from_email("user@example.com").unwrap();
        assert_eq!(user.name, "user");
        assert_eq!(user.email, "user@example.com");

        assert_eq!(
            User::from_email("not-an-email"),
            Err(ValidationError::InvalidEmail)
        );
    }
}
