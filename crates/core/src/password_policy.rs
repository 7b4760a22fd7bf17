//! Password strength rules applied on account creation and password change.
//!
//! Every violated rule produces its own message so the form can show all of
//! them at once next to the password field.

/// Minimum password length when not overridden by configuration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Usernames shorter than this are not checked for similarity.
const MIN_SIMILARITY_LENGTH: usize = 3;

/// A small deny-list of passwords that show up in every breach corpus.
const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "password",
    "password1",
    "password123",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "abc123",
    "111111",
    "letmein",
    "welcome",
    "iloveyou",
    "admin",
    "administrator",
    "monkey",
    "dragon",
    "football",
    "baseball",
    "sunshine",
    "princess",
    "trustno1",
];

/// Configurable password rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check `password` against every rule. `username` enables the
    /// similarity check.
    pub fn validate(&self, password: &str, username: Option<&str>) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(username) = username {
            if is_too_similar(password, username) {
                errors.push("The password is too similar to the username.".to_string());
            }
        }

        if password.chars().count() < self.min_length {
            errors.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
            errors.push("This password is too common.".to_string());
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            errors.push("This password is entirely numeric.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_too_similar(password: &str, username: &str) -> bool {
    let username = username.trim().to_lowercase();
    if username.chars().count() < MIN_SIMILARITY_LENGTH {
        return false;
    }
    let password = password.to_lowercase();
    password.contains(&username) || (!password.is_empty() && username.contains(&password))
}
