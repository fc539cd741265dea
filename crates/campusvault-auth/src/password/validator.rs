//! Password policy enforcement for new passwords.

use campusvault_core::config::auth::AuthConfig;
use campusvault_core::error::AppError;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score (0-4).
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length as usize,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validates a password against the configured policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < min_score_threshold(self.min_score) {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less common password.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the current one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

fn min_score_threshold(min_score: u8) -> zxcvbn::Score {
    match min_score {
        0 => zxcvbn::Score::Zero,
        1 => zxcvbn::Score::One,
        2 => zxcvbn::Score::Two,
        3 => zxcvbn::Score::Three,
        _ => zxcvbn::Score::Four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            password_min_length: 8,
            password_min_score: 2,
        })
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(validator().validate("aB3!").is_err());
    }

    #[test]
    fn test_common_password_rejected() {
        assert!(validator().validate("password").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator().validate("plum-Tractor-91-echo").is_ok());
    }

    #[test]
    fn test_same_password_rejected() {
        assert!(validator().validate_not_same("abc12345", "abc12345").is_err());
        assert!(validator().validate_not_same("abc12345", "other9876").is_ok());
    }
}
