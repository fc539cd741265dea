//! Authentication and password policy configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length for new passwords.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: u32,
    /// Minimum zxcvbn score (0-4) for new passwords.
    #[serde(default = "default_password_min_score")]
    pub password_min_score: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            password_min_score: default_password_min_score(),
        }
    }
}

fn default_password_min_length() -> u32 {
    8
}

fn default_password_min_score() -> u8 {
    2
}
