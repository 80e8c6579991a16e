//! Password policy for new passwords.

use zxcvbn::Score;

use todohub_core::config::AuthConfig;
use todohub_core::error::AppError;

/// Validates new passwords against a minimum length and a minimum zxcvbn
/// strength score.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: Score,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let min_score = match config.password_min_score {
            0 => Score::Zero,
            1 => Score::One,
            2 => Score::Two,
            3 => Score::Three,
            _ => Score::Four,
        };
        Self {
            min_length: config.password_min_length,
            min_score,
        }
    }

    /// Check `password`; `user_inputs` (such as the account name) count
    /// against its strength.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }
}
