//! Client-side password complexity rules.

pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordValidation {
    pub validated: bool,
    pub error: Option<String>,
}

impl PasswordValidation {
    fn ok() -> Self {
        Self {
            validated: true,
            error: None,
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            validated: false,
            error: Some(error.into()),
        }
    }
}

/// Checks `password` against the complexity requirements.
///
/// An empty password is reported as validated so that an untouched field
/// does not show an error; callers still require a non-empty value before
/// submitting.
pub fn check_password_complexity(password: &str) -> PasswordValidation {
    if password.is_empty() {
        return PasswordValidation::ok();
    }
    if password.chars().any(char::is_whitespace) {
        return PasswordValidation::rejected("Password must not contain spaces");
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return PasswordValidation::rejected(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        ));
    }
    if !password.chars().any(char::is_alphabetic) {
        return PasswordValidation::rejected("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return PasswordValidation::rejected("Password must contain at least one digit");
    }
    PasswordValidation::ok()
}
