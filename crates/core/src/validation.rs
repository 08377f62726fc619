//! Input validation for user-supplied text fields.

use crate::error::CoreError;

/// Maximum length of board, category, and goal titles.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 150;

/// Minimum password length accepted at signup and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a title: non-blank and within [`MAX_TITLE_LEN`] characters.
pub fn validate_title(entity: &str, title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity} title must not be empty"
        )));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "{entity} title too long: {len} chars (max {MAX_TITLE_LEN})"
        )));
    }
    Ok(())
}

/// Validate comment text: must contain something other than whitespace.
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment text must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a username: non-empty, bounded, and free of whitespace.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation(
            "Username must not be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username too long (max {MAX_USERNAME_LEN} characters)"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain` with a dot in the domain.
///
/// An empty email is accepted; the field is optional.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Ok(());
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Validate a new password and its confirmation.
pub fn validate_new_password(password: &str, repeat: &str) -> Result<(), CoreError> {
    if password != repeat {
        return Err(CoreError::Validation("Passwords do not match".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_title_rejected() {
        assert_matches!(validate_title("Board", "   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title("Goal", &title).is_ok());
        let too_long = "a".repeat(MAX_TITLE_LEN + 1);
        assert_matches!(
            validate_title("Goal", &too_long),
            Err(CoreError::Validation(msg)) if msg.starts_with("Goal title too long")
        );
    }

    #[test]
    fn comment_text_must_not_be_blank() {
        assert!(validate_comment_text("looks good").is_ok());
        assert!(validate_comment_text("\n\t").is_err());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al ice").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("a@b.io").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@b.io").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn password_must_match_and_be_long_enough() {
        assert_matches!(
            validate_new_password("longenough1", "longenough2"),
            Err(CoreError::Validation(msg)) if msg == "Passwords do not match"
        );
        assert!(validate_new_password("short", "short").is_err());
        assert!(validate_new_password("exactly8", "exactly8").is_ok());
    }
}
