//! Client-side validation rules for the entry form and the login form.
//!
//! Submit-time checks return a [`ValidationError`] whose `Display` text is
//! the user-facing message. The year input filter is a keystroke guard only.
use std::sync::LazyLock;

use regex::Regex;

/// First year a motion picture could have been published.
pub const EARLIEST_PUBLISHING_YEAR: i32 = 1888;

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 20;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("valid year pattern"));
static PARTIAL_YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{0,4}$").expect("valid partial year pattern"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error(
        "Invalid publishing year. It must be a four-digit year between {earliest} and the current year.",
        earliest = EARLIEST_PUBLISHING_YEAR
    )]
    InvalidPublishingYear,
    #[error("Email is required")]
    EmailRequired,
    #[error("Entered value does not match email format")]
    EmailFormat,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {min} characters long", min = PASSWORD_MIN_LEN)]
    PasswordTooShort,
    #[error("Password cannot exceed {max} characters", max = PASSWORD_MAX_LEN)]
    PasswordTooLong,
    #[error("Password must contain at least one letter, one number, and one special character")]
    PasswordComplexity,
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

/// Exactly four ASCII digits, within `EARLIEST_PUBLISHING_YEAR..=current_year`.
pub fn validate_publishing_year(year: &str, current_year: i32) -> Result<i32, ValidationError> {
    if !YEAR_PATTERN.is_match(year) {
        return Err(ValidationError::InvalidPublishingYear);
    }
    let parsed: i32 = year
        .parse()
        .map_err(|_| ValidationError::InvalidPublishingYear)?;
    if !(EARLIEST_PUBLISHING_YEAR..=current_year).contains(&parsed) {
        return Err(ValidationError::InvalidPublishingYear);
    }
    Ok(parsed)
}

/// Keystroke filter for the year field.
///
/// Accepts an empty string, or up to four digits whose value does not exceed
/// `current_year`. Neither the lower bound nor the exact length is enforced.
pub fn accept_year_input(candidate: &str, current_year: i32) -> bool {
    if !PARTIAL_YEAR_PATTERN.is_match(candidate) {
        return false;
    }
    if candidate.is_empty() {
        return true;
    }
    candidate
        .parse::<i32>()
        .map(|value| value <= current_year)
        .unwrap_or(false)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::EmailFormat);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > PASSWORD_MAX_LEN {
        return Err(ValidationError::PasswordTooLong);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());
    if !(has_letter && has_digit && has_special) {
        return Err(ValidationError::PasswordComplexity);
    }
    Ok(())
}
