// ABOUTME: Field-level validation for the system settings draft
// ABOUTME: Mirrors the rules the console form enforces before submitting

use crate::types::{DefaultLanguage, SettingsDraft};
use thiserror::Error;

/// Maximum length of the system name, in characters.
pub const MAX_SYSTEM_NAME_LEN: usize = 20;

/// Maximum length of the system title, in characters.
pub const MAX_SYSTEM_TITLE_LEN: usize = 32;

/// Default password bounds, inclusive.
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 15;

/// Upload pre-check limit. Files at or above this size are rejected locally,
/// before any network call.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("System name is required")]
    SystemNameRequired,

    #[error("System name too long: {0} characters (max {MAX_SYSTEM_NAME_LEN})")]
    SystemNameTooLong(usize),

    #[error("System title too long: {0} characters (max {MAX_SYSTEM_TITLE_LEN})")]
    SystemTitleTooLong(usize),

    #[error("Default password is required")]
    PasswordRequired,

    // Message preserved from the console form.
    #[error("密码至少为6位数字或字母组成")]
    PasswordFormat,

    #[error("Default language is required")]
    LanguageRequired,

    #[error("Language is not available: {0}")]
    LanguageInactive(String),

    #[error("File too large: {0} bytes (max {MAX_UPLOAD_BYTES})")]
    FileTooLarge(usize),
}

/// Required, at most 20 characters.
pub fn validate_system_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::SystemNameRequired);
    }
    let len = value.chars().count();
    if len > MAX_SYSTEM_NAME_LEN {
        return Err(ValidationError::SystemNameTooLong(len));
    }
    Ok(())
}

/// Optional, at most 32 characters when present.
pub fn validate_system_title(value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(title) = value {
        let len = title.chars().count();
        if len > MAX_SYSTEM_TITLE_LEN {
            return Err(ValidationError::SystemTitleTooLong(len));
        }
    }
    Ok(())
}

/// Required, 6-15 characters, ASCII letters and digits only
/// (the form's `^[a-zA-Z0-9]{6,15}$` rule).
pub fn validate_default_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let len = value.chars().count();
    if len < MIN_PASSWORD_LEN
        || len > MAX_PASSWORD_LEN
        || !value.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ValidationError::PasswordFormat);
    }
    Ok(())
}

/// Required, and must be one of the currently active languages.
pub fn validate_default_language(value: Option<DefaultLanguage>) -> Result<(), ValidationError> {
    match value {
        None => Err(ValidationError::LanguageRequired),
        Some(lang) if !lang.is_active() => {
            Err(ValidationError::LanguageInactive(lang.as_str().to_string()))
        }
        Some(_) => Ok(()),
    }
}

/// Local pre-check applied to image uploads before anything is sent.
pub fn validate_upload_size(len: usize) -> Result<(), ValidationError> {
    if len >= MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge(len));
    }
    Ok(())
}

/// Run every field validator over a draft, returning the first failure.
pub fn validate_draft(draft: &SettingsDraft) -> Result<(), ValidationError> {
    validate_system_name(&draft.system_name)?;
    validate_system_title(draft.system_title.as_deref())?;
    validate_default_password(&draft.default_password)?;
    validate_default_language(draft.default_language)?;
    Ok(())
}
