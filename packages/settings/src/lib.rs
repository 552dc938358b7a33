// ABOUTME: Data model and validation for the console system settings record
// ABOUTME: Shared by the REST client, the editor workflow and the CLI

pub mod types;
pub mod validation;

pub use types::{DefaultLanguage, ImageKind, SettingsDraft, SystemSetting};
pub use validation::{
    validate_default_language, validate_default_password, validate_draft, validate_system_name,
    validate_system_title, validate_upload_size, ValidationError, MAX_UPLOAD_BYTES,
};
