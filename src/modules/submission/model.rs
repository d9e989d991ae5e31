use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use validator::Validate;

use crate::constants::{Env, MAX_UPLOAD_FILES, MAX_UPLOAD_FILE_SIZE};

pub const FIELD_FULL_NAME: &str = "Contact-2-First-Name";
pub const FIELD_CITY: &str = "Contact-2-Last-Name";
pub const FIELD_EMAIL: &str = "Contact-2-Email-2";
pub const FIELD_PHONE: &str = "Contact-2-Phone";
pub const FIELD_SERVICE: &str = "Contact-2-Select";
pub const FIELD_BUDGET: &str = "Contact-2-Radio";
pub const FIELD_MESSAGE: &str = "Contact-2-Message";
pub const FIELD_CAPTCHA: &str = "g-recaptcha-response";
pub const FIELD_IMAGE: &str = "Contact-2-Image";

/// Quote-request fields as posted by the website form. Missing fields deserialize
/// as empty strings so that validation, not decoding, reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmissionForm {
    #[serde(rename = "Contact-2-First-Name", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub full_name: String,
    #[serde(rename = "Contact-2-Last-Name", default)]
    pub city: String,
    #[serde(rename = "Contact-2-Email-2", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub email: String,
    #[serde(rename = "Contact-2-Phone", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub phone: String,
    #[serde(rename = "Contact-2-Select", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub service: String,
    #[serde(rename = "Contact-2-Radio", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub budget: String,
    #[serde(rename = "Contact-2-Message", default)]
    #[validate(custom(function = "crate::utils::not_blank"))]
    pub message: String,
    #[serde(rename = "g-recaptcha-response", default)]
    pub captcha_token: Option<String>,
}

impl SubmissionForm {
    /// Assigns a multipart text field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            FIELD_FULL_NAME => self.full_name = value,
            FIELD_CITY => self.city = value,
            FIELD_EMAIL => self.email = value,
            FIELD_PHONE => self.phone = value,
            FIELD_SERVICE => self.service = value,
            FIELD_BUDGET => self.budget = value,
            FIELD_MESSAGE => self.message = value,
            FIELD_CAPTCHA => self.captcha_token = Some(value),
            _ => tracing::debug!("Ignoring unknown form field {}", name),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(self) -> Self {
        let trim = |s: String| s.trim().to_string();
        Self {
            full_name: trim(self.full_name),
            city: trim(self.city),
            email: trim(self.email),
            phone: trim(self.phone),
            service: trim(self.service),
            budget: trim(self.budget),
            message: trim(self.message),
            captcha_token: self.captcha_token.map(trim).filter(|t| !t.is_empty()),
        }
    }
}

lazy_static::lazy_static! {
    static ref BUDGET_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("Contact 2 Radio 1", "25 000$ et moins"),
        ("Contact 2 Radio 2", "25 000$-50 000$"),
        ("Contact 2 Radio 3", "50 000-100 000$"),
        ("Contact 2 Radio 4", "100 000$ et plus"),
    ]);
}

/// Human-readable price range for a budget code; unknown codes pass through unchanged.
pub fn budget_label(code: &str) -> &str {
    BUDGET_LABELS.get(code).copied().unwrap_or(code)
}

/// Limits applied to `Contact-2-Image` uploads.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_files: usize,
    pub max_file_size: usize,
    pub upload_dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: MAX_UPLOAD_FILES,
            max_file_size: MAX_UPLOAD_FILE_SIZE,
            upload_dir: std::env::temp_dir(),
        }
    }
}

/// Behaviour switches for the submission pipeline, fixed at startup.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub business_recipient: String,
    pub from_address: String,
    pub verify_submissions: bool,
    pub allow_attachments: bool,
    pub expose_error_details: bool,
    pub upload: UploadConfig,
}

impl From<&Env> for SubmissionConfig {
    fn from(env: &Env) -> Self {
        SubmissionConfig {
            business_recipient: env.to_email.clone(),
            from_address: env.from_email.clone(),
            verify_submissions: env.verify_submissions,
            allow_attachments: env.allow_attachments,
            expose_error_details: env.development,
            upload: UploadConfig { upload_dir: env.upload_dir.clone(), ..Default::default() },
        }
    }
}

/// Temporary on-disk copy of an uploaded image.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub original_name: String,
    pub mime_type: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_labels() {
        assert_eq!(budget_label("Contact 2 Radio 1"), "25 000$ et moins");
        assert_eq!(budget_label("Contact 2 Radio 2"), "25 000$-50 000$");
        assert_eq!(budget_label("Contact 2 Radio 3"), "50 000-100 000$");
        assert_eq!(budget_label("Contact 2 Radio 4"), "100 000$ et plus");
        assert_eq!(budget_label("À discuter"), "À discuter");
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let form: SubmissionForm =
            serde_json::from_str(r#"{"Contact-2-First-Name":"Marie"}"#).unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("full_name"));
        assert!(!fields.contains_key("city"));
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let form = SubmissionForm {
            full_name: "Marie".into(),
            email: "marie@example.com".into(),
            phone: "450-555-0101".into(),
            service: "Rénovation".into(),
            budget: "Contact 2 Radio 1".into(),
            message: "   ".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());
        assert!(form.trimmed().validate().is_err());
    }

    #[test]
    fn test_set_field_and_trim_token() {
        let mut form = SubmissionForm::default();
        form.set_field(FIELD_FULL_NAME, " Marie Côté ".into());
        form.set_field(FIELD_CAPTCHA, "  ".into());
        form.set_field("Contact-2-Unknown", "x".into());
        let form = form.trimmed();
        assert_eq!(form.full_name, "Marie Côté");
        assert_eq!(form.captcha_token, None);
    }
}
