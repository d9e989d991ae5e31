use serde::{Deserialize, Serialize};

/// A fully composed message handed to an [`EmailProvider`](super::EmailProvider).
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

/// Provider-assigned id of an accepted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

/// Rejection reported by the email provider, or a transport failure reaching it.
#[derive(thiserror::Error, Debug, Clone, Deserialize)]
#[error("{name}: {message}")]
pub struct ProviderError {
    #[serde(default = "ProviderError::default_name")]
    pub name: String,
    pub message: String,
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<u16>,
}

impl ProviderError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), message: message.into(), status_code: None }
    }

    fn default_name() -> String {
        "provider_error".to_string()
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        let mut error = ProviderError::new("transport_error", err.to_string());
        error.status_code = err.status().map(|s| s.as_u16());
        error
    }
}
