use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::modules::mailer::{
    model::{OutgoingEmail, ProviderError, SendReceipt},
    provider::EmailProvider,
};
use crate::utils::redact;

pub const RESEND_API_URL: &str = "https://api.resend.com";

/// Resend transactional email API.
#[derive(Clone)]
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ResendAttachment<'a>>,
}

#[derive(Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for ResendRequest<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        ResendRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            reply_to: email.reply_to.as_deref(),
            attachments: email
                .attachments
                .iter()
                .map(|a| ResendAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                    content_type: &a.content_type,
                })
                .collect(),
        }
    }
}

impl ResendProvider {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        tracing::info!("Resend provider initialized (key {})", redact(&api_key));
        Self { client, api_key, base_url: RESEND_API_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, ProviderError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ResendRequest::from(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let receipt = response.json::<SendReceipt>().await?;
            tracing::debug!("Resend accepted message {}", receipt.id);
            return Ok(receipt);
        }

        let body = response.text().await.unwrap_or_default();
        let mut error = serde_json::from_str::<ProviderError>(&body).unwrap_or_else(|_| {
            ProviderError::new(
                "http_error",
                status.canonical_reason().unwrap_or("unexpected response status"),
            )
        });
        error.status_code.get_or_insert(status.as_u16());
        Err(error)
    }
}
