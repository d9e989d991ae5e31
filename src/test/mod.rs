//! Fakes and request builders shared by the handler and service tests.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use crate::api::error::SystemError;
use crate::modules::captcha::{CaptchaVerifier, VerificationResult};
use crate::modules::mailer::{EmailProvider, OutgoingEmail, ProviderError, SendReceipt};

pub const BUSINESS: &str = "devis@constructionstemarie.com";
pub const SENDER: &str = "noreply@constructionstemarie.com";
pub const SUBMITTER: &str = "marie.cote@example.com";

/// Records every message it is asked to send. Sends to addresses listed in
/// `failing_recipients` are rejected.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    failing_recipients: Vec<String>,
}

impl RecordingMailer {
    pub fn failing_for(recipient: &str) -> Self {
        Self { failing_recipients: vec![recipient.to_string()], ..Default::default() }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EmailProvider for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, ProviderError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        if email.to.iter().any(|to| self.failing_recipients.contains(to)) {
            return Err(ProviderError::new("validation_error", "recipient rejected"));
        }
        Ok(SendReceipt { id: format!("msg_{}", sent.len()) })
    }
}

/// Verifier returning a fixed score, or failing like an unreachable provider.
pub struct StubVerifier {
    score: Option<f64>,
    pub calls: AtomicUsize,
}

impl StubVerifier {
    pub fn scoring(score: f64) -> Self {
        Self { score: Some(score), calls: AtomicUsize::new(0) }
    }

    pub fn unreachable() -> Self {
        Self { score: None, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CaptchaVerifier for StubVerifier {
    async fn verify(&self, _token: &str) -> Result<VerificationResult, SystemError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.score {
            Some(score) => Ok(VerificationResult { success: true, score: Some(score), ..Default::default() }),
            None => Err(SystemError::InternalError("connection refused".into())),
        }
    }
}

/// A complete, valid submission as form field pairs.
pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Contact-2-First-Name", "Marie Côté"),
        ("Contact-2-Last-Name", "Terrebonne"),
        ("Contact-2-Email-2", SUBMITTER),
        ("Contact-2-Phone", "450-555-0101"),
        ("Contact-2-Select", "Agrandissement de maison"),
        ("Contact-2-Radio", "Contact 2 Radio 2"),
        ("Contact-2-Message", "Nous voulons agrandir la cuisine."),
    ]
}

pub fn valid_json() -> serde_json::Value {
    serde_json::Value::Object(
        valid_fields().into_iter().map(|(k, v)| (k.to_string(), v.into())).collect(),
    )
}

#[derive(Clone, Copy)]
pub enum MultipartPart<'a> {
    Text { name: &'a str, value: &'a str },
    File { name: &'a str, filename: &'a str, content_type: &'a str, content: &'a [u8] },
}

impl<'a> MultipartPart<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self::Text { name, value }
    }

    pub fn file(name: &'a str, filename: &'a str, content_type: &'a str, content: &'a [u8]) -> Self {
        Self::File { name, filename, content_type, content }
    }
}

const BOUNDARY: &str = "----quoteformtestboundary";

/// Encodes parts as `multipart/form-data`, returning the content type header and body.
pub fn multipart_body(parts: &[MultipartPart<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            MultipartPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File { name, filename, content_type, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
