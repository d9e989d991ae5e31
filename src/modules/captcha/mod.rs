pub mod recaptcha;

pub use recaptcha::RecaptchaVerifier;

use serde::Deserialize;

use crate::api::error;

/// Verdict returned by the bot-verification provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

#[async_trait::async_trait]
pub trait CaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<VerificationResult, error::SystemError>;
}
