use crate::api::error;
use crate::modules::captcha::{CaptchaVerifier, VerificationResult};
use crate::utils::redact;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Google reCAPTCHA v3 `siteverify` client.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(client: reqwest::Client, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        tracing::info!("reCAPTCHA verifier initialized (secret {})", redact(&secret));
        Self { client, secret, verify_url: RECAPTCHA_VERIFY_URL.to_string() }
    }

    pub fn with_verify_url(mut self, url: impl Into<String>) -> Self {
        self.verify_url = url.into();
        self
    }
}

#[async_trait::async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<VerificationResult, error::SystemError> {
        let result = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json::<VerificationResult>()
            .await?;

        tracing::debug!(
            success = result.success,
            score = ?result.score,
            action = ?result.action,
            hostname = ?result.hostname,
            "reCAPTCHA verification result"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn verifier(server: &MockServer) -> RecaptchaVerifier {
        RecaptchaVerifier::new(reqwest::Client::new(), "s3cret-key")
            .with_verify_url(format!("{}/siteverify", server.uri()))
    }

    #[actix_web::test]
    async fn test_verify_parses_score() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/siteverify"))
            .and(body_string_contains("secret=s3cret-key"))
            .and(body_string_contains("response=tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "score": 0.9,
                "action": "submit",
                "hostname": "constructionstemarie.com",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = verifier(&server).await.verify("tok-123").await.unwrap();
        assert!(result.success);
        assert_eq!(result.score, Some(0.9));
        assert_eq!(result.action.as_deref(), Some("submit"));
    }

    #[actix_web::test]
    async fn test_verify_reads_error_codes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error-codes": ["timeout-or-duplicate"],
            })))
            .mount(&server)
            .await;

        let result = verifier(&server).await.verify("old").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.score, None);
        assert_eq!(result.error_codes, vec!["timeout-or-duplicate".to_string()]);
    }

    #[actix_web::test]
    async fn test_malformed_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        assert!(verifier(&server).await.verify("tok").await.is_err());
    }
}
