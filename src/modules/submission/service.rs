use std::sync::Arc;
use validator::Validate;

use crate::api::error;
use crate::constants::{CAPTCHA_SENTINELS, MIN_HUMAN_SCORE, MSG_LOW_SCORE, MSG_MISSING_FIELDS};
use crate::modules::captcha::CaptchaVerifier;
use crate::modules::mailer::{EmailProvider, OutgoingEmail};
use crate::modules::submission::{
    model::{budget_label, SubmissionConfig, SubmissionForm, SubmissionReceipt},
    template::{render_business_notification, render_submission_confirmation},
    upload::TempUploads,
};
use crate::utils::redact;

#[derive(Clone)]
pub struct SubmissionService {
    mailer: Arc<dyn EmailProvider + Send + Sync>,
    verifier: Option<Arc<dyn CaptchaVerifier + Send + Sync>>,
    config: Arc<SubmissionConfig>,
}

impl SubmissionService {
    pub fn with_dependencies(
        mailer: Arc<dyn EmailProvider + Send + Sync>,
        verifier: Option<Arc<dyn CaptchaVerifier + Send + Sync>>,
        config: SubmissionConfig,
    ) -> Self {
        tracing::info!(
            "SubmissionService initialized (recipient: {}, verification: {}, attachments: {})",
            config.business_recipient,
            config.verify_submissions && verifier.is_some(),
            config.allow_attachments
        );
        SubmissionService { mailer, verifier, config: Arc::new(config) }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Runs one submission through validation, bot verification and delivery.
    /// The business notification decides the outcome; the confirmation to the
    /// submitter is best-effort. Temporary uploads are left to the caller to remove.
    pub async fn submit(
        &self,
        form: SubmissionForm,
        uploads: &TempUploads,
    ) -> Result<SubmissionReceipt, error::SystemError> {
        let form = form.trimmed();
        tracing::info!(
            full_name = %form.full_name,
            city = %form.city,
            email = %form.email,
            service = %form.service,
            budget = %form.budget,
            files = uploads.len(),
            token = %form.captcha_token.as_deref().map(redact).unwrap_or_else(|| "none".into()),
            "Submission received"
        );

        form.validate().map_err(|e| {
            tracing::info!("Submission rejected, missing fields: {}", e);
            error::SystemError::bad_request(MSG_MISSING_FIELDS)
        })?;

        self.verify(form.captcha_token.as_deref()).await?;

        let budget = budget_label(&form.budget);
        let business = render_business_notification(&form, budget, uploads.len())?;
        let confirmation = render_submission_confirmation(&form, budget)?;
        let attachments = uploads.to_attachments().await;

        let business_email = OutgoingEmail {
            from: self.config.from_address.clone(),
            to: vec![self.config.business_recipient.clone()],
            reply_to: Some(form.email.clone()),
            subject: business.subject,
            html: business.html,
            attachments,
        };

        tracing::info!(
            from = %business_email.from,
            to = %self.config.business_recipient,
            reply_to = %form.email,
            attachments = business_email.attachments.len(),
            "Sending business notification"
        );
        let receipt =
            self.mailer.send(&business_email).await.map_err(error::SystemError::EmailDelivery)?;
        tracing::info!("Business notification sent, id {}", receipt.id);

        let confirmation_email = OutgoingEmail {
            from: self.config.from_address.clone(),
            to: vec![form.email.clone()],
            reply_to: Some(self.config.business_recipient.clone()),
            subject: confirmation.subject,
            html: confirmation.html,
            attachments: Vec::new(),
        };
        match self.mailer.send(&confirmation_email).await {
            Ok(r) => tracing::info!("Confirmation sent to {}, id {}", form.email, r.id),
            Err(e) => tracing::error!("Confirmation to {} failed: {}", form.email, e),
        }

        Ok(SubmissionReceipt { id: receipt.id })
    }

    /// Rejects only a score below the threshold. A verifier that cannot be
    /// reached, or answers without a score, lets the submission through.
    async fn verify(&self, token: Option<&str>) -> Result<(), error::SystemError> {
        if !self.config.verify_submissions {
            return Ok(());
        }
        let Some(verifier) = &self.verifier else {
            return Ok(());
        };
        let Some(token) = token.filter(|t| !CAPTCHA_SENTINELS.contains(t)) else {
            tracing::warn!("No usable verification token, skipping bot check");
            return Ok(());
        };

        match verifier.verify(token).await {
            Ok(result) => match result.score {
                Some(score) if score < MIN_HUMAN_SCORE => {
                    tracing::warn!("Verification score {} below {}, rejecting", score, MIN_HUMAN_SCORE);
                    Err(error::SystemError::bad_request(MSG_LOW_SCORE))
                }
                Some(score) => {
                    tracing::info!("Verification passed with score {}", score);
                    Ok(())
                }
                None => {
                    tracing::warn!(
                        "Verification returned no score (success: {}, errors: {:?})",
                        result.success,
                        result.error_codes
                    );
                    Ok(())
                }
            },
            Err(e) => {
                tracing::warn!("Verification unavailable, continuing: {}", e);
                Ok(())
            }
        }
    }
}
