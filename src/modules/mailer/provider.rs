use crate::modules::mailer::model::{OutgoingEmail, ProviderError, SendReceipt};

#[async_trait::async_trait]
pub trait EmailProvider {
    /// Single delivery attempt. No retries are made on failure.
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, ProviderError>;
}
