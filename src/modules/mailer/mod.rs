pub mod model;
pub mod provider;
pub mod resend;

pub use model::{EmailAttachment, OutgoingEmail, ProviderError, SendReceipt};
pub use provider::EmailProvider;
pub use resend::ResendProvider;
