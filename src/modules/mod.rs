pub mod captcha;
pub mod mailer;
pub mod site;
pub mod submission;
