use askama::Template;

use crate::api::error;
use crate::constants::{BUSINESS_NAME, BUSINESS_WEBSITE};
use crate::modules::submission::model::SubmissionForm;

#[derive(Template)]
#[template(path = "business_notification.html")]
struct BusinessNotification<'a> {
    business_name: &'a str,
    full_name: &'a str,
    city: &'a str,
    email: &'a str,
    phone: &'a str,
    service: &'a str,
    budget: &'a str,
    message: &'a str,
    attachment_count: usize,
}

#[derive(Template)]
#[template(path = "submission_confirmation.html")]
struct SubmissionConfirmation<'a> {
    business_name: &'a str,
    website: &'a str,
    full_name: &'a str,
    city: &'a str,
    service: &'a str,
    budget: &'a str,
}

/// Subject and HTML body of one outgoing message.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn render_business_notification(
    form: &SubmissionForm,
    budget: &str,
    attachment_count: usize,
) -> Result<RenderedEmail, error::SystemError> {
    let html = BusinessNotification {
        business_name: BUSINESS_NAME,
        full_name: &form.full_name,
        city: &form.city,
        email: &form.email,
        phone: &form.phone,
        service: &form.service,
        budget,
        message: &form.message,
        attachment_count,
    }
    .render()?;

    let subject = if form.city.is_empty() {
        format!("🏗️ Nouveau Projet - {} - {}", form.full_name, BUSINESS_NAME)
    } else {
        format!("🏗️ Nouveau Projet - {} ({}) - {}", form.full_name, form.city, BUSINESS_NAME)
    };

    Ok(RenderedEmail { subject, html })
}

pub fn render_submission_confirmation(
    form: &SubmissionForm,
    budget: &str,
) -> Result<RenderedEmail, error::SystemError> {
    let html = SubmissionConfirmation {
        business_name: BUSINESS_NAME,
        website: BUSINESS_WEBSITE,
        full_name: &form.full_name,
        city: &form.city,
        service: &form.service,
        budget,
    }
    .render()?;

    Ok(RenderedEmail { subject: format!("✅ Confirmation de soumission - {}", BUSINESS_NAME), html })
}
