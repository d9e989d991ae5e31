use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::constants::{MAX_FORM_BODY_SIZE, MSG_INVALID_BODY, MSG_METHOD_NOT_ALLOWED, MSG_SUCCESS};
use crate::modules::submission::{
    model::{SubmissionConfig, SubmissionForm, SubmissionReceipt},
    service::SubmissionService,
    upload::{read_multipart, TempUploads},
};

/// POST /api/submit-form
///
/// Accepts JSON, URL-encoded or multipart bodies. Uploaded files are removed
/// before the response is produced, whatever the outcome.
pub async fn submit_form(
    req: HttpRequest,
    payload: web::Payload,
    service: web::Data<SubmissionService>,
) -> Result<success::Success<SubmissionReceipt>, error::Error> {
    let expose = service.config().expose_error_details;

    let (form, uploads) = read_submission(&req, payload, service.config())
        .await
        .map_err(|e| e.into_client_error(expose))?;

    let result = service.submit(form, &uploads).await;
    uploads.cleanup().await;

    let receipt = result.map_err(|e| e.into_client_error(expose))?;
    Ok(success::Success::ok(Some(receipt)).message(MSG_SUCCESS))
}

/// OPTIONS /api/submit-form
pub async fn preflight() -> success::Success<()> {
    success::Success::empty()
}

pub async fn method_not_allowed() -> Result<HttpResponse, error::Error> {
    Err(error::Error::method_not_allowed(MSG_METHOD_NOT_ALLOWED))
}

async fn read_submission(
    req: &HttpRequest,
    payload: web::Payload,
    config: &SubmissionConfig,
) -> Result<(SubmissionForm, TempUploads), error::SystemError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::new(req.headers(), payload);
        return read_multipart(multipart, &config.upload, config.allow_attachments).await;
    }

    let body = read_body(payload).await?;
    let form: SubmissionForm = if content_type.starts_with("application/json") {
        serde_json::from_slice(&body)?
    } else {
        serde_urlencoded::from_bytes(&body)?
    };
    Ok((form, TempUploads::default()))
}

async fn read_body(mut payload: web::Payload) -> Result<web::Bytes, error::SystemError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.try_next().await? {
        if body.len() + chunk.len() > MAX_FORM_BODY_SIZE {
            return Err(error::SystemError::bad_request(MSG_INVALID_BODY));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
