use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

use crate::constants::{MSG_EMAIL_FAILED, MSG_INTERNAL, MSG_INVALID_BODY};
use crate::modules::mailer::model::ProviderError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(Cow<'static, str>),
    #[error("Internal Server Error: {message}")]
    InternalServer { message: Cow<'static, str>, debug: Option<String> },
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

impl Error {
    pub fn method_not_allowed(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MethodNotAllowed(msg.into())
    }

    pub fn internal_server_error(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InternalServer { message: msg.into(), debug: None }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::InternalServer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        let body = match self {
            Error::BadRequest(msg) | Error::MethodNotAllowed(msg) => {
                ErrorBody { success: false, message: msg.clone(), debug: None }
            }
            Error::InternalServer { message, debug } => {
                ErrorBody { success: false, message: message.clone(), debug: debug.clone() }
            }
        };
        res.json(body)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Configuration Error: {0}")]
    Config(String),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Serialization/Deserialization Error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Form Decoding Error: {0}")]
    FormError(#[from] serde_urlencoded::de::Error),
    #[error("Multipart Error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("Payload Error: {0}")]
    Payload(#[from] actix_web::error::PayloadError),
    #[error("Template Error: {0}")]
    Template(#[from] askama::Error),
    #[error("HTTP Client Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Email Delivery Error: {0}")]
    EmailDelivery(ProviderError),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Maps an internal failure onto what the caller is allowed to see.
    /// `expose` attaches the raw error text as `debug`.
    pub fn into_client_error(self, expose: bool) -> Error {
        let message: Cow<'static, str> = match &self {
            SystemError::BadRequest(msg) => return Error::BadRequest(msg.clone()),
            SystemError::JsonError(_)
            | SystemError::FormError(_)
            | SystemError::Multipart(_)
            | SystemError::Payload(_) => {
                log::info!("Rejected malformed request body: {}", self);
                return Error::BadRequest(MSG_INVALID_BODY.into());
            }
            SystemError::EmailDelivery(e) => {
                log::error!("Email delivery failed: {}", e);
                MSG_EMAIL_FAILED.into()
            }
            other => {
                log::error!("Internal Server Error: {:?}", other);
                MSG_INTERNAL.into()
            }
        };
        Error::InternalServer { message, debug: expose.then(|| self.to_string()) }
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        value.into_client_error(false)
    }
}
