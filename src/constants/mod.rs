use std::path::PathBuf;

use crate::api::error::SystemError;

pub const BUSINESS_NAME: &str = "Construction Ste-Marie";
pub const BUSINESS_WEBSITE: &str = "constructionstemarie.com";

pub const MAX_UPLOAD_FILES: usize = 5;
pub const MAX_UPLOAD_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB
pub const MAX_FORM_BODY_SIZE: usize = 256 * 1024;

pub const MIN_HUMAN_SCORE: f64 = 0.3;
pub const CAPTCHA_SENTINELS: [&str; 2] = ["no-recaptcha", "recaptcha-error"];

pub const MSG_MISSING_FIELDS: &str = "Tous les champs obligatoires doivent être remplis.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Méthode non autorisée. Utilisez POST.";
pub const MSG_USE_GET: &str = "Méthode non autorisée. Utilisez GET.";
pub const MSG_MAPS_NOT_CONFIGURED: &str = "Clé API Google Maps non configurée.";
pub const MSG_HEALTHY: &str = "Server is running";
pub const MSG_INVALID_BODY: &str = "Requête invalide.";
pub const MSG_LOW_SCORE: &str =
    "Échec de la vérification de sécurité : score trop bas. Veuillez réessayer.";
pub const MSG_TOO_MANY_FILES: &str = "Maximum 5 images autorisées.";
pub const MSG_FILE_TOO_LARGE: &str = "Chaque image doit faire moins de 5 Mo.";
pub const MSG_NOT_AN_IMAGE: &str = "Seules les images sont acceptées.";
pub const MSG_EMAIL_FAILED: &str =
    "Erreur lors de l'envoi de l'email. Veuillez réessayer plus tard.";
pub const MSG_INTERNAL: &str = "Erreur interne du serveur. Veuillez réessayer plus tard.";
pub const MSG_SUCCESS: &str =
    "Votre soumission a été envoyée avec succès ! Vous recevrez une confirmation par email.";

#[derive(Debug, Clone)]
pub struct Env {
    pub resend_api_key: String,
    pub from_email: String,
    pub to_email: String,
    pub recaptcha_secret: Option<String>,
    pub verify_submissions: bool,
    pub allow_attachments: bool,
    pub upload_dir: PathBuf,
    pub development: bool,
    pub google_maps_api_key: Option<String>,
    pub ip: String,
    pub port: u16,
}

impl Env {
    /// Reads settings from the process environment.
    pub fn load() -> Result<Self, SystemError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source<F>(source: F) -> Result<Self, SystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| source(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| {
                SystemError::Config(format!("{key} must be set in .env file or environment variable"))
            })
        };
        let flag = |key: &str, default: bool| -> Result<bool, SystemError> {
            match optional(key) {
                None => Ok(default),
                Some(v) => parse_bool(&v)
                    .ok_or_else(|| SystemError::Config(format!("{key} must be a boolean, got '{v}'"))),
            }
        };

        let resend_api_key = required("RESEND_API_KEY")?;
        let from_email = required("FROM_EMAIL")?;
        let to_email = required("TO_EMAIL")?;

        let recaptcha_secret = optional("RECAPTCHA_SECRET_KEY");
        let verify_submissions = flag("VERIFY_SUBMISSIONS", recaptcha_secret.is_some())?;
        if verify_submissions && recaptcha_secret.is_none() {
            return Err(SystemError::Config(
                "RECAPTCHA_SECRET_KEY must be set when VERIFY_SUBMISSIONS is enabled".into(),
            ));
        }
        let allow_attachments = flag("ALLOW_ATTACHMENTS", true)?;

        let upload_dir = optional("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(std::env::temp_dir);
        let development = optional("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("development"));
        let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");

        let ip = optional("IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match optional("PORT") {
            None => 8080,
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| SystemError::Config(format!("PORT must be a valid u16 integer, got '{v}'")))?,
        };

        Ok(Env {
            resend_api_key,
            from_email,
            to_email,
            recaptcha_secret,
            verify_submissions,
            allow_attachments,
            upload_dir,
            development,
            google_maps_api_key,
            ip,
            port,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
