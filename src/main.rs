use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::{
    configs::HTTP_CLIENT,
    constants::Env,
    middlewares::cors_headers,
    modules::{
        captcha::{CaptchaVerifier, RecaptchaVerifier},
        mailer::ResendProvider,
        site::SiteConfig,
        submission::{SubmissionConfig, SubmissionService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let env = Env::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("Environment variables loaded");

    let mailer = Arc::new(ResendProvider::new(HTTP_CLIENT.clone(), env.resend_api_key.clone()));
    let verifier = env.recaptcha_secret.clone().map(|secret| {
        Arc::new(RecaptchaVerifier::new(HTTP_CLIENT.clone(), secret))
            as Arc<dyn CaptchaVerifier + Send + Sync>
    });

    let submission_service =
        SubmissionService::with_dependencies(mailer, verifier, SubmissionConfig::from(&env));
    let site_config = SiteConfig::from(&env);

    tracing::info!("Starting server at http://{}:{}", env.ip, env.port);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(Logger::default())
            .app_data(web::Data::new(submission_service.clone()))
            .app_data(web::Data::new(site_config.clone()))
            .service(
                web::scope("/api")
                    .configure(modules::submission::route::configure)
                    .configure(modules::site::route::configure),
            )
    })
    .bind((env.ip.as_str(), env.port))?
    .workers(2)
    .run()
    .await
}
