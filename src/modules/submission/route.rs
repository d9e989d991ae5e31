use actix_web::{http::Method, web};

use crate::modules::submission::handle::{method_not_allowed, preflight, submit_form};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/submit-form")
            .route(web::post().to(submit_form))
            .route(web::method(Method::OPTIONS).to(preflight))
            .default_service(web::to(method_not_allowed)),
    );
}
