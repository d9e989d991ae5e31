use actix_web::web;

use crate::modules::site::handle::{health, maps_config, method_not_allowed};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/maps-config")
            .route(web::get().to(maps_config))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health))
            .default_service(web::to(method_not_allowed)),
    );
}
