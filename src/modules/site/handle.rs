use actix_web::{web, HttpResponse};

use crate::api::error;
use crate::constants::{MSG_HEALTHY, MSG_MAPS_NOT_CONFIGURED, MSG_USE_GET};
use crate::modules::site::model::{HealthResponse, MapsConfigResponse, SiteConfig};

/// GET /api/maps-config
pub async fn maps_config(config: web::Data<SiteConfig>) -> Result<HttpResponse, error::Error> {
    let Some(api_key) = config.google_maps_api_key.clone() else {
        log::error!("GOOGLE_MAPS_API_KEY is not set");
        return Err(error::Error::internal_server_error(MSG_MAPS_NOT_CONFIGURED));
    };
    Ok(HttpResponse::Ok().json(MapsConfigResponse { api_key, libraries: "places" }))
}

/// GET /api/health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK",
        message: MSG_HEALTHY,
        timestamp: chrono::Utc::now(),
    })
}

pub async fn method_not_allowed() -> Result<HttpResponse, error::Error> {
    Err(error::Error::method_not_allowed(MSG_USE_GET))
}
