use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::Env;

/// Values the public site reads at runtime.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub google_maps_api_key: Option<String>,
}

impl From<&Env> for SiteConfig {
    fn from(env: &Env) -> Self {
        SiteConfig { google_maps_api_key: env.google_maps_api_key.clone() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsConfigResponse {
    pub api_key: String,
    pub libraries: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}
