use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::Settings;
use crate::model::response::BasicMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct CleanupResultResponse {
    pub success: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u32,
}

#[derive(Responder)]
pub enum CleanupResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<CleanupResultResponse>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Responder)]
pub enum HealthCheckResponse {
    #[response(status = 200, content_type = "json")]
    Healthy(Json<HealthResponse>),
    #[response(status = 503, content_type = "json")]
    Unhealthy(Json<HealthResponse>),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SettingsResponse {
    #[serde(rename = "siteName")]
    pub site_name: String,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        SettingsResponse {
            site_name: String::from(&settings.site_name),
            logo_url: settings.logo_url.clone(),
        }
    }
}

#[derive(Responder)]
pub enum GetSettingsResponse {
    #[response(status = 200)]
    Success(Json<SettingsResponse>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum UpdateSettingsResponse {
    #[response(status = 200)]
    Success(Json<SettingsResponse>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403)]
    Forbidden(String),
}
