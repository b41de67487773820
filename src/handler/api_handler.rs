use rocket::serde::json::Json;
use rocket::State;

use crate::guard::Requester;
use crate::model::repository::Settings;
use crate::model::request::UpdateSettingsRequest;
use crate::model::response::api_responses::{
    CleanupResponse, CleanupResultResponse, GetSettingsResponse, HealthCheckResponse,
    HealthResponse, SettingsResponse, UpdateSettingsResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::{cleanup_service, settings_service};
use crate::storage::FileStore;

/// sweeps expired files out of the database and off the disk. Driven by an
/// external scheduler hitting this endpoint; running it twice is harmless
#[get("/cleanup")]
pub fn cleanup_expired_files(db: &State<Db>, store: &State<FileStore>) -> CleanupResponse {
    match cleanup_service::sweep_expired(db, store) {
        Ok(deleted_count) => CleanupResponse::Success(Json::from(CleanupResultResponse {
            success: true,
            deleted_count,
        })),
        Err(_) => CleanupResponse::Failure(BasicMessage::new(
            "Cleanup sweep failed. Check server logs for details",
        )),
    }
}

/// liveness probe for load balancers and uptime monitors. Answers 503
/// instead of panicking when the database is unreachable
#[get("/health")]
pub fn health_check(db: &State<Db>) -> HealthCheckResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match db.ping() {
        Ok(()) => HealthCheckResponse::Healthy(Json::from(HealthResponse {
            status: "healthy".to_string(),
            timestamp,
        })),
        Err(e) => {
            log::error!("Health check failed. Nested exception is {e:?}");
            HealthCheckResponse::Unhealthy(Json::from(HealthResponse {
                status: "unhealthy".to_string(),
                timestamp,
            }))
        }
    }
}

#[get("/settings")]
pub fn get_settings(db: &State<Db>) -> GetSettingsResponse {
    match settings_service::get_settings(db) {
        Ok(settings) => GetSettingsResponse::Success(Json::from(SettingsResponse::from(&settings))),
        Err(_) => GetSettingsResponse::Failure(BasicMessage::new(
            "Failed to read settings. Check server logs for details",
        )),
    }
}

#[put("/settings", data = "<request>")]
pub fn update_settings(
    request: Json<UpdateSettingsRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> UpdateSettingsResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return UpdateSettingsResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return UpdateSettingsResponse::Forbidden("Administrator privileges required".to_string());
    }
    let settings = Settings {
        site_name: request.site_name.clone(),
        logo_url: request.logo_url.clone(),
    };
    match settings_service::update_settings(&settings, db) {
        Ok(()) => {
            UpdateSettingsResponse::Success(Json::from(SettingsResponse::from(&settings)))
        }
        Err(_) => UpdateSettingsResponse::Failure(BasicMessage::new(
            "Failed to update settings. Check server logs for details",
        )),
    }
}
