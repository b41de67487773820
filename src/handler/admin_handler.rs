use rocket::serde::json::Json;
use rocket::State;

use crate::guard::Requester;
use crate::model::response::admin_responses::{
    AdminFileResponse, GetAllFilesResponse, GetStatsResponse, StatsResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::admin_service;

/// every file on the instance with its owner, for the admin dashboard
#[get("/files")]
pub fn get_all_files(requester: Option<Requester>, db: &State<Db>) -> GetAllFilesResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return GetAllFilesResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return GetAllFilesResponse::Forbidden("Administrator privileges required".to_string());
    }
    match admin_service::get_all_files(db) {
        Ok(files) => GetAllFilesResponse::Success(Json::from(
            files
                .iter()
                .map(AdminFileResponse::from)
                .collect::<Vec<AdminFileResponse>>(),
        )),
        Err(_) => GetAllFilesResponse::Failure(BasicMessage::new(
            "Failed to list files. Check server logs for details",
        )),
    }
}

/// upload/download byte totals for today, the last week and this month
#[get("/stats")]
pub fn get_stats(requester: Option<Requester>, db: &State<Db>) -> GetStatsResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return GetStatsResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return GetStatsResponse::Forbidden("Administrator privileges required".to_string());
    }
    match admin_service::get_stats(db) {
        Ok(report) => GetStatsResponse::Success(Json::from(StatsResponse::from(&report))),
        Err(_) => GetStatsResponse::Failure(BasicMessage::new(
            "Failed to load statistics. Check server logs for details",
        )),
    }
}
