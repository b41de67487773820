use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::{FileOwner, FileRecord, UsageReport, UsageTotals};
use crate::model::response::BasicMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FileOwnerResponse {
    pub username: String,
    pub email: Option<String>,
}

/// one row of the admin file listing; `owner` is null for guest uploads
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct AdminFileResponse {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
    #[serde(rename = "downloadCount")]
    pub download_count: u32,
    #[serde(rename = "shareUrl")]
    pub share_url: Option<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    pub owner: Option<FileOwnerResponse>,
}

impl From<&(FileRecord, Option<FileOwner>)> for AdminFileResponse {
    fn from((file, owner): &(FileRecord, Option<FileOwner>)) -> AdminFileResponse {
        AdminFileResponse {
            id: String::from(&file.id),
            name: String::from(&file.name),
            size: file.size,
            mime_type: file.mime_type.clone(),
            folder_id: file.folder_id.clone(),
            download_count: file.download_count,
            share_url: file.share_url.clone(),
            expires_at: file.expires_at,
            created_at: file.created_at,
            owner: owner.as_ref().map(|owner| FileOwnerResponse {
                username: String::from(&owner.username),
                email: owner.email.clone(),
            }),
        }
    }
}

#[derive(Responder)]
pub enum GetAllFilesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<AdminFileResponse>>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403)]
    Forbidden(String),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct UsagePeriodResponse {
    pub upload: u64,
    pub download: u64,
}

impl From<&UsageTotals> for UsagePeriodResponse {
    fn from(totals: &UsageTotals) -> UsagePeriodResponse {
        UsagePeriodResponse {
            upload: totals.uploaded_bytes,
            download: totals.downloaded_bytes,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct StatsResponse {
    pub today: UsagePeriodResponse,
    pub week: UsagePeriodResponse,
    pub month: UsagePeriodResponse,
}

impl From<&UsageReport> for StatsResponse {
    fn from(report: &UsageReport) -> StatsResponse {
        StatsResponse {
            today: UsagePeriodResponse::from(&report.today),
            week: UsagePeriodResponse::from(&report.week),
            month: UsagePeriodResponse::from(&report.month),
        }
    }
}

#[derive(Responder)]
pub enum GetStatsResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<StatsResponse>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403)]
    Forbidden(String),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
