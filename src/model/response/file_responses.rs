use std::fs::File;

use chrono::NaiveDateTime;
use rocket::http::{ContentType, Header};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::FileRecord;
use crate::model::response::BasicMessage;

type NoContent = ();

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FileMetadataResponse {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "downloadCount")]
    pub download_count: u32,
    #[serde(rename = "shareUrl")]
    pub share_url: Option<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<&FileRecord> for FileMetadataResponse {
    fn from(f: &FileRecord) -> FileMetadataResponse {
        FileMetadataResponse {
            id: String::from(&f.id),
            name: String::from(&f.name),
            size: f.size,
            mime_type: f.mime_type.clone(),
            download_count: f.download_count,
            share_url: f.share_url.clone(),
            expires_at: f.expires_at,
            created_at: f.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct UploadedFilesResponse {
    pub files: Vec<FileMetadataResponse>,
}

#[derive(Responder)]
pub enum UploadFileResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<UploadedFilesResponse>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DownloadFileResponse {
    #[response(status = 200)]
    Success(File, ContentType, Header<'static>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ZipDownloadResponse {
    #[response(status = 200)]
    Success(Vec<u8>, ContentType, Header<'static>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteFileResponse {
    #[response(status = 204)]
    Deleted(NoContent),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum MoveFilesResponse {
    #[response(status = 204)]
    Moved(NoContent),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetGuestFilesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<UploadedFilesResponse>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
