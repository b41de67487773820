use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::{FileRecord, Folder};
use crate::model::response::file_responses::FileMetadataResponse;
use crate::model::response::BasicMessage;

type NoContent = ();

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FolderResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "shareUrl")]
    pub share_url: Option<String>,
    #[serde(rename = "fileCount")]
    pub file_count: u32,
    pub files: Vec<FileMetadataResponse>,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl FolderResponse {
    pub fn from(base: &Folder) -> FolderResponse {
        FolderResponse {
            id: String::from(&base.id),
            name: String::from(&base.name),
            share_url: base.share_url.clone(),
            file_count: 0,
            files: Vec::new(),
            created_at: base.created_at,
        }
    }

    pub fn files(&mut self, files: Vec<FileRecord>) {
        self.file_count = files.len() as u32;
        files
            .iter()
            .map(FileMetadataResponse::from)
            .for_each(|f| self.files.push(f));
    }
}

#[derive(Responder)]
pub enum GetFolderResponse {
    #[response(status = 200)]
    Success(Json<FolderResponse>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum ListFoldersResponse {
    #[response(status = 200)]
    Success(Json<Vec<FolderResponse>>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum CreateFolderResponse {
    #[response(status = 201)]
    Success(Json<FolderResponse>),
    #[response(status = 400, content_type = "json")]
    FolderAlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum UpdateFolderResponse {
    #[response(status = 200)]
    Success(Json<FolderResponse>),
    #[response(status = 400, content_type = "json")]
    FolderAlreadyExists(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteFolderResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
