use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::response::file_responses::FileMetadataResponse;
use crate::model::response::folder_responses::FolderResponse;
use crate::model::response::BasicMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct CreatedShareResponse {
    /// fully qualified share URL, base app url + token
    #[serde(rename = "shareUrl")]
    pub share_url: String,
}

#[derive(Responder)]
pub enum CreateShareResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<CreatedShareResponse>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ShareAuthResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NoPasswordRequired(Json<BasicMessage>),
    #[response(status = 401, content_type = "json")]
    InvalidPassword(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

/// what a share token resolves to: a single file, or a folder wrapping all
/// of its live files under one access point
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SharedContentResponse {
    #[serde(rename = "type")]
    pub share_type: String,
    /// set when the token belongs to one or more file rows
    pub files: Option<Vec<FileMetadataResponse>>,
    /// set when the token belongs to a folder
    pub folder: Option<FolderResponse>,
    /// whether the visitor must authenticate before retrieving content
    #[serde(rename = "passwordProtected")]
    pub password_protected: bool,
}

#[derive(Responder)]
pub enum GetShareResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<SharedContentResponse>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
