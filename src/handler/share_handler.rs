use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::time::Duration;
use rocket::State;

use crate::config::UPLOAD_SERVER_CONFIG;
use crate::guard::Requester;
use crate::model::error::share_errors::{CreateShareError, GetShareError, ShareAuthError};
use crate::model::request::{CreateShareRequest, ShareAuthRequest};
use crate::model::response::file_responses::FileMetadataResponse;
use crate::model::response::folder_responses::FolderResponse;
use crate::model::response::share_responses::{
    CreateShareResponse, CreatedShareResponse, GetShareResponse, ShareAuthResponse,
    SharedContentResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::share_service;
use crate::service::share_service::SharedContent;

/// how long a share unlock cookie lives
const SHARE_AUTH_TTL_SECONDS: i64 = 3600;

#[post("/", data = "<request>")]
pub fn create_share(
    request: Json<CreateShareRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> CreateShareResponse {
    match share_service::create_share(&request, requester.as_ref(), db) {
        Ok(share_url) => {
            CreateShareResponse::Success(Json::from(CreatedShareResponse { share_url }))
        }
        Err(CreateShareError::NotFoundOrForbidden) => CreateShareResponse::NotFound(
            BasicMessage::new("The file or folder could not be found."),
        ),
        Err(CreateShareError::NoValidFiles) => CreateShareResponse::BadRequest(BasicMessage::new(
            "None of the requested files can be shared.",
        )),
        Err(CreateShareError::TokenExhausted) => CreateShareResponse::Failure(BasicMessage::new(
            "Failed to generate a unique share URL. Check server logs for details",
        )),
        Err(CreateShareError::DbFailure) => CreateShareResponse::Failure(BasicMessage::new(
            "Failed to create share. Check server logs for details",
        )),
    }
}

#[post("/<token>/auth", data = "<request>")]
pub fn authenticate_share(
    token: &str,
    request: Json<ShareAuthRequest>,
    cookies: &CookieJar<'_>,
    db: &State<Db>,
) -> ShareAuthResponse {
    match share_service::authenticate_share(token, request.password.as_str(), db) {
        Ok(()) => {
            let cookie = Cookie::build((share_service::share_cookie_name(token), "true"))
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(UPLOAD_SERVER_CONFIG.server.production)
                .max_age(Duration::seconds(SHARE_AUTH_TTL_SECONDS))
                .path("/");
            cookies.add(cookie);
            ShareAuthResponse::Success(BasicMessage::new("Share unlocked."))
        }
        Err(ShareAuthError::NotFound) => {
            ShareAuthResponse::NotFound(BasicMessage::new("The share could not be found."))
        }
        Err(ShareAuthError::NoPasswordRequired) => ShareAuthResponse::NoPasswordRequired(
            BasicMessage::new("This share is not password protected."),
        ),
        Err(ShareAuthError::InvalidPassword) => {
            ShareAuthResponse::InvalidPassword(BasicMessage::new("Invalid password."))
        }
        Err(ShareAuthError::DbFailure) => ShareAuthResponse::Failure(BasicMessage::new(
            "Failed to authenticate share. Check server logs for details",
        )),
    }
}

#[get("/<token>")]
pub fn get_share(token: &str, cookies: &CookieJar<'_>, db: &State<Db>) -> GetShareResponse {
    let unlocked = cookies
        .get(share_service::share_cookie_name(token).as_str())
        .is_some();
    match share_service::get_share_content(token, unlocked, db) {
        Ok(SharedContent::Files(files)) => {
            let password_protected = files
                .first()
                .map(|f| f.share_password.is_some())
                .unwrap_or(false);
            GetShareResponse::Success(Json::from(SharedContentResponse {
                share_type: "file".to_string(),
                files: Some(files.iter().map(FileMetadataResponse::from).collect()),
                folder: None,
                password_protected,
            }))
        }
        Ok(SharedContent::Folder(folder, files)) => {
            let password_protected = folder.share_password.is_some();
            let mut folder_response = FolderResponse::from(&folder);
            folder_response.files(files);
            GetShareResponse::Success(Json::from(SharedContentResponse {
                share_type: "folder".to_string(),
                files: None,
                folder: Some(folder_response),
                password_protected,
            }))
        }
        Err(GetShareError::Unauthorized) => GetShareResponse::Unauthorized(BasicMessage::new(
            "This share requires a password.",
        )),
        Err(GetShareError::NotFound) => {
            GetShareResponse::NotFound(BasicMessage::new("The share could not be found."))
        }
        Err(GetShareError::DbFailure) => GetShareResponse::Failure(BasicMessage::new(
            "Failed to load share. Check server logs for details",
        )),
    }
}
