use rocket::serde::json::Json;
use rocket::State;

use crate::guard::Requester;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, GetFolderError, UpdateFolderError,
};
use crate::model::request::{CreateFolderRequest, UpdateFolderRequest};
use crate::model::response::folder_responses::{
    CreateFolderResponse, DeleteFolderResponse, FolderResponse, GetFolderResponse,
    ListFoldersResponse, UpdateFolderResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::folder_service;
use crate::storage::FileStore;

#[post("/", data = "<request>")]
pub fn create_folder(
    request: Json<CreateFolderRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> CreateFolderResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return CreateFolderResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match folder_service::create_folder(request.name.as_str(), &requester, db) {
        Ok(folder) => CreateFolderResponse::Success(Json::from(FolderResponse::from(&folder))),
        Err(CreateFolderError::AlreadyExists) => CreateFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder name is already in use."),
        ),
        Err(CreateFolderError::DbFailure) => CreateFolderResponse::FolderDbError(
            BasicMessage::new("Failed to create folder. Check server logs for details"),
        ),
    }
}

#[get("/")]
pub fn get_folders(requester: Option<Requester>, db: &State<Db>) -> ListFoldersResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return ListFoldersResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match folder_service::get_folders(&requester, db) {
        Ok(folders) => {
            let folders: Vec<FolderResponse> = folders
                .iter()
                .map(|(folder, file_count)| {
                    let mut response = FolderResponse::from(folder);
                    response.file_count = *file_count;
                    response
                })
                .collect();
            ListFoldersResponse::Success(Json::from(folders))
        }
        Err(_) => ListFoldersResponse::FolderDbError(BasicMessage::new(
            "Failed to list folders. Check server logs for details",
        )),
    }
}

#[get("/<id>")]
pub fn get_folder(id: &str, requester: Option<Requester>, db: &State<Db>) -> GetFolderResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return GetFolderResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match folder_service::get_folder(id, &requester, db) {
        Ok((folder, files)) => {
            let mut response = FolderResponse::from(&folder);
            response.files(files);
            GetFolderResponse::Success(Json::from(response))
        }
        Err(GetFolderError::NotFound) => {
            GetFolderResponse::FolderNotFound(BasicMessage::new("The folder could not be found."))
        }
        Err(GetFolderError::DbFailure) => GetFolderResponse::FolderDbError(BasicMessage::new(
            "Failed to load folder. Check server logs for details",
        )),
    }
}

#[patch("/<id>", data = "<request>")]
pub fn update_folder(
    id: &str,
    request: Json<UpdateFolderRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> UpdateFolderResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return UpdateFolderResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match folder_service::rename_folder(id, request.name.as_str(), &requester, db) {
        Ok(()) => match folder_service::get_folder(id, &requester, db) {
            Ok((folder, files)) => {
                let mut response = FolderResponse::from(&folder);
                response.files(files);
                UpdateFolderResponse::Success(Json::from(response))
            }
            Err(_) => UpdateFolderResponse::FolderDbError(BasicMessage::new(
                "Failed to load folder after rename. Check server logs for details",
            )),
        },
        Err(UpdateFolderError::NotFound) => UpdateFolderResponse::FolderNotFound(
            BasicMessage::new("The folder could not be found."),
        ),
        Err(UpdateFolderError::AlreadyExists) => UpdateFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder name is already in use."),
        ),
        Err(UpdateFolderError::DbFailure) => UpdateFolderResponse::FolderDbError(
            BasicMessage::new("Failed to rename folder. Check server logs for details"),
        ),
    }
}

#[delete("/<id>")]
pub fn delete_folder(
    id: &str,
    requester: Option<Requester>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> DeleteFolderResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return DeleteFolderResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match folder_service::delete_folder(id, &requester, db, store) {
        Ok(()) => DeleteFolderResponse::Success(()),
        Err(DeleteFolderError::NotFound) => DeleteFolderResponse::FolderNotFound(
            BasicMessage::new("The folder could not be found."),
        ),
        Err(DeleteFolderError::DbFailure) => DeleteFolderResponse::FolderDbError(
            BasicMessage::new("Failed to delete folder. Check server logs for details"),
        ),
    }
}
