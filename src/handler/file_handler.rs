use rocket::form::Form;
use rocket::http::{ContentType, CookieJar, Header};
use rocket::serde::json::Json;
use rocket::State;

use crate::guard::Requester;
use crate::model::error::file_errors::{
    DeleteFileError, DownloadFileError, GetGuestFilesError, MoveFilesError, UploadFileError,
    ZipDownloadError,
};
use crate::model::request::{BulkDownloadRequest, FileUpload, MoveFilesRequest};
use crate::model::response::file_responses::{
    DeleteFileResponse, DownloadFileResponse, FileMetadataResponse, GetGuestFilesResponse,
    MoveFilesResponse, UploadFileResponse, UploadedFilesResponse, ZipDownloadResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::{file_service, share_service};
use crate::storage::FileStore;

#[post("/", data = "<upload>")]
pub async fn upload_files(
    upload: Form<FileUpload<'_>>,
    requester: Option<Requester>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> UploadFileResponse {
    let mut upload = upload.into_inner();
    match file_service::save_files(&mut upload.files, requester.as_ref(), db, store).await {
        Ok(saved) => UploadFileResponse::Success(Json::from(UploadedFilesResponse {
            files: saved.iter().map(FileMetadataResponse::from).collect(),
        })),
        Err(UploadFileError::TooManyFiles(max)) => UploadFileResponse::BadRequest(
            BasicMessage::new(format!("A maximum of {max} files may be uploaded at once.").as_str()),
        ),
        Err(UploadFileError::TooLarge(max)) => UploadFileResponse::BadRequest(BasicMessage::new(
            format!("Files may not be larger than {max} bytes.").as_str(),
        )),
        Err(UploadFileError::MissingInfo) => UploadFileResponse::BadRequest(BasicMessage::new(
            "No named files were included in the upload.",
        )),
        Err(UploadFileError::FileSystemFailure) | Err(UploadFileError::DbFailure) => {
            UploadFileResponse::Failure(BasicMessage::new(
                "Failed to save upload. Check server logs for details",
            ))
        }
    }
}

/// streams a file back. Files that belong to a password-protected share
/// require the share's unlock cookie; the owner's credentials work too
#[get("/<id>/download")]
pub fn download_file(
    id: &str,
    requester: Option<Requester>,
    cookies: &CookieJar<'_>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> DownloadFileResponse {
    let record = match file_service::get_for_download(id, db) {
        Ok(record) => record,
        Err(DownloadFileError::NotFound) => {
            return DownloadFileResponse::FileNotFound(BasicMessage::new(
                "The file could not be found.",
            ))
        }
        Err(_) => {
            return DownloadFileResponse::Failure(BasicMessage::new(
                "Failed to load file. Check server logs for details",
            ))
        }
    };
    if let (Some(token), Some(_)) = (record.share_url.as_deref(), record.share_password.as_deref())
    {
        let unlocked = cookies
            .get(share_service::share_cookie_name(token).as_str())
            .is_some();
        let is_owner = match (&record.user_id, &requester) {
            (Some(owner), Some(requester)) => *owner == requester.id || requester.is_admin(),
            _ => false,
        };
        if !unlocked && !is_owner {
            return DownloadFileResponse::Unauthorized(BasicMessage::new(
                "This file requires a password.",
            ));
        }
    }
    match file_service::open_download(&record, db, store) {
        Ok(blob) => {
            let content_type = record
                .mime_type
                .as_deref()
                .and_then(ContentType::parse_flexible)
                .unwrap_or(ContentType::Binary);
            let disposition = Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", record.name),
            );
            DownloadFileResponse::Success(blob, content_type, disposition)
        }
        Err(DownloadFileError::FileSystemFailure) => DownloadFileResponse::FileNotFound(
            BasicMessage::new("The file contents are no longer available."),
        ),
        Err(_) => DownloadFileResponse::Failure(BasicMessage::new(
            "Failed to open file. Check server logs for details",
        )),
    }
}

/// bundles several files into one zip download. Anonymous callers can pull
/// their guest uploads; signed-in callers their own files
#[post("/download", data = "<request>")]
pub fn download_files(
    request: Json<BulkDownloadRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> ZipDownloadResponse {
    match file_service::zip_files(&request.file_ids, requester.as_ref(), db, store) {
        Ok(archive) => ZipDownloadResponse::Success(
            archive,
            ContentType::ZIP,
            Header::new("Content-Disposition", "attachment; filename=\"files.zip\""),
        ),
        Err(ZipDownloadError::NotFound) => ZipDownloadResponse::NotFound(BasicMessage::new(
            "None of the requested files could be found.",
        )),
        Err(ZipDownloadError::ArchiveFailure) | Err(ZipDownloadError::DbFailure) => {
            ZipDownloadResponse::Failure(BasicMessage::new(
                "Failed to build the archive. Check server logs for details",
            ))
        }
    }
}

#[delete("/<id>")]
pub fn delete_file(
    id: &str,
    requester: Option<Requester>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> DeleteFileResponse {
    match file_service::delete_file(id, requester.as_ref(), db, store) {
        Ok(()) => DeleteFileResponse::Deleted(()),
        Err(DeleteFileError::NotFound) => {
            DeleteFileResponse::NotFound(BasicMessage::new("The file could not be found."))
        }
        Err(DeleteFileError::DbFailure) => DeleteFileResponse::Failure(BasicMessage::new(
            "Failed to delete file. Check server logs for details",
        )),
    }
}

#[post("/move", data = "<request>")]
pub fn move_files(
    request: Json<MoveFilesRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> MoveFilesResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return MoveFilesResponse::Unauthorized("Bad Credentials".to_string()),
    };
    match file_service::move_files(&request, &requester, db) {
        Ok(()) => MoveFilesResponse::Moved(()),
        Err(MoveFilesError::NotFound) => MoveFilesResponse::NotFound(BasicMessage::new(
            "One or more files, or the target folder, could not be found.",
        )),
        Err(MoveFilesError::DbFailure) => MoveFilesResponse::Failure(BasicMessage::new(
            "Failed to move files. Check server logs for details",
        )),
    }
}

/// lets an anonymous uploader list the files they uploaded, by id
#[get("/guest?<ids>")]
pub fn get_guest_files(ids: &str, db: &State<Db>) -> GetGuestFilesResponse {
    let ids: Vec<String> = ids
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    match file_service::get_guest_files(&ids, db) {
        Ok(files) => GetGuestFilesResponse::Success(Json::from(UploadedFilesResponse {
            files: files.iter().map(FileMetadataResponse::from).collect(),
        })),
        Err(GetGuestFilesError::DbFailure) => GetGuestFilesResponse::Failure(BasicMessage::new(
            "Failed to list files. Check server logs for details",
        )),
    }
}
