use std::backtrace::Backtrace;
use std::io::Cursor;

use rocket::fs::TempFile;
use rusqlite::Connection;

use crate::config::UPLOAD_SERVER_CONFIG;
use crate::guard::Requester;
use crate::model::error::file_errors::{
    DeleteFileError, DownloadFileError, GetGuestFilesError, MoveFilesError, UploadFileError,
    ZipDownloadError,
};
use crate::model::repository::FileRecord;
use crate::model::request::MoveFilesRequest;
use crate::repository::{file_repository, folder_repository, Db};
use crate::service::{days_from_now, token_service};
use crate::storage::FileStore;

/// persists every file in a multipart upload and records its metadata.
/// Guests get tighter count and size limits and their uploads expire
pub async fn save_files(
    files: &mut [TempFile<'_>],
    requester: Option<&Requester>,
    db: &Db,
    store: &FileStore,
) -> Result<Vec<FileRecord>, UploadFileError> {
    let limits = &UPLOAD_SERVER_CONFIG.uploads;
    let (max_files, max_size) = if requester.is_some() {
        (limits.user_max_files, limits.user_max_size_bytes)
    } else {
        (limits.guest_max_files, limits.guest_max_size_bytes)
    };
    if files.is_empty() {
        return Err(UploadFileError::MissingInfo);
    }
    if files.len() as u32 > max_files {
        return Err(UploadFileError::TooManyFiles(max_files));
    }
    for file in files.iter() {
        if file.len() > max_size {
            return Err(UploadFileError::TooLarge(max_size));
        }
    }
    let expires_at = if requester.is_none() {
        Some(days_from_now(limits.guest_expiry_days))
    } else {
        None
    };
    let con = db.open_connection();
    let mut saved: Vec<FileRecord> = Vec::new();
    for file in files.iter_mut() {
        let record = match build_record(file, requester, expires_at) {
            Ok(record) => record,
            Err(e) => {
                con.close().unwrap();
                return Err(e);
            }
        };
        if let Err(e) = store.persist(file, record.path.as_str()).await {
            log::error!(
                "Failed to write uploaded blob {}. Nested exception is {e:?}",
                record.path
            );
            con.close().unwrap();
            return Err(UploadFileError::FileSystemFailure);
        }
        if let Err(e) = file_repository::create_file(&record, &con) {
            log::error!(
                "Failed to save file record. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            // the blob just written is now orphaned; remove it so a failed
            // upload leaves nothing behind
            if let Err(e) = store.delete(record.path.as_str()) {
                log::warn!("Failed to remove blob {} after db error: {e:?}", record.path);
            }
            con.close().unwrap();
            return Err(UploadFileError::DbFailure);
        }
        saved.push(record);
    }
    con.close().unwrap();
    Ok(saved)
}

fn build_record(
    file: &TempFile<'_>,
    requester: Option<&Requester>,
    expires_at: Option<chrono::NaiveDateTime>,
) -> Result<FileRecord, UploadFileError> {
    let base_name = file.name().ok_or(UploadFileError::MissingInfo)?;
    let id = token_service::generate_id();
    let extension = file
        .content_type()
        .and_then(|c| c.extension())
        .map(|e| e.to_string());
    // the display name keeps what the client sent; the storage path is the
    // opaque id so collisions and traversal tricks are impossible
    let (name, path) = match extension {
        Some(ext) => (format!("{base_name}.{ext}"), format!("{id}.{ext}")),
        None => (base_name.to_string(), id.clone()),
    };
    Ok(FileRecord {
        id,
        name,
        path,
        size: file.len(),
        mime_type: file.content_type().map(|c| c.to_string()),
        user_id: requester.map(|r| r.id.clone()),
        folder_id: None,
        download_count: 0,
        share_url: None,
        share_password: None,
        expires_at,
        created_at: chrono::Utc::now().naive_utc(),
    })
}

/// loads the metadata needed to serve a download. Expired files 404
pub fn get_for_download(id: &str, db: &Db) -> Result<FileRecord, DownloadFileError> {
    let con = db.open_connection();
    let file = file_repository::get_by_id_not_expired(id, &con);
    con.close().unwrap();
    match file {
        Ok(file) => Ok(file),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(DownloadFileError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to load file for download. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DownloadFileError::DbFailure)
        }
    }
}

/// bumps the download counter and opens the blob for streaming
pub fn open_download(
    record: &FileRecord,
    db: &Db,
    store: &FileStore,
) -> Result<std::fs::File, DownloadFileError> {
    let con = db.open_connection();
    let counted = file_repository::increment_download_count(record.id.as_str(), &con);
    con.close().unwrap();
    if let Err(e) = counted {
        log::error!(
            "Failed to increment download count. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(DownloadFileError::DbFailure);
    }
    store.open(record.path.as_str()).map_err(|e| {
        log::error!("Failed to open blob {}. Nested exception is {e:?}", record.path);
        DownloadFileError::FileSystemFailure
    })
}

/// bundles the requested files into one zip archive, scoped the same way as
/// the guest listing: anonymous callers get unowned files, signed-in callers
/// their own. Every file that makes it into the archive counts as a download
pub fn zip_files(
    ids: &[String],
    requester: Option<&Requester>,
    db: &Db,
    store: &FileStore,
) -> Result<Vec<u8>, ZipDownloadError> {
    if ids.is_empty() {
        return Err(ZipDownloadError::NotFound);
    }
    let con = db.open_connection();
    let result = build_archive(ids, requester, store, &con);
    con.close().unwrap();
    result
}

fn build_archive(
    ids: &[String],
    requester: Option<&Requester>,
    store: &FileStore,
    con: &Connection,
) -> Result<Vec<u8>, ZipDownloadError> {
    let files = file_repository::get_downloadable(ids, requester.map(|r| r.id.as_str()), con)
        .map_err(|e| {
            log::error!(
                "Failed to load files for bulk download. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            ZipDownloadError::DbFailure
        })?;
    if files.is_empty() {
        return Err(ZipDownloadError::NotFound);
    }
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    let mut archived = 0u32;
    for file in files.iter() {
        let mut blob = match store.open(file.path.as_str()) {
            Ok(blob) => blob,
            Err(e) => {
                // a vanished blob drops out of the archive instead of
                // failing the whole batch
                log::warn!("Skipping missing blob {} during bulk download: {e:?}", file.path);
                continue;
            }
        };
        if let Err(e) = writer.start_file(file.name.as_str(), options) {
            log::error!(
                "Failed to add {} to the archive. Nested exception is {e:?}",
                file.name
            );
            return Err(ZipDownloadError::ArchiveFailure);
        }
        if let Err(e) = std::io::copy(&mut blob, &mut writer) {
            log::error!(
                "Failed to write {} into the archive. Nested exception is {e:?}",
                file.name
            );
            return Err(ZipDownloadError::ArchiveFailure);
        }
        if let Err(e) = file_repository::increment_download_count(file.id.as_str(), con) {
            log::error!(
                "Failed to increment download count. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(ZipDownloadError::DbFailure);
        }
        archived += 1;
    }
    if archived == 0 {
        return Err(ZipDownloadError::NotFound);
    }
    match writer.finish() {
        Ok(cursor) => Ok(cursor.into_inner()),
        Err(e) => {
            log::error!("Failed to finalize the archive. Nested exception is {e:?}");
            Err(ZipDownloadError::ArchiveFailure)
        }
    }
}

/// removes a file row and then its blob. Unowned files can be deleted by
/// anyone; owned files only by their owner or an admin. The row goes first
/// and the blob delete is best effort
pub fn delete_file(
    id: &str,
    requester: Option<&Requester>,
    db: &Db,
    store: &FileStore,
) -> Result<(), DeleteFileError> {
    let con = db.open_connection();
    let result = delete_file_record(id, requester, &con);
    con.close().unwrap();
    let file = result?;
    if let Err(e) = store.delete(file.path.as_str()) {
        log::warn!(
            "Failed to remove blob {} after deleting its record: {e:?}",
            file.path
        );
    }
    Ok(())
}

fn delete_file_record(
    id: &str,
    requester: Option<&Requester>,
    con: &Connection,
) -> Result<FileRecord, DeleteFileError> {
    let file = match file_repository::get_by_id(id, con) {
        Ok(file) => file,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DeleteFileError::NotFound),
        Err(e) => return Err(map_delete_error(e)),
    };
    let allowed = match (&file.user_id, requester) {
        (None, _) => true,
        (Some(owner), Some(requester)) => *owner == requester.id || requester.is_admin(),
        (Some(_), None) => false,
    };
    if !allowed {
        // a forbidden file looks exactly like a missing one
        return Err(DeleteFileError::NotFound);
    }
    file_repository::delete_by_id(id, con).map_err(map_delete_error)?;
    Ok(file)
}

fn map_delete_error(e: rusqlite::Error) -> DeleteFileError {
    log::error!(
        "Failed to delete file. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    DeleteFileError::DbFailure
}

/// moves a batch of the requester's files into one of their folders, or back
/// to the root, all or nothing
pub fn move_files(
    request: &MoveFilesRequest,
    requester: &Requester,
    db: &Db,
) -> Result<(), MoveFilesError> {
    let mut con = db.open_connection();
    let result = move_file_records(request, requester, &mut con);
    con.close().unwrap();
    result
}

fn move_file_records(
    request: &MoveFilesRequest,
    requester: &Requester,
    con: &mut Connection,
) -> Result<(), MoveFilesError> {
    if request.file_ids.is_empty() {
        return Err(MoveFilesError::NotFound);
    }
    let tx = con.transaction().map_err(map_move_error)?;
    let owned = file_repository::count_owned(&request.file_ids, requester.id.as_str(), &tx)
        .map_err(map_move_error)?;
    if owned as usize != request.file_ids.len() {
        return Err(MoveFilesError::NotFound);
    }
    if let Some(folder_id) = request.folder_id.as_deref() {
        match folder_repository::get_by_id_and_user(folder_id, requester.id.as_str(), &tx) {
            Ok(_) => {}
            Err(rusqlite::Error::QueryReturnedNoRows) => return Err(MoveFilesError::NotFound),
            Err(e) => return Err(map_move_error(e)),
        }
    }
    file_repository::move_to_folder(
        &request.file_ids,
        request.folder_id.as_deref(),
        requester.id.as_str(),
        &tx,
    )
    .map_err(map_move_error)?;
    tx.commit().map_err(map_move_error)
}

fn map_move_error(e: rusqlite::Error) -> MoveFilesError {
    log::error!(
        "Failed to move files. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    MoveFilesError::DbFailure
}

/// metadata listing for an anonymous uploader's own files. Only unowned,
/// unexpired ids come back; anything else is silently dropped
pub fn get_guest_files(ids: &[String], db: &Db) -> Result<Vec<FileRecord>, GetGuestFilesError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let con = db.open_connection();
    let files = file_repository::get_guest_files(ids, &con);
    con.close().unwrap();
    files.map_err(|e| {
        log::error!(
            "Failed to list guest files. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetGuestFilesError::DbFailure
    })
}
