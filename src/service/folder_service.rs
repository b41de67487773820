use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::guard::Requester;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, GetFolderError, UpdateFolderError,
};
use crate::model::repository::{FileRecord, Folder};
use crate::repository::{file_repository, folder_repository, Db};
use crate::service::token_service;
use crate::storage::FileStore;

pub fn create_folder(
    name: &str,
    requester: &Requester,
    db: &Db,
) -> Result<Folder, CreateFolderError> {
    let con = db.open_connection();
    let result = create_folder_record(name, requester, &con);
    con.close().unwrap();
    result
}

fn create_folder_record(
    name: &str,
    requester: &Requester,
    con: &Connection,
) -> Result<Folder, CreateFolderError> {
    match folder_repository::name_exists(name, requester.id.as_str(), con) {
        Ok(true) => return Err(CreateFolderError::AlreadyExists),
        Ok(false) => {}
        Err(e) => return Err(map_create_error(e)),
    }
    let id = token_service::generate_id();
    match folder_repository::create_folder(id.as_str(), name, requester.id.as_str(), con) {
        Ok(()) => Ok(Folder {
            id,
            name: name.to_string(),
            user_id: requester.id.clone(),
            share_url: None,
            share_password: None,
            created_at: chrono::Utc::now().naive_utc(),
        }),
        // the unique constraint catches a race the pre-check missed
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(CreateFolderError::AlreadyExists)
        }
        Err(e) => Err(map_create_error(e)),
    }
}

fn map_create_error(e: rusqlite::Error) -> CreateFolderError {
    log::error!(
        "Failed to create folder. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    CreateFolderError::DbFailure
}

/// a folder and the live files inside it. Foreign folders 404
pub fn get_folder(
    id: &str,
    requester: &Requester,
    db: &Db,
) -> Result<(Folder, Vec<FileRecord>), GetFolderError> {
    let con = db.open_connection();
    let result = load_folder(id, requester, &con);
    con.close().unwrap();
    result
}

fn load_folder(
    id: &str,
    requester: &Requester,
    con: &Connection,
) -> Result<(Folder, Vec<FileRecord>), GetFolderError> {
    let folder = match folder_repository::get_by_id_and_user(id, requester.id.as_str(), con) {
        Ok(folder) => folder,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(GetFolderError::NotFound),
        Err(e) => return Err(map_get_error(e)),
    };
    let files =
        file_repository::get_files_in_folder(folder.id.as_str(), con).map_err(map_get_error)?;
    Ok((folder, files))
}

fn map_get_error(e: rusqlite::Error) -> GetFolderError {
    log::error!(
        "Failed to load folder. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    GetFolderError::DbFailure
}

/// every folder the requester owns, with a file count for each
pub fn get_folders(requester: &Requester, db: &Db) -> Result<Vec<(Folder, u32)>, GetFolderError> {
    let con = db.open_connection();
    let folders = folder_repository::get_folders_for_user(requester.id.as_str(), &con);
    con.close().unwrap();
    folders.map_err(map_get_error)
}

pub fn rename_folder(
    id: &str,
    name: &str,
    requester: &Requester,
    db: &Db,
) -> Result<(), UpdateFolderError> {
    let con = db.open_connection();
    let result = rename_folder_record(id, name, requester, &con);
    con.close().unwrap();
    result
}

fn rename_folder_record(
    id: &str,
    name: &str,
    requester: &Requester,
    con: &Connection,
) -> Result<(), UpdateFolderError> {
    match folder_repository::rename(id, requester.id.as_str(), name, con) {
        Ok(0) => Err(UpdateFolderError::NotFound),
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(UpdateFolderError::AlreadyExists)
        }
        Err(e) => {
            log::error!(
                "Failed to rename folder. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(UpdateFolderError::DbFailure)
        }
    }
}

/// removes a folder and every file row inside it in one transaction, then
/// removes the blobs. The path snapshot is taken inside the transaction so
/// the blob list matches exactly the rows being deleted; blob removal after
/// commit is best effort
pub fn delete_folder(
    id: &str,
    requester: &Requester,
    db: &Db,
    store: &FileStore,
) -> Result<(), DeleteFolderError> {
    let mut con = db.open_connection();
    let result = delete_folder_records(id, requester, &mut con);
    con.close().unwrap();
    let paths = result?;
    for path in paths.iter() {
        if let Err(e) = store.delete(path) {
            log::warn!("Failed to remove blob {path} after folder delete: {e:?}");
        }
    }
    Ok(())
}

fn delete_folder_records(
    id: &str,
    requester: &Requester,
    con: &mut Connection,
) -> Result<Vec<String>, DeleteFolderError> {
    let tx = con.transaction().map_err(map_delete_error)?;
    let paths = file_repository::get_paths_in_folder(id, requester.id.as_str(), &tx)
        .map_err(map_delete_error)?;
    file_repository::delete_files_in_folder(id, requester.id.as_str(), &tx)
        .map_err(map_delete_error)?;
    let affected = folder_repository::delete_by_id_and_user(id, requester.id.as_str(), &tx)
        .map_err(map_delete_error)?;
    if affected == 0 {
        // missing or foreign folder; dropping the transaction undoes the
        // file deletes
        return Err(DeleteFolderError::NotFound);
    }
    tx.commit().map_err(map_delete_error)?;
    Ok(paths)
}

fn map_delete_error(e: rusqlite::Error) -> DeleteFolderError {
    log::error!(
        "Failed to delete folder. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    DeleteFolderError::DbFailure
}
