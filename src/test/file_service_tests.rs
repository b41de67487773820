use crate::model::error::file_errors::{DeleteFileError, DownloadFileError, MoveFilesError};
use crate::model::repository::Role;
use crate::model::request::MoveFilesRequest;
use crate::service::file_service;
use crate::test::{
    cleanup, create_file_db_entry, create_folder_db_entry, create_user_db_entry, file_exists,
    get_file, refresh_db, refresh_store, yesterday,
};

#[test]
fn anyone_can_delete_an_unowned_file() {
    let db = refresh_db();
    let store = refresh_store();
    let file = create_file_db_entry("drop.txt", None, None, None, &db);
    store.write(file.path.as_str(), b"hello world").unwrap();
    file_service::delete_file(file.id.as_str(), None, &db, &store).unwrap();
    assert!(!file_exists(file.id.as_str(), &db));
    assert!(store.open(file.path.as_str()).is_err());
    cleanup();
}

#[test]
fn owner_can_delete_their_file() {
    let db = refresh_db();
    let store = refresh_store();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let file = create_file_db_entry("mine.txt", Some(owner.id.as_str()), None, None, &db);
    store.write(file.path.as_str(), b"hello world").unwrap();
    file_service::delete_file(file.id.as_str(), Some(&owner), &db, &store).unwrap();
    assert!(!file_exists(file.id.as_str(), &db));
    cleanup();
}

#[test]
fn non_owner_cannot_delete_a_file() {
    let db = refresh_db();
    let store = refresh_store();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let other = create_user_db_entry("other", "password", Role::User, &db);
    let file = create_file_db_entry("mine.txt", Some(owner.id.as_str()), None, None, &db);
    let result = file_service::delete_file(file.id.as_str(), Some(&other), &db, &store);
    assert_eq!(Err(DeleteFileError::NotFound), result);
    assert!(file_exists(file.id.as_str(), &db));
    let result = file_service::delete_file(file.id.as_str(), None, &db, &store);
    assert_eq!(Err(DeleteFileError::NotFound), result);
    assert!(file_exists(file.id.as_str(), &db));
    cleanup();
}

#[test]
fn admin_can_delete_any_file() {
    let db = refresh_db();
    let store = refresh_store();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let admin = create_user_db_entry("admin", "password", Role::Admin, &db);
    let file = create_file_db_entry("mine.txt", Some(owner.id.as_str()), None, None, &db);
    file_service::delete_file(file.id.as_str(), Some(&admin), &db, &store).unwrap();
    assert!(!file_exists(file.id.as_str(), &db));
    cleanup();
}

#[test]
fn delete_succeeds_when_the_blob_is_already_gone() {
    let db = refresh_db();
    let store = refresh_store();
    let file = create_file_db_entry("drop.txt", None, None, None, &db);
    // no blob written; the record must still go away
    file_service::delete_file(file.id.as_str(), None, &db, &store).unwrap();
    assert!(!file_exists(file.id.as_str(), &db));
    cleanup();
}

#[test]
fn deleting_a_missing_file_is_not_found() {
    let db = refresh_db();
    let store = refresh_store();
    let result = file_service::delete_file("nope", None, &db, &store);
    assert_eq!(Err(DeleteFileError::NotFound), result);
    cleanup();
}

#[test]
fn expired_files_cannot_be_downloaded() {
    let db = refresh_db();
    let file = create_file_db_entry("old.txt", None, None, Some(yesterday()), &db);
    let result = file_service::get_for_download(file.id.as_str(), &db);
    assert_eq!(Err(DownloadFileError::NotFound), result);
    cleanup();
}

#[test]
fn downloads_bump_the_counter() {
    let db = refresh_db();
    let store = refresh_store();
    let file = create_file_db_entry("hits.txt", None, None, None, &db);
    store.write(file.path.as_str(), b"hello world").unwrap();
    let record = file_service::get_for_download(file.id.as_str(), &db).unwrap();
    file_service::open_download(&record, &db, &store).unwrap();
    file_service::open_download(&record, &db, &store).unwrap();
    assert_eq!(2, get_file(file.id.as_str(), &db).download_count);
    cleanup();
}

#[test]
fn move_files_moves_owned_files() {
    let db = refresh_db();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let folder = create_folder_db_entry("docs", owner.id.as_str(), &db);
    let file = create_file_db_entry("a.txt", Some(owner.id.as_str()), None, None, &db);
    let request = MoveFilesRequest {
        file_ids: vec![file.id.clone()],
        folder_id: Some(folder.id.clone()),
    };
    file_service::move_files(&request, &owner, &db).unwrap();
    assert_eq!(Some(folder.id), get_file(file.id.as_str(), &db).folder_id);
    cleanup();
}

#[test]
fn move_files_back_to_the_root() {
    let db = refresh_db();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let folder = create_folder_db_entry("docs", owner.id.as_str(), &db);
    let file = create_file_db_entry(
        "a.txt",
        Some(owner.id.as_str()),
        Some(folder.id.as_str()),
        None,
        &db,
    );
    let request = MoveFilesRequest {
        file_ids: vec![file.id.clone()],
        folder_id: None,
    };
    file_service::move_files(&request, &owner, &db).unwrap();
    assert_eq!(None, get_file(file.id.as_str(), &db).folder_id);
    cleanup();
}

#[test]
fn move_files_is_all_or_nothing() {
    let db = refresh_db();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let other = create_user_db_entry("other", "password", Role::User, &db);
    let folder = create_folder_db_entry("docs", owner.id.as_str(), &db);
    let mine = create_file_db_entry("mine.txt", Some(owner.id.as_str()), None, None, &db);
    let theirs = create_file_db_entry("theirs.txt", Some(other.id.as_str()), None, None, &db);
    let request = MoveFilesRequest {
        file_ids: vec![mine.id.clone(), theirs.id.clone()],
        folder_id: Some(folder.id.clone()),
    };
    let result = file_service::move_files(&request, &owner, &db);
    assert_eq!(Err(MoveFilesError::NotFound), result);
    assert_eq!(None, get_file(mine.id.as_str(), &db).folder_id);
    cleanup();
}

#[test]
fn move_files_rejects_a_foreign_folder() {
    let db = refresh_db();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let other = create_user_db_entry("other", "password", Role::User, &db);
    let foreign_folder = create_folder_db_entry("docs", other.id.as_str(), &db);
    let file = create_file_db_entry("a.txt", Some(owner.id.as_str()), None, None, &db);
    let request = MoveFilesRequest {
        file_ids: vec![file.id.clone()],
        folder_id: Some(foreign_folder.id.clone()),
    };
    let result = file_service::move_files(&request, &owner, &db);
    assert_eq!(Err(MoveFilesError::NotFound), result);
    assert_eq!(None, get_file(file.id.as_str(), &db).folder_id);
    cleanup();
}

#[test]
fn guest_listing_skips_owned_and_expired_files() {
    let db = refresh_db();
    let owner = create_user_db_entry("username", "password", Role::User, &db);
    let unowned = create_file_db_entry("a.txt", None, None, None, &db);
    let owned = create_file_db_entry("b.txt", Some(owner.id.as_str()), None, None, &db);
    let expired = create_file_db_entry("c.txt", None, None, Some(yesterday()), &db);
    let ids = vec![unowned.id.clone(), owned.id.clone(), expired.id.clone()];
    let files = file_service::get_guest_files(&ids, &db).unwrap();
    assert_eq!(1, files.len());
    assert_eq!(unowned.id, files[0].id);
    cleanup();
}
