use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::guard::Requester;
use crate::model::repository::{FileRecord, Folder, Role, User};
use crate::repository::{file_repository, folder_repository, user_repository, Db};
use crate::service::{password_service, token_service};
use crate::storage::FileStore;

mod api_handler_tests;
mod cleanup_service_tests;
mod file_handler_tests;
mod file_service_tests;

/// username:password
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

/// wipes and re-creates this test thread's database file. Each test runs on
/// its own named thread, so tests never share a database
pub fn refresh_db() -> Db {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    let db = Db::new(format!("{thread_name}.sqlite"));
    db.initialize().unwrap();
    db
}

/// empty per-thread upload directory
pub fn refresh_store() -> FileStore {
    let thread_name = current_thread_name();
    remove_dir_all(Path::new(thread_name.as_str())).unwrap_or(());
    let store = FileStore::new(thread_name.as_str());
    store.init().unwrap();
    store
}

pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    remove_dir_all(Path::new(thread_name.as_str())).unwrap_or(());
}

pub fn create_user_db_entry(username: &str, password: &str, role: Role, db: &Db) -> Requester {
    let user = User {
        id: token_service::generate_id(),
        username: username.to_string(),
        password: password_service::hash_password(password).unwrap(),
        email: None,
        role,
        created_at: chrono::Utc::now().naive_utc(),
    };
    let con = db.open_connection();
    user_repository::create_user(&user, &con).unwrap();
    con.close().unwrap();
    Requester {
        id: user.id,
        username: user.username,
        role: user.role,
    }
}

pub fn create_file_db_entry(
    name: &str,
    user_id: Option<&str>,
    folder_id: Option<&str>,
    expires_at: Option<NaiveDateTime>,
    db: &Db,
) -> FileRecord {
    let id = token_service::generate_id();
    let record = FileRecord {
        id: id.clone(),
        name: name.to_string(),
        path: format!("{id}.txt"),
        size: 11,
        mime_type: Some("text/plain".to_string()),
        user_id: user_id.map(str::to_string),
        folder_id: folder_id.map(str::to_string),
        download_count: 0,
        share_url: None,
        share_password: None,
        expires_at,
        created_at: chrono::Utc::now().naive_utc(),
    };
    let con = db.open_connection();
    file_repository::create_file(&record, &con).unwrap();
    con.close().unwrap();
    record
}

pub fn create_folder_db_entry(name: &str, user_id: &str, db: &Db) -> Folder {
    let folder = Folder {
        id: token_service::generate_id(),
        name: name.to_string(),
        user_id: user_id.to_string(),
        share_url: None,
        share_password: None,
        created_at: chrono::Utc::now().naive_utc(),
    };
    let con = db.open_connection();
    folder_repository::create_folder(
        folder.id.as_str(),
        folder.name.as_str(),
        folder.user_id.as_str(),
        &con,
    )
    .unwrap();
    con.close().unwrap();
    folder
}

/// reloads a file row, panicking if it is gone
pub fn get_file(id: &str, db: &Db) -> FileRecord {
    let con = db.open_connection();
    let file = file_repository::get_by_id(id, &con).unwrap();
    con.close().unwrap();
    file
}

pub fn file_exists(id: &str, db: &Db) -> bool {
    let con = db.open_connection();
    let found = file_repository::get_by_id(id, &con);
    con.close().unwrap();
    match found {
        Ok(_) => true,
        Err(rusqlite::Error::QueryReturnedNoRows) => false,
        Err(e) => panic!("unexpected database error: {e:?}"),
    }
}

/// a timestamp safely in the past, for building already-expired files
pub fn yesterday() -> NaiveDateTime {
    chrono::Utc::now().naive_utc() - chrono::Duration::days(1)
}

/// a timestamp safely in the future
pub fn tomorrow() -> NaiveDateTime {
    chrono::Utc::now().naive_utc() + chrono::Duration::days(1)
}
