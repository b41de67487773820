use std::backtrace::Backtrace;

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::config::UPLOAD_SERVER_CONFIG;
use crate::guard::Requester;
use crate::model::error::share_errors::{
    CreateShareError, GetShareError, ShareAuthError, TokenError,
};
use crate::model::repository::{FileRecord, Folder};
use crate::model::request::{CreateShareRequest, ShareType};
use crate::repository::{file_repository, folder_repository, Db};
use crate::service::{days_from_now, password_service, token_service};

/// name of the cookie proving a visitor unlocked a password-protected share
pub fn share_cookie_name(token: &str) -> String {
    format!("share_auth_{token}")
}

/// what a share token resolves to
#[derive(Debug, PartialEq)]
pub enum SharedContent {
    /// a single-file or bulk share; every record carries the same token
    Files(Vec<FileRecord>),
    /// a folder share along with the live files inside it
    Folder(Folder, Vec<FileRecord>),
}

/// applies a share to a file, a set of unowned files, or a folder, and
/// returns the full public URL for it. The token is drawn before the write
/// transaction opens; the retry loop only ever reads
pub fn create_share(
    request: &CreateShareRequest,
    requester: Option<&Requester>,
    db: &Db,
) -> Result<String, CreateShareError> {
    let password_hash = match request.password.as_deref() {
        Some(password) if !password.is_empty() => {
            match password_service::hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    log::error!("Failed to hash share password. Nested exception is {e:?}");
                    return Err(CreateShareError::DbFailure);
                }
            }
        }
        _ => None,
    };
    let expires_at = request.expires_in.map(days_from_now);
    let mut con = db.open_connection();
    let token = generate_token(&con);
    let result = token.and_then(|token| {
        apply_share(
            request,
            requester,
            token.as_str(),
            password_hash.as_deref(),
            expires_at,
            &mut con,
        )
        .map(|_| token)
    });
    con.close().unwrap();
    let token = result?;
    Ok(format!(
        "{}/share/{token}",
        UPLOAD_SERVER_CONFIG.server.app_url
    ))
}

fn generate_token(con: &Connection) -> Result<String, CreateShareError> {
    match token_service::generate_unique_share_token(con) {
        Ok(token) => Ok(token),
        Err(TokenError::Exhausted) => Err(CreateShareError::TokenExhausted),
        Err(TokenError::DbFailure) => Err(CreateShareError::DbFailure),
    }
}

fn apply_share(
    request: &CreateShareRequest,
    requester: Option<&Requester>,
    token: &str,
    password_hash: Option<&str>,
    expires_at: Option<NaiveDateTime>,
    con: &mut Connection,
) -> Result<(), CreateShareError> {
    let tx = con.transaction().map_err(map_share_error)?;
    match request.share_type {
        // a global share stamps the token onto every eligible unowned file
        ShareType::File if request.is_global => {
            let ids = request.file_ids.clone().unwrap_or_default();
            if ids.is_empty() {
                return Err(CreateShareError::NoValidFiles);
            }
            let eligible =
                file_repository::get_unowned_unexpired_ids(&ids, &tx).map_err(map_share_error)?;
            if eligible.is_empty() {
                return Err(CreateShareError::NoValidFiles);
            }
            file_repository::set_share_bulk(&eligible, token, password_hash, expires_at, &tx)
                .map_err(map_share_error)?;
        }
        ShareType::File => {
            let id = request
                .id
                .as_deref()
                .ok_or(CreateShareError::NotFoundOrForbidden)?;
            let owner = requester.map(|r| r.id.as_str());
            let affected = file_repository::set_share(id, owner, token, password_hash, expires_at, &tx)
                .map_err(map_share_error)?;
            if affected == 0 {
                // either no such file, or it belongs to someone else; the
                // dropped transaction rolls nothing back since nothing matched
                return Err(CreateShareError::NotFoundOrForbidden);
            }
        }
        ShareType::Folder => {
            // folder shares always require an owner; folders never expire
            let requester = requester.ok_or(CreateShareError::NotFoundOrForbidden)?;
            let id = request
                .id
                .as_deref()
                .ok_or(CreateShareError::NotFoundOrForbidden)?;
            let affected =
                folder_repository::set_share(id, requester.id.as_str(), token, password_hash, &tx)
                    .map_err(map_share_error)?;
            if affected == 0 {
                return Err(CreateShareError::NotFoundOrForbidden);
            }
        }
    }
    tx.commit().map_err(map_share_error)
}

fn map_share_error(e: rusqlite::Error) -> CreateShareError {
    log::error!(
        "Failed to apply share. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    CreateShareError::DbFailure
}

/// checks a visitor's password against a share. Success means the caller may
/// hand out an unlock cookie for the token
pub fn authenticate_share(token: &str, password: &str, db: &Db) -> Result<(), ShareAuthError> {
    let con = db.open_connection();
    let stored = lookup_share_password(token, &con);
    con.close().unwrap();
    match stored? {
        None => Err(ShareAuthError::NoPasswordRequired),
        Some(hash) => match password_service::verify_password(password, hash.as_str()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ShareAuthError::InvalidPassword),
            Err(e) => {
                log::error!("Stored share password hash is unreadable. Nested exception is {e:?}");
                Err(ShareAuthError::DbFailure)
            }
        },
    }
}

/// finds whichever side of the token space the token lives in and returns its
/// password hash. Expired files do not count as carrying the token
fn lookup_share_password(
    token: &str,
    con: &Connection,
) -> Result<Option<String>, ShareAuthError> {
    let files = file_repository::get_by_share_url(token, con).map_err(map_auth_error)?;
    if let Some(file) = files.first() {
        // bulk shares stamp the same hash onto every row
        return Ok(file.share_password.clone());
    }
    match folder_repository::get_by_share_url(token, con) {
        Ok(folder) => Ok(folder.share_password),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ShareAuthError::NotFound),
        Err(e) => Err(map_auth_error(e)),
    }
}

fn map_auth_error(e: rusqlite::Error) -> ShareAuthError {
    log::error!(
        "Failed to authenticate share. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    ShareAuthError::DbFailure
}

/// resolves a token to its shared content. `unlocked` says whether the
/// visitor presented a valid unlock cookie for this token
pub fn get_share_content(
    token: &str,
    unlocked: bool,
    db: &Db,
) -> Result<SharedContent, GetShareError> {
    let con = db.open_connection();
    let content = load_share_content(token, unlocked, &con);
    con.close().unwrap();
    content
}

fn load_share_content(
    token: &str,
    unlocked: bool,
    con: &Connection,
) -> Result<SharedContent, GetShareError> {
    let files = file_repository::get_by_share_url(token, con).map_err(map_get_error)?;
    if let Some(first) = files.first() {
        if first.share_password.is_some() && !unlocked {
            return Err(GetShareError::Unauthorized);
        }
        return Ok(SharedContent::Files(files));
    }
    let folder = match folder_repository::get_by_share_url(token, con) {
        Ok(folder) => folder,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(GetShareError::NotFound),
        Err(e) => return Err(map_get_error(e)),
    };
    if folder.share_password.is_some() && !unlocked {
        return Err(GetShareError::Unauthorized);
    }
    let files =
        file_repository::get_files_in_folder(folder.id.as_str(), con).map_err(map_get_error)?;
    Ok(SharedContent::Folder(folder, files))
}

fn map_get_error(e: rusqlite::Error) -> GetShareError {
    log::error!(
        "Failed to load shared content. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    GetShareError::DbFailure
}
