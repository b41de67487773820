use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::guard::{BasicCredentials, Requester};
use crate::model::error::user_errors::{CreateUserError, DeleteUserError, GetUsersError};
use crate::model::repository::{Role, User};
use crate::model::request::CreateUserRequest;
use crate::repository::{file_repository, folder_repository, user_repository, Db};
use crate::service::{password_service, token_service};
use crate::storage::FileStore;

/// checks basic auth credentials against the users table. `Ok(None)` covers
/// both an unknown username and a wrong password
pub fn authenticate(
    credentials: &BasicCredentials,
    db: &Db,
) -> Result<Option<Requester>, rusqlite::Error> {
    let con = db.open_connection();
    let user = user_repository::get_by_username(credentials.username.as_str(), &con);
    con.close().unwrap();
    let user = match user {
        Ok(user) => user,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => {
            log::error!(
                "Failed to look up user for authentication. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(e);
        }
    };
    match password_service::verify_password(credentials.password.as_str(), user.password.as_str())
    {
        Ok(true) => Ok(Some(Requester {
            id: user.id,
            username: user.username,
            role: user.role,
        })),
        Ok(false) => Ok(None),
        Err(e) => {
            log::error!(
                "Stored password hash for user {} is unreadable. Nested exception is {e:?}",
                user.username
            );
            Ok(None)
        }
    }
}

pub fn create_user(request: &CreateUserRequest, db: &Db) -> Result<User, CreateUserError> {
    let hash = match password_service::hash_password(request.password.as_str()) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Failed to hash new user password. Nested exception is {e:?}");
            return Err(CreateUserError::HashFailure);
        }
    };
    let user = User {
        id: token_service::generate_id(),
        username: request.username.clone(),
        password: hash,
        email: request.email.clone(),
        role: request
            .role
            .as_deref()
            .map(Role::from_db)
            .unwrap_or(Role::User),
        created_at: chrono::Utc::now().naive_utc(),
    };
    let con = db.open_connection();
    let saved = user_repository::create_user(&user, &con);
    con.close().unwrap();
    match saved {
        Ok(()) => Ok(user),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(CreateUserError::AlreadyExists)
        }
        Err(e) => {
            log::error!(
                "Failed to save user. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateUserError::DbFailure)
        }
    }
}

pub fn get_users(db: &Db) -> Result<Vec<User>, GetUsersError> {
    let con = db.open_connection();
    let users = user_repository::get_all(&con);
    con.close().unwrap();
    users.map_err(|e| {
        log::error!(
            "Failed to list users. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetUsersError::DbFailure
    })
}

/// removes a user along with every file and folder row they own, in one
/// transaction. Blob removal happens after commit and is best effort; an
/// orphaned blob is recoverable garbage, a dangling row is not
pub fn delete_user(id: &str, db: &Db, store: &FileStore) -> Result<(), DeleteUserError> {
    let mut con = db.open_connection();
    let result = delete_user_records(id, &mut con);
    con.close().unwrap();
    let paths = result?;
    for path in paths.iter() {
        if let Err(e) = store.delete(path) {
            log::warn!("Failed to remove blob {path} for deleted user {id}: {e:?}");
        }
    }
    Ok(())
}

fn delete_user_records(id: &str, con: &mut Connection) -> Result<Vec<String>, DeleteUserError> {
    let tx = con.transaction().map_err(map_tx_error)?;
    let paths = file_repository::get_paths_for_user(id, &tx).map_err(map_tx_error)?;
    file_repository::delete_files_for_user(id, &tx).map_err(map_tx_error)?;
    folder_repository::delete_folders_for_user(id, &tx).map_err(map_tx_error)?;
    let affected = user_repository::delete_by_id(id, &tx).map_err(map_tx_error)?;
    if affected == 0 {
        // dropping the transaction rolls the file and folder deletes back
        return Err(DeleteUserError::NotFound);
    }
    tx.commit().map_err(map_tx_error)?;
    Ok(paths)
}

fn map_tx_error(e: rusqlite::Error) -> DeleteUserError {
    log::error!(
        "Failed to delete user records. Nested exception is {e:?}\n{}",
        Backtrace::force_capture()
    );
    DeleteUserError::DbFailure
}
