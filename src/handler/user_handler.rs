use rocket::serde::json::Json;
use rocket::State;

use crate::guard::Requester;
use crate::model::error::user_errors::{CreateUserError, DeleteUserError};
use crate::model::request::CreateUserRequest;
use crate::model::response::user_responses::{
    CreateUserResponse, DeleteUserResponse, ListUsersResponse, UserResponse,
};
use crate::model::response::BasicMessage;
use crate::repository::Db;
use crate::service::user_service;
use crate::storage::FileStore;

#[post("/users", data = "<request>")]
pub fn create_user(
    request: Json<CreateUserRequest>,
    requester: Option<Requester>,
    db: &State<Db>,
) -> CreateUserResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return CreateUserResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return CreateUserResponse::Forbidden("Administrator privileges required".to_string());
    }
    match user_service::create_user(&request, db) {
        Ok(user) => {
            log::info!("{} created user {}", requester.username, user.username);
            CreateUserResponse::Success(Json::from(UserResponse::from(&user)))
        }
        Err(CreateUserError::AlreadyExists) => CreateUserResponse::AlreadyExists(
            BasicMessage::new("That username or email is already in use."),
        ),
        Err(CreateUserError::HashFailure) | Err(CreateUserError::DbFailure) => {
            CreateUserResponse::Failure(BasicMessage::new(
                "Failed to create user. Check server logs for details",
            ))
        }
    }
}

#[get("/users")]
pub fn get_users(requester: Option<Requester>, db: &State<Db>) -> ListUsersResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return ListUsersResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return ListUsersResponse::Forbidden("Administrator privileges required".to_string());
    }
    match user_service::get_users(db) {
        Ok(users) => {
            ListUsersResponse::Success(Json::from(
                users.iter().map(UserResponse::from).collect::<Vec<UserResponse>>(),
            ))
        }
        Err(_) => ListUsersResponse::Failure(BasicMessage::new(
            "Failed to list users. Check server logs for details",
        )),
    }
}

#[delete("/users/<id>")]
pub fn delete_user(
    id: &str,
    requester: Option<Requester>,
    db: &State<Db>,
    store: &State<FileStore>,
) -> DeleteUserResponse {
    let requester = match requester {
        Some(requester) => requester,
        None => return DeleteUserResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !requester.is_admin() {
        return DeleteUserResponse::Forbidden("Administrator privileges required".to_string());
    }
    // admins may not delete themselves; demote first, then another admin can
    if requester.id == id {
        return DeleteUserResponse::Forbidden(
            "Administrators cannot delete their own account".to_string(),
        );
    }
    match user_service::delete_user(id, db, store) {
        Ok(()) => {
            log::info!("{} deleted user {id}", requester.username);
            DeleteUserResponse::Deleted(())
        }
        Err(DeleteUserError::NotFound) => {
            DeleteUserResponse::NotFound(BasicMessage::new("The user could not be found."))
        }
        Err(DeleteUserError::DbFailure) => DeleteUserResponse::Failure(BasicMessage::new(
            "Failed to delete user. Check server logs for details",
        )),
    }
}
