use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use crate::model::repository::Role;
use crate::repository::Db;
use crate::service::user_service;

/// the username and password pulled out of an http basic auth header
#[derive(Debug, PartialEq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// no Authorization header on the request
    Missing,
    /// the header is malformed or the credentials do not match a user
    Invalid,
    /// the credentials could not be checked against the database
    Unavailable,
}

impl BasicCredentials {
    /// parses the value of an `Authorization: Basic ...` header
    pub fn from_header(header: &str) -> Result<BasicCredentials, AuthError> {
        let encoded = match header.strip_prefix("Basic ") {
            Some(e) => e,
            None => return Err(AuthError::Invalid),
        };
        let decoded = BASE64.decode(encoded).map_err(|_| AuthError::Invalid)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Invalid)?;
        let (username, password) = decoded.split_once(':').ok_or(AuthError::Invalid)?;
        if username.is_empty() {
            return Err(AuthError::Invalid);
        }
        Ok(BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// an authenticated user attached to the current request. Handlers that allow
/// anonymous callers take an `Option<Requester>` instead and treat `None` as
/// a guest
#[derive(Debug, PartialEq, Clone)]
pub struct Requester {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Requester {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = match request.headers().get_one("Authorization") {
            Some(header) => header,
            None => return Outcome::Error((Status::Unauthorized, AuthError::Missing)),
        };
        let credentials = match BasicCredentials::from_header(header) {
            Ok(credentials) => credentials,
            Err(e) => return Outcome::Error((Status::Unauthorized, e)),
        };
        let db = match request.rocket().state::<Db>() {
            Some(db) => db,
            None => {
                return Outcome::Error((Status::InternalServerError, AuthError::Unavailable))
            }
        };
        match user_service::authenticate(&credentials, db) {
            Ok(Some(requester)) => Outcome::Success(requester),
            Ok(None) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            Err(_) => Outcome::Error((Status::InternalServerError, AuthError::Unavailable)),
        }
    }
}

#[cfg(test)]
mod basic_credentials_tests {
    use super::*;

    #[test]
    fn parses_username_and_password() {
        // username:password
        let creds = BasicCredentials::from_header("Basic dXNlcm5hbWU6cGFzc3dvcmQ=").unwrap();
        assert_eq!("username", creds.username);
        assert_eq!("password", creds.password);
    }

    #[test]
    fn password_may_contain_colons() {
        // user:pass:word
        let creds = BasicCredentials::from_header("Basic dXNlcjpwYXNzOndvcmQ=").unwrap();
        assert_eq!("user", creds.username);
        assert_eq!("pass:word", creds.password);
    }

    #[test]
    fn rejects_non_basic_schemes() {
        assert_eq!(
            Err(AuthError::Invalid),
            BasicCredentials::from_header("Bearer abc123")
        );
    }

    #[test]
    fn rejects_bad_base64() {
        assert_eq!(
            Err(AuthError::Invalid),
            BasicCredentials::from_header("Basic !!!not-base64!!!")
        );
    }

    #[test]
    fn rejects_missing_separator() {
        // "usernamepassword"
        assert_eq!(
            Err(AuthError::Invalid),
            BasicCredentials::from_header("Basic dXNlcm5hbWVwYXNzd29yZA==")
        );
    }

    #[test]
    fn rejects_empty_username() {
        // ":password"
        assert_eq!(
            Err(AuthError::Invalid),
            BasicCredentials::from_header("Basic OnBhc3N3b3Jk")
        );
    }
}
