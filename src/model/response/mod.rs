use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

pub mod admin_responses;
pub mod api_responses;
pub mod file_responses;
pub mod folder_responses;
pub mod share_responses;
pub mod user_responses;

/// represents a basic json message
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<String> for BasicMessage {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}
