pub mod admin_handler;
pub mod api_handler;
pub mod file_handler;
pub mod folder_handler;
pub mod share_handler;
pub mod user_handler;
