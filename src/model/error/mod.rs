pub mod admin_errors;
pub mod file_errors;
pub mod folder_errors;
pub mod settings_errors;
pub mod share_errors;
pub mod user_errors;
