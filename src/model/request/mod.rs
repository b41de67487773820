use rocket::fs::TempFile;
use rocket::serde::{Deserialize, Serialize};

/// whether a share targets a single file (or bulk file set) or a folder
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ShareType {
    File,
    Folder,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct CreateShareRequest {
    /// the file or folder to share. Ignored for global bulk shares
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub share_type: ShareType,
    pub password: Option<String>,
    /// days until the share's files expire; fractional days are allowed
    #[serde(rename = "expiresIn")]
    pub expires_in: Option<f64>,
    /// anonymous multi-file share: every id in `file_ids` that is unowned
    /// and unexpired receives the same token
    #[serde(rename = "isGlobal", default)]
    pub is_global: bool,
    #[serde(rename = "fileIds")]
    pub file_ids: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ShareAuthRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct CreateFolderRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct UpdateFolderRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct BulkDownloadRequest {
    #[serde(rename = "fileIds")]
    pub file_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct MoveFilesRequest {
    #[serde(rename = "fileIds")]
    pub file_ids: Vec<String>,
    /// `None` moves the files back to the root
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    /// "ADMIN" or "USER"; defaults to USER
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct UpdateSettingsRequest {
    #[serde(rename = "siteName")]
    pub site_name: String,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
}

/// multipart upload body; one request may carry several files
#[derive(FromForm)]
pub struct FileUpload<'r> {
    pub files: Vec<TempFile<'r>>,
}
