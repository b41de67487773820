#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// the owner already has a folder with this name
    AlreadyExists,
    /// the database failed to save the folder
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetFolderError {
    /// absent or owned by someone else; deliberately conflated
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum UpdateFolderError {
    /// absent or owned by someone else; deliberately conflated
    NotFound,
    /// the owner already has a folder with the new name
    AlreadyExists,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    /// absent or owned by someone else; deliberately conflated
    NotFound,
    DbFailure,
}
