#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// the request carried more files than the caller's limit allows
    TooManyFiles(u32),
    /// one of the files exceeds the caller's size limit, in bytes
    TooLarge(u64),
    /// a file part arrived without a usable name
    MissingInfo,
    /// the blob could not be written to disk
    FileSystemFailure,
    /// the record could not be written to the database
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DownloadFileError {
    /// absent or expired; the two are indistinguishable to callers
    NotFound,
    /// the blob is missing or unreadable on disk
    FileSystemFailure,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum ZipDownloadError {
    /// none of the requested ids are downloadable by this caller
    NotFound,
    /// the archive could not be assembled
    ArchiveFailure,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    /// absent or not deletable by this requester; deliberately conflated
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum MoveFilesError {
    /// some file, or the target folder, is absent or not owned by the requester
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetGuestFilesError {
    DbFailure,
}
