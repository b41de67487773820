use std::fs;
use std::path::{Path, PathBuf};

use rocket::fs::TempFile;

/// handle to the blob store: a flat directory of files addressed by opaque
/// names chosen at upload time. Injected through rocket's managed state.
/// There is no transaction concept here; callers always sequence their
/// metadata mutation first and treat blob I/O as a best-effort side effect
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> FileStore {
        FileStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// ensures the storage directory exists on the file system
    pub fn init(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// moves an uploaded multipart temp file into the store under `name`
    pub async fn persist(&self, file: &mut TempFile<'_>, name: &str) -> std::io::Result<()> {
        file.move_copy_to(self.path_for(name)).await
    }

    /// opens a blob for streaming back to a client
    pub fn open(&self, name: &str) -> std::io::Result<fs::File> {
        fs::File::open(self.path_for(name))
    }

    pub fn delete(&self, name: &str) -> std::io::Result<()> {
        fs::remove_file(self.path_for(name))
    }

    /// writes raw bytes under `name`, bypassing the multipart path
    #[cfg(test)]
    pub fn write(&self, name: &str, bytes: &[u8]) -> std::io::Result<()> {
        fs::write(self.path_for(name), bytes)
    }
}
