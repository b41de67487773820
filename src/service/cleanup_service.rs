use std::backtrace::Backtrace;

use crate::model::error::share_errors::SweepError;
use crate::repository::{file_repository, Db};
use crate::storage::FileStore;

/// removes every file whose expiry has passed and returns how many rows were
/// deleted. Each file is handled row first, blob second; a blob that refuses
/// to die only gets logged. The sweep is idempotent, a second run right after
/// finds nothing to do
pub fn sweep_expired(db: &Db, store: &FileStore) -> Result<u32, SweepError> {
    let con = db.open_connection();
    let expired = match file_repository::get_expired_files(&con) {
        Ok(expired) => expired,
        Err(e) => {
            log::error!(
                "Failed to query expired files. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SweepError::DbFailure);
        }
    };
    let mut deleted: u32 = 0;
    for (id, path) in expired.iter() {
        match file_repository::delete_by_id(id.as_str(), &con) {
            Ok(0) => continue, // already gone, nothing to count
            Ok(_) => deleted += 1,
            Err(e) => {
                // leave the row for the next sweep rather than abort the run
                log::error!("Failed to delete expired file {id}. Nested exception is {e:?}");
                continue;
            }
        }
        if let Err(e) = store.delete(path.as_str()) {
            log::warn!("Failed to remove expired blob {path}: {e:?}");
        }
    }
    con.close().unwrap();
    if deleted > 0 {
        log::info!("cleanup sweep removed {deleted} expired files");
    }
    Ok(deleted)
}
