use std::backtrace::Backtrace;

use chrono::{Datelike, Duration, Utc};
use rusqlite::Connection;

use crate::model::error::admin_errors::{GetAllFilesError, GetStatsError};
use crate::model::repository::{FileOwner, FileRecord, UsageReport};
use crate::repository::{file_repository, Db};

/// every file on the instance with its owner, newest first
pub fn get_all_files(db: &Db) -> Result<Vec<(FileRecord, Option<FileOwner>)>, GetAllFilesError> {
    let con = db.open_connection();
    let files = file_repository::get_all_with_owner(&con);
    con.close().unwrap();
    files.map_err(|e| {
        log::error!(
            "Failed to list files. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetAllFilesError::DbFailure
    })
}

/// upload and download byte totals for today, the trailing seven days and
/// the current calendar month. Periods are UTC, the same clock the stored
/// timestamps use
pub fn get_stats(db: &Db) -> Result<UsageReport, GetStatsError> {
    let con = db.open_connection();
    let report = load_usage(&con);
    con.close().unwrap();
    report.map_err(|e| {
        log::error!(
            "Failed to load usage statistics. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetStatsError::DbFailure
    })
}

fn load_usage(con: &Connection) -> Result<UsageReport, rusqlite::Error> {
    let now = Utc::now().naive_utc();
    // with_day(1) and midnight always exist, so these cannot fail
    let today_start = now.date().and_hms_opt(0, 0, 0).unwrap();
    let month_start = now.date().with_day(1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let week_start = now - Duration::days(7);
    Ok(UsageReport {
        today: file_repository::get_usage_since(today_start, con)?,
        week: file_repository::get_usage_since(week_start, con)?,
        month: file_repository::get_usage_since(month_start, con)?,
    })
}
