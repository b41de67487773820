use std::backtrace::Backtrace;

use crate::model::error::settings_errors::{GetSettingsError, UpdateSettingsError};
use crate::model::repository::Settings;
use crate::repository::{settings_repository, Db};

pub fn get_settings(db: &Db) -> Result<Settings, GetSettingsError> {
    let con = db.open_connection();
    let settings = settings_repository::get_settings(&con);
    con.close().unwrap();
    settings.map_err(|e| {
        log::error!(
            "Failed to read settings. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetSettingsError::DbFailure
    })
}

pub fn update_settings(settings: &Settings, db: &Db) -> Result<(), UpdateSettingsError> {
    let con = db.open_connection();
    let result = settings_repository::update_settings(settings, &con);
    con.close().unwrap();
    result.map_err(|e| {
        log::error!(
            "Failed to update settings. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        UpdateSettingsError::DbFailure
    })
}
