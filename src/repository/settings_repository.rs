use rusqlite::{params, Connection};

use crate::model::repository::Settings;

/// reads the singleton settings row, seeded by init.sql
pub fn get_settings(con: &Connection) -> Result<Settings, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/settings/get_settings.sql"
    ))?;
    pst.query_row([], |row| {
        Ok(Settings {
            site_name: row.get(1)?,
            logo_url: row.get(2)?,
        })
    })
}

pub fn update_settings(settings: &Settings, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/settings/update_settings.sql"
    ))?;
    pst.execute(params![settings.site_name, settings.logo_url])?;
    Ok(())
}
