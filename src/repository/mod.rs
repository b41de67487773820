use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{Connection, OpenFlags, Result};

pub mod file_repository;
pub mod folder_repository;
pub mod settings_repository;
pub mod share_repository;
pub mod user_repository;

/// handle to the metadata store. Constructed once at startup (or per test)
/// and injected into handlers through rocket's managed state; services open
/// short-lived connections from it instead of sharing a global one
#[derive(Debug, Clone)]
pub struct Db {
    location: PathBuf,
}

impl Db {
    pub fn new<P: AsRef<Path>>(location: P) -> Db {
        Db {
            location: location.as_ref().to_path_buf(),
        }
    }

    /// creates a new connection and returns it, but panics if the connection could not be created
    pub fn open_connection(&self) -> Connection {
        match Connection::open_with_flags(&self.location, OpenFlags::default()) {
            Ok(con) => con,
            Err(error) => panic!("Failed to get a connection to the database!: {error}"),
        }
    }

    /// runs init.sql against the database. Every statement in the script is
    /// idempotent, so this is safe to call on an existing database
    pub fn initialize(&self) -> Result<()> {
        let con = self.open_connection();
        con.execute_batch(include_str!("../assets/init.sql"))?;
        con.close().unwrap();
        Ok(())
    }

    /// connectivity probe for the health endpoint, which has to keep
    /// answering when the database is broken instead of panicking
    pub fn ping(&self) -> Result<()> {
        let con = Connection::open_with_flags(&self.location, OpenFlags::default())?;
        con.query_row("SELECT 1", [], |_| Ok(()))?;
        con.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

/// timestamps are bound as space-separated text, the same shape sqlite's
/// datetime('now') produces, so string comparison in SQL stays correct.
/// The default chrono binding uses a 'T' separator, which does not collate
/// against datetime('now') within the same day
pub(crate) fn to_db_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
