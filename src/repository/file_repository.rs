use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection};

use crate::model::repository::{FileOwner, FileRecord, UsageTotals};
use crate::repository::to_db_timestamp;

pub fn map_file(row: &rusqlite::Row) -> Result<FileRecord, rusqlite::Error> {
    Ok(FileRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        size: row.get(3)?,
        mime_type: row.get(4)?,
        user_id: row.get(5)?,
        folder_id: row.get(6)?,
        download_count: row.get(7)?,
        share_url: row.get(8)?,
        share_password: row.get(9)?,
        expires_at: row.get(10)?,
        created_at: row.get(11)?,
    })
}

/// saves a file record. The id, storage path and expiry must all be chosen
/// by the caller ahead of time
pub fn create_file(file: &FileRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/create_file.sql"))?;
    pst.execute(params![
        file.id,
        file.name,
        file.path,
        file.size,
        file.mime_type,
        file.user_id,
        file.folder_id,
        file.expires_at.map(to_db_timestamp)
    ])?;
    Ok(())
}

pub fn get_by_id(id: &str, con: &Connection) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/get_file_by_id.sql"))?;
    pst.query_row([id], map_file)
}

/// like [get_by_id], but expired files are treated as if they do not exist
pub fn get_by_id_not_expired(id: &str, con: &Connection) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_if_not_expired.sql"
    ))?;
    pst.query_row([id], map_file)
}

/// looks files up by share token, skipping expired ones. Bulk shares stamp
/// one token onto several rows, so this always returns a list
pub fn get_by_share_url(
    token: &str,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_by_share_url.sql"
    ))?;
    let mapped = pst.query_map([token], map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// returns the live (unexpired) files inside the passed folder
pub fn get_files_in_folder(
    folder_id: &str,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_files_in_folder.sql"
    ))?;
    let mapped = pst.query_map([folder_id], map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// removes the file row. The caller is responsible for the blob on disk
pub fn delete_by_id(id: &str, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/delete_file_by_id.sql"
    ))?;
    pst.execute([id])
}

/// returns (id, path) for every file whose expiry is strictly in the past
pub fn get_expired_files(con: &Connection) -> Result<Vec<(String, String)>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_expired_files.sql"
    ))?;
    let mapped = pst.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut files: Vec<(String, String)> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// returns the storage paths of all the passed owner's files in the passed
/// folder; read before a cascade delete so blobs can be cleaned up after commit
pub fn get_paths_in_folder(
    folder_id: &str,
    user_id: &str,
    con: &Connection,
) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_paths_in_folder.sql"
    ))?;
    let mapped = pst.query_map([folder_id, user_id], |row| row.get(0))?;
    let mut paths: Vec<String> = Vec::new();
    for path in mapped.into_iter() {
        paths.push(path?);
    }
    Ok(paths)
}

pub fn delete_files_in_folder(
    folder_id: &str,
    user_id: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/delete_files_in_folder.sql"
    ))?;
    pst.execute([folder_id, user_id])
}

pub fn increment_download_count(id: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/increment_download_count.sql"
    ))?;
    pst.execute([id])?;
    Ok(())
}

/// applies a share to a single file. An authenticated owner may share their
/// own files; unowned files can be claimed into a share by anyone.
/// Returns the number of rows affected so callers can detect a miss
pub fn set_share(
    id: &str,
    owner: Option<&str>,
    share_url: &str,
    password_hash: Option<&str>,
    expires_at: Option<NaiveDateTime>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/set_share_by_id.sql"))?;
    pst.execute(params![
        share_url,
        password_hash,
        expires_at.map(to_db_timestamp),
        id,
        owner
    ])
}

/// filters the passed ids down to those that are unowned and unexpired, the
/// only files eligible for a global guest share
pub fn get_unowned_unexpired_ids(
    ids: &[String],
    con: &Connection,
) -> Result<Vec<String>, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let formatted_query = format!(
        "SELECT id FROM files WHERE id IN ({placeholders}) AND user_id IS NULL AND (expires_at IS NULL OR expires_at > datetime('now'))"
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mapped = pst.query_map(params_from_iter(ids.iter()), |row| row.get(0))?;
    let mut eligible: Vec<String> = Vec::new();
    for id in mapped.into_iter() {
        eligible.push(id?);
    }
    Ok(eligible)
}

/// stamps the same share token, password hash and expiry onto every passed file
pub fn set_share_bulk(
    ids: &[String],
    share_url: &str,
    password_hash: Option<&str>,
    expires_at: Option<NaiveDateTime>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let formatted_query = format!(
        "UPDATE files SET share_url = ?, share_password = ?, expires_at = ? WHERE id IN ({placeholders})"
    );
    let expires_at = expires_at.map(to_db_timestamp);
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mut query_params: Vec<&dyn rusqlite::ToSql> =
        vec![&share_url, &password_hash, &expires_at];
    for id in ids {
        query_params.push(id);
    }
    pst.execute(query_params.as_slice())
}

/// metadata for unowned, unexpired files, which is all an anonymous uploader
/// is allowed to list back
pub fn get_guest_files(
    ids: &[String],
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let formatted_query = format!(
        "SELECT id, name, path, size, mime_type, user_id, folder_id, download_count, share_url, share_password, expires_at, created_at \
         FROM files WHERE id IN ({placeholders}) AND user_id IS NULL AND (expires_at IS NULL OR expires_at > datetime('now')) \
         ORDER BY created_at DESC"
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mapped = pst.query_map(params_from_iter(ids.iter()), map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// the subset of the passed ids the caller may pull in a bulk download:
/// their own files when signed in, unowned files otherwise. Expired files
/// drop out either way
pub fn get_downloadable(
    ids: &[String],
    owner: Option<&str>,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let owner_filter = if owner.is_some() {
        "user_id = ?"
    } else {
        "user_id IS NULL"
    };
    let formatted_query = format!(
        "SELECT id, name, path, size, mime_type, user_id, folder_id, download_count, share_url, share_password, expires_at, created_at \
         FROM files WHERE id IN ({placeholders}) AND {owner_filter} AND (expires_at IS NULL OR expires_at > datetime('now'))"
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mut query_params: Vec<&dyn rusqlite::ToSql> = Vec::new();
    for id in ids {
        query_params.push(id);
    }
    if let Some(ref owner_id) = owner {
        query_params.push(owner_id);
    }
    let mapped = pst.query_map(query_params.as_slice(), map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// every file row on the instance with its owner joined on, newest first
pub fn get_all_with_owner(
    con: &Connection,
) -> Result<Vec<(FileRecord, Option<FileOwner>)>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_all_files_with_owner.sql"
    ))?;
    let mapped = pst.query_map([], |row| {
        let file = map_file(row)?;
        let username: Option<String> = row.get(12)?;
        let email: Option<String> = row.get(13)?;
        Ok((file, username.map(|username| FileOwner { username, email })))
    })?;
    let mut files: Vec<(FileRecord, Option<FileOwner>)> = Vec::new();
    for file in mapped.into_iter() {
        files.push(file?);
    }
    Ok(files)
}

/// byte totals for files created at or after the passed cutoff. Download
/// bytes weight each file's size by how often it was fetched
pub fn get_usage_since(
    cutoff: NaiveDateTime,
    con: &Connection,
) -> Result<UsageTotals, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/get_usage_since.sql"))?;
    pst.query_row([to_db_timestamp(cutoff)], |row| {
        Ok(UsageTotals {
            uploaded_bytes: row.get(0)?,
            downloaded_bytes: row.get(1)?,
        })
    })
}

/// counts how many of the passed ids are owned by the passed user
pub fn count_owned(
    ids: &[String],
    user_id: &str,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let formatted_query =
        format!("SELECT COUNT(*) FROM files WHERE id IN ({placeholders}) AND user_id = ?");
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mut query_params: Vec<&dyn rusqlite::ToSql> = Vec::new();
    for id in ids {
        query_params.push(id);
    }
    query_params.push(&user_id);
    pst.query_row(query_params.as_slice(), |row| row.get(0))
}

/// reassigns the folder of every passed file owned by the passed user
pub fn move_to_folder(
    ids: &[String],
    folder_id: Option<&str>,
    user_id: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<&str>>().join(",");
    let formatted_query = format!(
        "UPDATE files SET folder_id = ? WHERE id IN ({placeholders}) AND user_id = ?"
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let mut query_params: Vec<&dyn rusqlite::ToSql> = vec![&folder_id];
    for id in ids {
        query_params.push(id);
    }
    query_params.push(&user_id);
    pst.execute(query_params.as_slice())
}

/// storage paths for everything the passed user owns; read before the user
/// cascade delete so blobs can be cleaned up after commit
pub fn get_paths_for_user(
    user_id: &str,
    con: &Connection,
) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_paths_for_user.sql"
    ))?;
    let mapped = pst.query_map([user_id], |row| row.get(0))?;
    let mut paths: Vec<String> = Vec::new();
    for path in mapped.into_iter() {
        paths.push(path?);
    }
    Ok(paths)
}

pub fn delete_files_for_user(user_id: &str, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/delete_files_for_user.sql"
    ))?;
    pst.execute([user_id])
}
