use rusqlite::{params, Connection};

use crate::model::repository::Folder;

fn map_folder(row: &rusqlite::Row) -> Result<Folder, rusqlite::Error> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        share_url: row.get(3)?,
        share_password: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// creates a folder record. The unique (name, user_id) constraint is the
/// final arbiter of name conflicts; callers should pre-check with
/// [name_exists] to surface a friendlier error
pub fn create_folder(
    id: &str,
    name: &str,
    user_id: &str,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/create_folder.sql"
    ))?;
    pst.execute(params![id, name, user_id])?;
    Ok(())
}

/// ownership is part of the lookup, so a folder owned by someone else is
/// indistinguishable from a missing one
pub fn get_by_id_and_user(
    id: &str,
    user_id: &str,
    con: &Connection,
) -> Result<Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_id_and_user.sql"
    ))?;
    pst.query_row([id, user_id], map_folder)
}

pub fn get_by_share_url(token: &str, con: &Connection) -> Result<Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_share_url.sql"
    ))?;
    pst.query_row([token], map_folder)
}

/// all of a user's folders with how many files each one holds
pub fn get_folders_for_user(
    user_id: &str,
    con: &Connection,
) -> Result<Vec<(Folder, u32)>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folders_for_user.sql"
    ))?;
    let mapped = pst.query_map([user_id], |row| Ok((map_folder(row)?, row.get(6)?)))?;
    let mut folders: Vec<(Folder, u32)> = Vec::new();
    for folder in mapped.into_iter() {
        folders.push(folder?);
    }
    Ok(folders)
}

pub fn name_exists(
    name: &str,
    user_id: &str,
    con: &Connection,
) -> Result<bool, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/folder_name_exists.sql"
    ))?;
    let count: u32 = pst.query_row([user_id, name], |row| row.get(0))?;
    Ok(count > 0)
}

/// renames the folder; returns the number of rows affected so callers can
/// detect a missing or foreign folder
pub fn rename(
    id: &str,
    user_id: &str,
    name: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/rename_folder.sql"
    ))?;
    pst.execute([name, id, user_id])
}

/// deletes the folder row only; contained file rows and blobs are the cascade
/// coordinator's problem. Returns rows affected
pub fn delete_by_id_and_user(
    id: &str,
    user_id: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/delete_folder_by_id_and_user.sql"
    ))?;
    pst.execute([id, user_id])
}

/// applies a share to a folder owned by the passed user. Returns rows affected
pub fn set_share(
    id: &str,
    user_id: &str,
    share_url: &str,
    password_hash: Option<&str>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/set_share_by_id.sql"
    ))?;
    pst.execute(params![share_url, password_hash, id, user_id])
}

pub fn delete_folders_for_user(
    user_id: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/delete_folders_for_user.sql"
    ))?;
    pst.execute([user_id])
}
