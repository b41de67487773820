use rusqlite::{params, Connection};

use crate::model::repository::{Role, User};

fn map_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    let role: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        email: row.get(3)?,
        role: Role::from_db(role.as_str()),
        created_at: row.get(5)?,
    })
}

pub fn create_user(user: &User, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/create_user.sql"))?;
    pst.execute(params![
        user.id,
        user.username,
        user.password,
        user.email,
        user.role.as_str()
    ])?;
    Ok(())
}

pub fn get_by_username(username: &str, con: &Connection) -> Result<User, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/user/get_user_by_username.sql"
    ))?;
    pst.query_row([username], map_user)
}

pub fn get_all(con: &Connection) -> Result<Vec<User>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/get_users.sql"))?;
    let mapped = pst.query_map([], map_user)?;
    let mut users: Vec<User> = Vec::new();
    for user in mapped.into_iter() {
        users.push(user?);
    }
    Ok(users)
}

/// removes the user row only; owned file and folder rows are deleted by the
/// cascade coordinator inside the same transaction. Returns rows affected
pub fn delete_by_id(id: &str, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/user/delete_user_by_id.sql"
    ))?;
    pst.execute([id])
}
