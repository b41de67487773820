use rusqlite::Connection;

/// checks whether a candidate share token is already taken anywhere in the
/// combined file + folder token space
pub fn token_exists(token: &str, con: &Connection) -> Result<bool, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/token_exists.sql"))?;
    let count: u32 = pst.query_row([token], |row| row.get(0))?;
    Ok(count > 0)
}
