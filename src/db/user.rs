//! Display name of the local player

use rusqlite::{Connection, Result};

use super::settings::{get_setting, set_setting};

const USER_NAME_KEY: &str = "user_name";

pub fn get_user_name(conn: &Connection) -> Result<Option<String>> {
  Ok(get_setting(conn, USER_NAME_KEY)?.filter(|name| !name.is_empty()))
}

/// Store a trimmed display name. Blank names are ignored and `None` is returned.
pub fn set_user_name(conn: &Connection, name: &str) -> Result<Option<String>> {
  let name = name.trim();
  if name.is_empty() {
    return Ok(None);
  }
  set_setting(conn, USER_NAME_KEY, name)?;
  Ok(Some(name.to_string()))
}
