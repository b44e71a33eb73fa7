use rusqlite::{params, Connection, OptionalExtension, Result};
use std::fs;
use std::path::Path;

use crate::models::BookEntry;

/// The library is stored as one serialized list under this key, the same
/// shape the web version kept in browser-local storage.
const BOOKS_KEY: &str = "books";

pub fn init_db(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir).expect("failed to create data dir");
        }
    }

    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT
        )",
        [],
    )?;
    Ok(())
}

pub fn load_books(conn: &Connection) -> Result<Vec<BookEntry>, String> {
    let blob: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = ?1",
            params![BOOKS_KEY],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| err.to_string())?;

    match blob {
        Some(json) => serde_json::from_str(&json).map_err(|err| err.to_string()),
        None => Ok(Vec::new()),
    }
}

pub fn save_books(conn: &Connection, books: &[BookEntry]) -> Result<(), String> {
    let json = serde_json::to_string(books).map_err(|err| err.to_string())?;
    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![BOOKS_KEY, json],
    )
    .map_err(|err| err.to_string())?;
    Ok(())
}

pub fn clear_books(conn: &Connection) -> Result<(), String> {
    conn.execute("DELETE FROM meta WHERE key = ?1", params![BOOKS_KEY])
        .map_err(|err| err.to_string())?;
    Ok(())
}
