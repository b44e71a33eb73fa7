use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

pub mod db;
pub mod form;
pub mod models;
pub mod policy;
pub mod shelf;
pub mod validator;

use models::{BookDraft, BookEntry};
use shelf::Shelves;

fn normalize_draft(mut draft: BookDraft) -> BookDraft {
  draft.title = draft.title.trim().to_string();
  draft.author = draft.author.trim().to_string();
  draft.cover = draft.cover.filter(|value| !value.trim().is_empty());
  draft
}

fn check_commit_dates(draft: &BookDraft, today: NaiveDate) -> Result<(), String> {
  validator::check_date_order(draft.date_started, draft.date_finished)
    .map_err(|err| err.to_string())?;
  validator::check_date_bounds(draft.date_started, draft.date_finished, today)
    .map_err(|err| err.to_string())?;
  Ok(())
}

/// Create commit: validates the draft, stamps the final status, assigns the
/// id, and persists the grown list.
pub fn add_book(conn: &Connection, draft: BookDraft, today: NaiveDate) -> Result<BookEntry, String> {
  let draft = normalize_draft(draft);
  check_commit_dates(&draft, today)?;
  let status = validator::resolve_final_status(draft.rating, draft.date_started, draft.status);

  let entry = BookEntry {
    id: Uuid::new_v4().to_string(),
    title: draft.title,
    author: draft.author,
    format: draft.format,
    status,
    rating: draft.rating,
    notes: draft.notes,
    cover: draft.cover,
    date_started: draft.date_started,
    date_finished: draft.date_finished,
    created_at: Some(chrono::Utc::now()),
  };

  let mut books = db::load_books(conn)?;
  books.push(entry.clone());
  db::save_books(conn, &books)?;
  log::info!("added book {} ({})", entry.id, entry.status.as_str());
  Ok(entry)
}

/// Full-record edit commit. `id` and `created_at` stay as they are; the
/// status is re-derived from the new facts like on create.
pub fn update_book(
  conn: &Connection,
  book_id: &str,
  draft: BookDraft,
  today: NaiveDate,
) -> Result<BookEntry, String> {
  let draft = normalize_draft(draft);
  check_commit_dates(&draft, today)?;
  let status = validator::resolve_final_status(draft.rating, draft.date_started, draft.status);

  let mut books = db::load_books(conn)?;
  let entry = books
    .iter_mut()
    .find(|book| book.id == book_id)
    .ok_or_else(|| format!("No book found with id {}", book_id))?;

  entry.title = draft.title;
  entry.author = draft.author;
  entry.format = draft.format;
  entry.status = status;
  entry.rating = draft.rating;
  entry.notes = draft.notes;
  entry.cover = draft.cover;
  entry.date_started = draft.date_started;
  entry.date_finished = draft.date_finished;
  let updated = entry.clone();

  db::save_books(conn, &books)?;
  log::info!("updated book {} ({})", updated.id, updated.status.as_str());
  Ok(updated)
}

pub fn delete_book(conn: &Connection, book_id: &str) -> Result<(), String> {
  let mut books = db::load_books(conn)?;
  let before = books.len();
  books.retain(|book| book.id != book_id);
  if books.len() == before {
    return Err(format!("No book found with id {}", book_id));
  }
  db::save_books(conn, &books)?;
  log::info!("deleted book {}", book_id);
  Ok(())
}

pub fn list_books(conn: &Connection) -> Result<Vec<BookEntry>, String> {
  db::load_books(conn)
}

pub fn get_shelves(conn: &Connection) -> Result<Shelves, String> {
  Ok(shelf::group_books(db::load_books(conn)?))
}

pub fn clear_library(conn: &Connection) -> Result<(), String> {
  db::clear_books(conn)?;
  log::info!("cleared library");
  Ok(())
}
