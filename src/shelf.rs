use serde::Serialize;

use crate::models::{BookEntry, Status};

/// The three status tabs, ready for rendering. Grouping is total: the closed
/// `Status` enum means no entry can be left without a section.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelves {
    pub want_read: Vec<BookEntry>,
    pub currently: Vec<BookEntry>,
    pub read: Vec<BookEntry>,
}

impl Shelves {
    pub fn shelf(&self, status: Status) -> &[BookEntry] {
        match status {
            Status::WantRead => &self.want_read,
            Status::Currently => &self.currently,
            Status::Read => &self.read,
        }
    }

    pub fn total(&self) -> usize {
        self.want_read.len() + self.currently.len() + self.read.len()
    }
}

pub fn group_books(books: Vec<BookEntry>) -> Shelves {
    let mut shelves = Shelves::default();
    for book in books {
        match book.status {
            Status::WantRead => shelves.want_read.push(book),
            Status::Currently => shelves.currently.push(book),
            Status::Read => shelves.read.push(book),
        }
    }
    shelves
}

pub const NOTE_PREVIEW_CHARS: usize = 120;

/// Card display cuts notes at 120 characters, on a char boundary.
pub fn note_preview(notes: &str) -> &str {
    match notes.char_indices().nth(NOTE_PREVIEW_CHARS) {
        Some((index, _)) => &notes[..index],
        None => notes,
    }
}
