use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reading-progress classification. The serialized tags double as the
/// shelf/section identifiers in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    WantRead,
    Currently,
    Read,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::WantRead, Status::Currently, Status::Read];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::WantRead => "want_read",
            Status::Currently => "currently",
            Status::Read => "read",
        }
    }
}

impl Default for Status {
    fn default() -> Status {
        Status::WantRead
    }
}

/// Stored entries predating the closed enum can carry arbitrary status
/// strings. Those are repaired to `want_read` instead of failing the load.
fn status_or_default<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "want_read" => Ok(Status::WantRead),
        "currently" => Ok(Status::Currently),
        "read" => Ok(Status::Read),
        other => {
            log::warn!("unknown status {:?} on stored entry, repairing to want_read", other);
            Ok(Status::WantRead)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Ebook,
    Paperback,
}

const RATING_LABELS: [&str; 5] = ["poor", "fair", "good", "great", "favorite"];

/// Ordinal quality score on a five-tier scale, stored as its numeric value.
/// The qualitative labels are a display mapping only; nothing in the status
/// rules depends on which scale is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Rating> {
        (Rating::MIN..=Rating::MAX).contains(&value).then_some(Rating(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        RATING_LABELS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Rating, String> {
        Rating::new(value).ok_or_else(|| format!("rating out of range: {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookEntry {
    pub id: String, // UUID
    pub title: String,
    pub author: String,
    pub format: Format,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: Status,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub cover: Option<String>, // deprecated, kept for entries stored by older versions
    #[serde(default)]
    pub date_started: Option<NaiveDate>,
    #[serde(default)]
    pub date_finished: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form payload for a create or update commit. Carries the user's selected
/// status before final normalization; `id` and `created_at` are assigned by
/// the commit itself.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub format: Format,
    pub status: Status,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub date_started: Option<NaiveDate>,
    #[serde(default)]
    pub date_finished: Option<NaiveDate>,
}
