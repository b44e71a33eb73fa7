use std::fmt;

use chrono::NaiveDate;

use crate::models::{Rating, Status};

/// Finish date precedes the start date. Recoverable: the caller clears the
/// finish date, surfaces the message, and re-runs the status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOrderError {
    pub started: NaiveDate,
    pub finished: NaiveDate,
}

impl fmt::Display for DateOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "finished date {} is before started date {}",
            self.finished, self.started
        )
    }
}

impl std::error::Error for DateOrderError {}

/// A date past "today". The date inputs already cap at today, but the commit
/// path re-checks so a stale form or a hand-edited payload cannot slip a
/// future date into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FutureDateError {
    pub field: &'static str,
    pub date: NaiveDate,
    pub today: NaiveDate,
}

impl fmt::Display for FutureDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} is after today ({})", self.field, self.date, self.today)
    }
}

impl std::error::Error for FutureDateError {}

/// Rejects a date pair where the book finished before it started. Absent
/// dates always pass.
pub fn check_date_order(
    started: Option<NaiveDate>,
    finished: Option<NaiveDate>,
) -> Result<(), DateOrderError> {
    match (started, finished) {
        (Some(started), Some(finished)) if finished < started => {
            Err(DateOrderError { started, finished })
        }
        _ => Ok(()),
    }
}

/// Rejects dates later than `today`. The clock stays with the caller.
pub fn check_date_bounds(
    started: Option<NaiveDate>,
    finished: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), FutureDateError> {
    if let Some(date) = started {
        if date > today {
            return Err(FutureDateError { field: "dateStarted", date, today });
        }
    }
    if let Some(date) = finished {
        if date > today {
            return Err(FutureDateError { field: "dateFinished", date, today });
        }
    }
    Ok(())
}

/// The status actually stamped onto an entry at commit time.
///
/// Runs once per commit, after the policy has already constrained the
/// selection. The UI lock can be bypassed (disabled-state races, hand-edited
/// payloads), so the same precedence is applied here again:
/// a rated book is read, a started book cannot stay want-to-read.
pub fn resolve_final_status(
    rating: Option<Rating>,
    date_started: Option<NaiveDate>,
    selected: Status,
) -> Status {
    if rating.is_some() {
        return Status::Read;
    }
    if date_started.is_some() && selected == Status::WantRead {
        return Status::Currently;
    }
    selected
}
