use chrono::NaiveDate;

use crate::models::{BookEntry, Rating, Status};
use crate::policy::{self, PolicyDecision};
use crate::validator::{self, DateOrderError};

/// The fact fields of the form at one instant. A plain value, handed to the
/// policy on every change; the widgets themselves live with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSnapshot {
    pub rating: Option<Rating>,
    pub date_started: Option<NaiveDate>,
    pub date_finished: Option<NaiveDate>,
    pub status: Status,
}

impl FormSnapshot {
    pub fn empty() -> FormSnapshot {
        FormSnapshot {
            rating: None,
            date_started: None,
            date_finished: None,
            status: Status::WantRead,
        }
    }
}

/// Drives the status control: every field change re-runs the policy and
/// folds the resolved status back into the snapshot, so the snapshot is
/// always at the policy's fixed point.
#[derive(Debug, Clone)]
pub struct FormState {
    snapshot: FormSnapshot,
    decision: PolicyDecision,
}

impl FormState {
    pub fn new() -> FormState {
        FormState::from_snapshot(FormSnapshot::empty())
    }

    pub fn from_snapshot(snapshot: FormSnapshot) -> FormState {
        let decision = policy::evaluate(&snapshot);
        let mut state = FormState { snapshot, decision };
        state.reevaluate();
        state
    }

    /// Seeds the form for the edit flow of an existing entry.
    pub fn from_entry(entry: &BookEntry) -> FormState {
        FormState::from_snapshot(FormSnapshot {
            rating: entry.rating,
            date_started: entry.date_started,
            date_finished: entry.date_finished,
            status: entry.status,
        })
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshot
    }

    pub fn decision(&self) -> PolicyDecision {
        self.decision
    }

    pub fn status(&self) -> Status {
        self.snapshot.status
    }

    fn reevaluate(&mut self) {
        self.decision = policy::evaluate(&self.snapshot);
        self.snapshot.status = self.decision.resolved;
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.snapshot.rating = Some(rating);
        self.reevaluate();
    }

    pub fn clear_rating(&mut self) {
        self.snapshot.rating = None;
        self.reevaluate();
    }

    pub fn set_date_started(&mut self, date: NaiveDate) -> Result<(), DateOrderError> {
        self.snapshot.date_started = Some(date);
        self.reconcile_dates()
    }

    pub fn clear_date_started(&mut self) {
        self.snapshot.date_started = None;
        self.reevaluate();
    }

    pub fn set_date_finished(&mut self, date: NaiveDate) -> Result<(), DateOrderError> {
        self.snapshot.date_finished = Some(date);
        self.reconcile_dates()
    }

    pub fn clear_date_finished(&mut self) {
        self.snapshot.date_finished = None;
        self.reevaluate();
    }

    /// On an order violation the finish date is dropped and the policy re-run
    /// against the remaining facts; the error goes back to the caller as the
    /// blocking message to show.
    fn reconcile_dates(&mut self) -> Result<(), DateOrderError> {
        let result =
            validator::check_date_order(self.snapshot.date_started, self.snapshot.date_finished);
        if result.is_err() {
            self.snapshot.date_finished = None;
        }
        self.reevaluate();
        result
    }

    /// Applies a user selection. Returns false (selection ignored) while the
    /// control is locked or the candidate is not selectable.
    pub fn select_status(&mut self, status: Status) -> bool {
        if self.decision.locked || !self.decision.selectable.contains(status) {
            return false;
        }
        self.snapshot.status = status;
        self.reevaluate();
        true
    }
}

impl Default for FormState {
    fn default() -> FormState {
        FormState::new()
    }
}
