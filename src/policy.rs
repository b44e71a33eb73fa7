use crate::form::FormSnapshot;
use crate::models::Status;

/// Compact set of status tags, used for the "which options stay enabled"
/// answer the form layer applies to its select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSet(u8);

fn bit(status: Status) -> u8 {
    match status {
        Status::WantRead => 0b001,
        Status::Currently => 0b010,
        Status::Read => 0b100,
    }
}

impl StatusSet {
    pub const EMPTY: StatusSet = StatusSet(0);
    pub const ALL: StatusSet = StatusSet(0b111);

    pub fn only(status: Status) -> StatusSet {
        StatusSet(bit(status))
    }

    pub fn with(self, status: Status) -> StatusSet {
        StatusSet(self.0 | bit(status))
    }

    pub fn contains(self, status: Status) -> bool {
        self.0 & bit(status) != 0
    }

    pub fn is_subset(self, other: StatusSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Status> {
        Status::ALL.into_iter().filter(move |status| self.contains(*status))
    }
}

/// What the form layer should do with its status control: which options stay
/// selectable, which value the control should show, and whether the whole
/// control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDecision {
    pub selectable: StatusSet,
    pub resolved: Status,
    pub locked: bool,
}

/// Derives the status constraints for the current form snapshot.
///
/// Rules are ordered by how complete a fact they rest on; a fact that already
/// implies a finished book cannot be contradicted by a weaker one:
/// 1. rating present: only `read`, control locked
/// 2. finish date present: only `read`
/// 3. start date present: `currently` or `read`, started books cannot stay
///    on the want-to-read shelf
/// 4. no facts: everything selectable, current selection stands
///
/// Total and pure; absent fields are valid inputs, not errors. Re-run after
/// every field change.
pub fn evaluate(form: &FormSnapshot) -> PolicyDecision {
    if form.rating.is_some() {
        return PolicyDecision {
            selectable: StatusSet::only(Status::Read),
            resolved: Status::Read,
            locked: true,
        };
    }

    if form.date_finished.is_some() {
        return PolicyDecision {
            selectable: StatusSet::only(Status::Read),
            resolved: Status::Read,
            locked: false,
        };
    }

    if form.date_started.is_some() {
        let selectable = StatusSet::only(Status::Currently).with(Status::Read);
        let resolved = if selectable.contains(form.status) {
            form.status
        } else {
            Status::Currently
        };
        return PolicyDecision { selectable, resolved, locked: false };
    }

    PolicyDecision {
        selectable: StatusSet::ALL,
        resolved: form.status,
        locked: false,
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, StatusSet};
    use crate::form::FormSnapshot;
    use crate::models::{Rating, Status};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn snapshot(
        rating: Option<Rating>,
        started: Option<NaiveDate>,
        finished: Option<NaiveDate>,
        status: Status,
    ) -> FormSnapshot {
        FormSnapshot { rating, date_started: started, date_finished: finished, status }
    }

    #[test]
    fn empty_snapshot_leaves_everything_open() {
        let decision = evaluate(&snapshot(None, None, None, Status::WantRead));
        assert_eq!(decision.selectable, StatusSet::ALL);
        assert_eq!(decision.resolved, Status::WantRead);
        assert!(!decision.locked);
    }

    #[test]
    fn rating_locks_status_to_read() {
        let decision = evaluate(&snapshot(Rating::new(4), None, None, Status::WantRead));
        assert_eq!(decision.selectable, StatusSet::only(Status::Read));
        assert_eq!(decision.resolved, Status::Read);
        assert!(decision.locked);
    }

    #[test]
    fn finish_date_forces_read_but_does_not_lock() {
        let decision = evaluate(&snapshot(None, None, Some(date(2024, 3, 14)), Status::Currently));
        assert_eq!(decision.selectable, StatusSet::only(Status::Read));
        assert_eq!(decision.resolved, Status::Read);
        assert!(!decision.locked);
    }

    #[test]
    fn start_date_restricts_to_currently_or_read() {
        let decision = evaluate(&snapshot(None, Some(date(2024, 3, 1)), None, Status::WantRead));
        assert_eq!(decision.selectable, StatusSet::only(Status::Currently).with(Status::Read));
        assert_eq!(decision.resolved, Status::Currently);
        assert!(!decision.locked);
    }

    #[test]
    fn start_date_keeps_an_explicit_read_selection() {
        let decision = evaluate(&snapshot(None, Some(date(2024, 3, 1)), None, Status::Read));
        assert_eq!(decision.resolved, Status::Read);
    }

    #[test]
    fn status_set_subset_and_iteration() {
        let pair = StatusSet::only(Status::Currently).with(Status::Read);
        assert!(StatusSet::only(Status::Read).is_subset(pair));
        assert!(pair.is_subset(StatusSet::ALL));
        assert!(!StatusSet::ALL.is_subset(pair));
        assert!(StatusSet::EMPTY.is_empty());
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.iter().collect::<Vec<_>>(), vec![Status::Currently, Status::Read]);
    }

    fn any_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::WantRead),
            Just(Status::Currently),
            Just(Status::Read),
        ]
    }

    fn any_rating() -> impl Strategy<Value = Rating> {
        (Rating::MIN..=Rating::MAX).prop_map(|value| Rating::new(value).expect("in range"))
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(year, month, day)| date(year, month, day))
    }

    fn any_snapshot() -> impl Strategy<Value = FormSnapshot> {
        (
            proptest::option::of(any_rating()),
            proptest::option::of(any_date()),
            proptest::option::of(any_date()),
            any_status(),
        )
            .prop_map(|(rating, started, finished, status)| {
                snapshot(rating, started, finished, status)
            })
    }

    proptest! {
        // Applying the decision back to the snapshot and re-evaluating must
        // reach a fixed point, so the form layer never oscillates.
        #[test]
        fn evaluation_converges_in_one_step(form in any_snapshot()) {
            let first = evaluate(&form);
            let mut applied = form;
            applied.status = first.resolved;
            let second = evaluate(&applied);
            prop_assert_eq!(first, second);
        }

        // A rating wins over any combination of dates.
        #[test]
        fn rating_always_means_read_and_locked(
            rating in any_rating(),
            started in proptest::option::of(any_date()),
            finished in proptest::option::of(any_date()),
            status in any_status(),
        ) {
            let decision = evaluate(&snapshot(Some(rating), started, finished, status));
            prop_assert_eq!(decision.resolved, Status::Read);
            prop_assert!(decision.locked);
            prop_assert_eq!(decision.selectable, StatusSet::only(Status::Read));
        }

        // Adding a finish date can only narrow the selectable set.
        #[test]
        fn finish_date_only_restricts(form in any_snapshot(), finished in any_date()) {
            let mut with_finish = form;
            with_finish.date_finished = Some(finished);
            let mut without_finish = form;
            without_finish.date_finished = None;
            prop_assert!(
                evaluate(&with_finish).selectable.is_subset(evaluate(&without_finish).selectable)
            );
        }
    }
}
