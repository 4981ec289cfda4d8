//! Booking session: the per-visit state machine tracking slot selection and
//! submission progress. The original page kept this as loose booleans
//! scattered per view; here it is one value with explicit transitions so a
//! hook can clone-update-set it.

use crate::Slot;

/// Submission lifecycle. The validating step is synchronous and happens
/// inside [`BookingSession::begin_submit`]; it never parks the session in
/// an intermediate state.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// Holds the human-readable confirmation message
    Succeeded(String),
    /// Holds the server-supplied reason, or a generic fallback
    Failed(String),
}

/// Payload fields the validating step hands to the network layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBooking {
    pub slot_id: String,
    pub booker_name: String,
    pub booker_email: String,
}

/// Everything a view can do to the session. Dispatched through
/// [`BookingSession::apply`] so the transition always runs against the
/// current session value, never a snapshot from an earlier render.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    Select(Slot),
    SetName(String),
    SetEmail(String),
    Submit,
    CompleteSuccess(String),
    CompleteFailure(String),
    Cancel,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingSession {
    pub selected_slot: Option<Slot>,
    pub booker_name: String,
    pub booker_email: String,
    pub state: SubmissionState,
    /// Set when a submit attempt fails validation; cleared on any edit
    pub validation_error: Option<String>,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            selected_slot: None,
            booker_name: String::new(),
            booker_email: String::new(),
            state: SubmissionState::Idle,
            validation_error: None,
        }
    }

    /// Select a slot. Selection is independent of submission state, except
    /// that picking a slot out of a finished attempt starts a fresh one.
    pub fn select(&mut self, slot: Slot) {
        if matches!(
            self.state,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        ) {
            self.state = SubmissionState::Idle;
        }
        self.validation_error = None;
        self.selected_slot = Some(slot);
    }

    pub fn set_name(&mut self, name: String) {
        self.booker_name = name;
        self.validation_error = None;
    }

    pub fn set_email(&mut self, email: String) {
        self.booker_email = email;
        self.validation_error = None;
    }

    /// The validating step. Requires a selection and non-empty name and
    /// email; on failure the session stays Idle with a validation message
    /// and no request payload is produced. On success the session moves to
    /// Submitting and yields the fields for the booking request.
    ///
    /// Returns `None` while already Submitting, so a double-click cannot
    /// put two requests in flight.
    pub fn begin_submit(&mut self) -> Option<PendingBooking> {
        if self.state == SubmissionState::Submitting {
            return None;
        }
        let Some(slot) = &self.selected_slot else {
            self.validation_error = Some("Please select a time slot first.".to_string());
            self.state = SubmissionState::Idle;
            return None;
        };
        if self.booker_name.trim().is_empty() || self.booker_email.trim().is_empty() {
            self.validation_error =
                Some("Please fill in your name and email.".to_string());
            self.state = SubmissionState::Idle;
            return None;
        }
        self.validation_error = None;
        self.state = SubmissionState::Submitting;
        Some(PendingBooking {
            slot_id: slot.slot_id.clone(),
            booker_name: self.booker_name.clone(),
            booker_email: self.booker_email.clone(),
        })
    }

    /// Booking confirmed: clear the form so a stale resubmit is impossible.
    /// The caller refetches the slot collection afterwards.
    pub fn complete_success(&mut self, message: String) {
        self.state = SubmissionState::Succeeded(message);
        self.selected_slot = None;
        self.booker_name.clear();
        self.booker_email.clear();
    }

    /// Booking rejected: keep the selection and the entered fields so the
    /// user can retry without retyping.
    pub fn complete_failure(&mut self, reason: String) {
        self.state = SubmissionState::Failed(reason);
    }

    /// Explicit dismissal of a finished attempt.
    pub fn dismiss(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        ) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Drop the selection, keep the entered fields.
    pub fn cancel(&mut self) {
        self.selected_slot = None;
        self.validation_error = None;
        self.state = SubmissionState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Single reducer entry point for dispatched actions. Completions race
    /// with cancel and teardown, so they only land while the request is
    /// actually outstanding; a stale completion is dropped here.
    pub fn apply(&mut self, action: BookingAction) {
        match action {
            BookingAction::Select(slot) => self.select(slot),
            BookingAction::SetName(name) => self.set_name(name),
            BookingAction::SetEmail(email) => self.set_email(email),
            BookingAction::Submit => {
                let _ = self.begin_submit();
            }
            BookingAction::CompleteSuccess(message) => {
                if self.is_submitting() {
                    self.complete_success(message);
                }
            }
            BookingAction::CompleteFailure(reason) => {
                if self.is_submitting() {
                    self.complete_failure(reason);
                }
            }
            BookingAction::Cancel => self.cancel(),
            BookingAction::Dismiss => self.dismiss(),
        }
    }

    /// Fields of the outstanding request; `Some` only while Submitting.
    /// This is what the network layer reads once the session has entered
    /// the submitting state.
    pub fn pending(&self) -> Option<PendingBooking> {
        if !self.is_submitting() {
            return None;
        }
        let slot = self.selected_slot.as_ref()?;
        Some(PendingBooking {
            slot_id: slot.slot_id.clone(),
            booker_name: self.booker_name.clone(),
            booker_email: self.booker_email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{cell_state, interval_label, time_intervals, CellState, SlotFilter, SlotIndex, WeekWindow};
    use crate::{CreateBookingRequest, SlotStatus};
    use chrono::{FixedOffset, NaiveDate};

    fn slot(id: &str, start: &str) -> Slot {
        Slot {
            slot_id: id.to_string(),
            start_time: start.parse().unwrap(),
            end_time: (start.parse::<chrono::DateTime<chrono::Utc>>().unwrap()
                + chrono::Duration::minutes(30)),
            status: SlotStatus::Available,
        }
    }

    #[test]
    fn selecting_the_same_slot_twice_is_idempotent() {
        let mut session = BookingSession::new();
        let s = slot("s1", "2024-06-03T09:00:00Z");
        session.select(s.clone());
        let snapshot = session.clone();
        session.select(s);
        assert_eq!(session, snapshot);
    }

    #[test]
    fn selecting_a_different_slot_replaces_the_prior_selection() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.select(slot("s2", "2024-06-03T10:00:00Z"));
        assert_eq!(session.selected_slot.as_ref().unwrap().slot_id, "s2");
    }

    #[test]
    fn submit_without_selection_is_a_validation_error_not_a_request() {
        let mut session = BookingSession::new();
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        assert!(session.begin_submit().is_none());
        assert_eq!(session.state, SubmissionState::Idle);
        assert!(session.validation_error.is_some());
    }

    #[test]
    fn submit_with_empty_fields_is_a_validation_error() {
        for (name, email) in [("", "jane@x.com"), ("Jane", ""), ("   ", "jane@x.com")] {
            let mut session = BookingSession::new();
            session.select(slot("s1", "2024-06-03T09:00:00Z"));
            session.set_name(name.to_string());
            session.set_email(email.to_string());
            assert!(session.begin_submit().is_none());
            assert_eq!(session.state, SubmissionState::Idle);
            assert!(session.validation_error.is_some());
        }
    }

    #[test]
    fn valid_submit_moves_to_submitting_and_yields_the_payload() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());

        let pending = session.begin_submit().unwrap();
        assert_eq!(pending.slot_id, "s1");
        assert_eq!(pending.booker_name, "Jane");
        assert!(session.is_submitting());

        // A second submit while in flight produces nothing
        assert!(session.begin_submit().is_none());
        assert!(session.is_submitting());
    }

    #[test]
    fn success_clears_selection_and_fields() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        session.begin_submit().unwrap();
        session.complete_success("Booking confirmed!".to_string());

        assert_eq!(
            session.state,
            SubmissionState::Succeeded("Booking confirmed!".to_string())
        );
        assert!(session.selected_slot.is_none());
        assert!(session.booker_name.is_empty());
        assert!(session.booker_email.is_empty());
    }

    #[test]
    fn failure_preserves_selection_and_fields_for_retry() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        session.begin_submit().unwrap();
        session.complete_failure("This slot is no longer available.".to_string());

        assert_eq!(
            session.state,
            SubmissionState::Failed("This slot is no longer available.".to_string())
        );
        assert_eq!(session.selected_slot.as_ref().unwrap().slot_id, "s1");
        assert_eq!(session.booker_name, "Jane");
        assert_eq!(session.booker_email, "jane@x.com");

        // Retry is a fresh explicit submit
        assert!(session.begin_submit().is_some());
    }

    #[test]
    fn selecting_out_of_a_finished_attempt_resets_to_idle() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        session.begin_submit().unwrap();
        session.complete_failure("rejected".to_string());

        session.select(slot("s2", "2024-06-03T10:00:00Z"));
        assert_eq!(session.state, SubmissionState::Idle);
        assert_eq!(session.selected_slot.as_ref().unwrap().slot_id, "s2");
    }

    #[test]
    fn cancel_clears_selection_but_keeps_fields() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        session.cancel();

        assert!(session.selected_slot.is_none());
        assert_eq!(session.booker_name, "Jane");
        assert_eq!(session.booker_email, "jane@x.com");
        assert_eq!(session.state, SubmissionState::Idle);
    }

    #[test]
    fn dismiss_returns_a_finished_attempt_to_idle() {
        let mut session = BookingSession::new();
        session.select(slot("s1", "2024-06-03T09:00:00Z"));
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        session.begin_submit().unwrap();
        session.complete_success("done".to_string());
        session.dismiss();
        assert_eq!(session.state, SubmissionState::Idle);
    }

    #[test]
    fn editing_fields_never_disturbs_the_selection() {
        // Regression: the selection made before typing must survive every
        // field edit, or the form disappears out from under the user.
        let mut session = BookingSession::new();
        session.apply(BookingAction::Select(slot("s1", "2024-06-03T09:00:00Z")));
        session.apply(BookingAction::SetName("J".to_string()));
        session.apply(BookingAction::SetName("Jane".to_string()));
        session.apply(BookingAction::SetEmail("jane@x.com".to_string()));
        assert_eq!(session.selected_slot.as_ref().unwrap().slot_id, "s1");

        session.apply(BookingAction::Submit);
        assert!(session.is_submitting());
        assert_eq!(session.pending().unwrap().slot_id, "s1");
    }

    #[test]
    fn completion_without_a_submission_is_dropped() {
        let mut session = BookingSession::new();
        session.apply(BookingAction::CompleteSuccess("done".to_string()));
        assert_eq!(session.state, SubmissionState::Idle);
        session.apply(BookingAction::CompleteFailure("rejected".to_string()));
        assert_eq!(session.state, SubmissionState::Idle);
    }

    #[test]
    fn completion_after_cancel_is_dropped() {
        let mut session = BookingSession::new();
        session.apply(BookingAction::Select(slot("s1", "2024-06-03T09:00:00Z")));
        session.apply(BookingAction::SetName("Jane".to_string()));
        session.apply(BookingAction::SetEmail("jane@x.com".to_string()));
        session.apply(BookingAction::Submit);
        session.apply(BookingAction::Cancel);

        session.apply(BookingAction::CompleteSuccess("done".to_string()));
        assert_eq!(session.state, SubmissionState::Idle);
        // Entered fields are still there for the next attempt
        assert_eq!(session.booker_name, "Jane");
    }

    #[test]
    fn pending_tracks_the_inflight_request_only() {
        let mut session = BookingSession::new();
        assert!(session.pending().is_none());

        session.apply(BookingAction::Select(slot("s1", "2024-06-03T09:00:00Z")));
        session.apply(BookingAction::SetName("Jane".to_string()));
        session.apply(BookingAction::SetEmail("jane@x.com".to_string()));
        assert!(session.pending().is_none());

        session.apply(BookingAction::Submit);
        let pending = session.pending().unwrap();
        assert_eq!(pending.booker_name, "Jane");
        assert_eq!(pending.booker_email, "jane@x.com");

        session.apply(BookingAction::CompleteFailure("rejected".to_string()));
        assert!(session.pending().is_none());
    }

    #[test]
    fn double_submit_while_inflight_is_a_no_op() {
        let mut session = BookingSession::new();
        session.apply(BookingAction::Select(slot("s1", "2024-06-03T09:00:00Z")));
        session.apply(BookingAction::SetName("Jane".to_string()));
        session.apply(BookingAction::SetEmail("jane@x.com".to_string()));
        session.apply(BookingAction::Submit);
        let snapshot = session.clone();
        session.apply(BookingAction::Submit);
        assert_eq!(session, snapshot);
    }

    // The end-to-end walk from the public page: token "abc123", one
    // available slot in the displayed week, grid resolves it under
    // Monday 09:00, booking it produces exactly the wire payload the
    // backend expects, success triggers a refetch whose rebuilt index no
    // longer offers the instant.
    #[test]
    fn end_to_end_public_booking_flow() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let slots = vec![slot("s1", "2024-06-03T09:00:00Z")];
        let index = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        let week = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        let times = time_intervals(9, 18, 30);

        let mut selectable = Vec::new();
        for day in week.days() {
            for &time in &times {
                if let CellState::Available(s) = cell_state(&index, *day, time, utc) {
                    selectable.push((*day, interval_label(time), s));
                }
            }
        }
        assert_eq!(selectable.len(), 1);
        let (day, label, picked) = selectable.remove(0);
        assert_eq!(day, week.monday());
        assert_eq!(label, "09:00");

        let mut session = BookingSession::new();
        session.select(picked);
        session.set_name("Jane".to_string());
        session.set_email("jane@x.com".to_string());
        let pending = session.begin_submit().unwrap();

        let request = CreateBookingRequest {
            public_url_token: "abc123".to_string(),
            slot_id: pending.slot_id,
            booker_name: pending.booker_name,
            booker_email: pending.booker_email,
        };
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "publicUrlToken": "abc123",
                "slotId": "s1",
                "bookerName": "Jane",
                "bookerEmail": "jane@x.com",
            })
        );

        session.complete_success("Booking confirmed!".to_string());
        // Backend's authoritative refetch: the slot is now booked
        let refreshed = vec![Slot {
            status: SlotStatus::Booked,
            ..slot("s1", "2024-06-03T09:00:00Z")
        }];
        let index = SlotIndex::build(&refreshed, SlotFilter::AvailableOnly);
        assert_eq!(
            cell_state(
                &index,
                week.monday(),
                chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                utc
            ),
            CellState::Empty
        );
    }
}
