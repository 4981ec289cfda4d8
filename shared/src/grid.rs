//! Weekly slot-grid computation: the Monday-start week window, the
//! time-of-day rows, and the exact-instant slot lookup the calendar views
//! are rendered from. Everything here is pure and recomputed wholesale on
//! any input change; there is no incremental update path.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{Slot, SlotStatus};

/// The seven calendar days (Monday through Sunday) containing a reference
/// date. Recomputed per navigation action, never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    days: [NaiveDate; 7],
}

impl WeekWindow {
    /// Week window containing `reference`. A Sunday reference resolves to
    /// the *preceding* Monday, so the window always contains the reference.
    pub fn containing(reference: NaiveDate) -> Self {
        let monday =
            reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
        let days = std::array::from_fn(|i| monday + Duration::days(i as i64));
        Self { days }
    }

    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    pub fn monday(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn sunday(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn next(&self) -> Self {
        Self::containing(self.days[0] + Duration::days(7))
    }

    pub fn prev(&self) -> Self {
        Self::containing(self.days[0] - Duration::days(7))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday() && date <= self.sunday()
    }
}

/// Ordered time-of-day rows for the grid, `[start_hour, end_hour)` stepped
/// by `step_minutes` within each hour. A step that does not divide 60
/// yields a ragged last interval per hour; the fixed call sites
/// (working hours, 15/30/45/60-minute steps) never hit that.
pub fn time_intervals(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<NaiveTime> {
    let mut times = Vec::new();
    if step_minutes == 0 {
        return times;
    }
    for hour in start_hour..end_hour {
        let mut minute = 0;
        while minute < 60 {
            if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
                times.push(t);
            }
            minute += step_minutes;
        }
    }
    times
}

/// "HH:MM" zero-padded 24-hour row label
pub fn interval_label(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Which slots a view's index should hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFilter {
    /// Public booking page: only slots a visitor may take
    AvailableOnly,
    /// Dashboard: booked slots are kept and render as blocked
    All,
}

/// Exact-instant lookup from a slot's start to the slot record.
///
/// Derived state: rebuilt from scratch whenever the slot collection
/// changes. Keys are the parsed start instants, so two textual spellings
/// of the same instant collapse to one key. Duplicate starts are
/// last-write-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotIndex {
    by_start: HashMap<DateTime<Utc>, Slot>,
}

impl SlotIndex {
    pub fn build(slots: &[Slot], filter: SlotFilter) -> Self {
        let mut by_start = HashMap::with_capacity(slots.len());
        for slot in slots {
            if filter == SlotFilter::AvailableOnly && slot.status != SlotStatus::Available {
                continue;
            }
            by_start.insert(slot.start_time, slot.clone());
        }
        Self { by_start }
    }

    pub fn get(&self, start: DateTime<Utc>) -> Option<&Slot> {
        self.by_start.get(&start)
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }
}

/// What a single (day, time) cell renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum CellState {
    /// No slot starts at this instant; inert
    Empty,
    /// Selectable
    Available(Slot),
    /// Blocked; only surfaces when the index was built with [`SlotFilter::All`]
    Booked(Slot),
}

/// Resolve one grid cell: combine the day with the row's time under the
/// viewer's UTC offset and look up the resulting instant.
pub fn cell_state(
    index: &SlotIndex,
    day: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> CellState {
    let local = day.and_time(time);
    let Some(instant) = offset.from_local_datetime(&local).single() else {
        return CellState::Empty;
    };
    match index.get(instant.with_timezone(&Utc)) {
        Some(slot) if slot.status == SlotStatus::Available => CellState::Available(slot.clone()),
        Some(slot) => CellState::Booked(slot.clone()),
        None => CellState::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(id: &str, start: &str, end: &str, status: SlotStatus) -> Slot {
        Slot {
            slot_id: id.to_string(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            status,
        }
    }

    #[test]
    fn week_window_starts_monday_ends_sunday() {
        // 2024-06-05 is a Wednesday
        let week = WeekWindow::containing(date(2024, 6, 5));
        assert_eq!(week.monday(), date(2024, 6, 3));
        assert_eq!(week.sunday(), date(2024, 6, 9));
        for pair in week.days().windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn sunday_reference_resolves_to_preceding_monday() {
        // 2024-06-09 is a Sunday; its week started six days earlier
        let week = WeekWindow::containing(date(2024, 6, 9));
        assert_eq!(week.monday(), date(2024, 6, 3));
        assert!(week.contains(date(2024, 6, 9)));
    }

    #[test]
    fn monday_reference_is_its_own_week_start() {
        let week = WeekWindow::containing(date(2024, 6, 3));
        assert_eq!(week.monday(), date(2024, 6, 3));
    }

    #[test]
    fn week_window_spans_leap_february_into_march() {
        // 2024-02-29 is a Thursday in a leap year
        let week = WeekWindow::containing(date(2024, 2, 29));
        assert_eq!(week.monday(), date(2024, 2, 26));
        assert_eq!(week.sunday(), date(2024, 3, 3));
    }

    #[test]
    fn week_window_spans_year_boundary() {
        let week = WeekWindow::containing(date(2024, 12, 31));
        assert_eq!(week.monday(), date(2024, 12, 30));
        assert_eq!(week.sunday(), date(2025, 1, 5));
    }

    #[test]
    fn adjacent_weeks_have_no_gap_and_no_overlap() {
        let week = WeekWindow::containing(date(2024, 6, 5));
        let next = week.next();
        assert_eq!(next.monday() - week.monday(), Duration::days(7));
        assert_eq!(next.monday() - week.sunday(), Duration::days(1));
        assert_eq!(next.prev(), week);
    }

    #[test]
    fn intervals_nine_to_six_thirty_minute_step() {
        let times = time_intervals(9, 18, 30);
        assert_eq!(times.len(), 18);
        assert_eq!(interval_label(times[0]), "09:00");
        assert_eq!(interval_label(times[17]), "17:30");
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(30));
        }
    }

    #[test]
    fn intervals_pad_single_digit_hours() {
        let times = time_intervals(8, 10, 60);
        let labels: Vec<_> = times.into_iter().map(interval_label).collect();
        assert_eq!(labels, ["08:00", "09:00"]);
    }

    #[test]
    fn ragged_step_is_tolerated_not_rejected() {
        // 45 does not divide 60: each hour restarts at :00
        let times = time_intervals(9, 11, 45);
        let labels: Vec<_> = times.into_iter().map(interval_label).collect();
        assert_eq!(labels, ["09:00", "09:45", "10:00", "10:45"]);
    }

    #[test]
    fn zero_step_yields_empty_grid() {
        assert!(time_intervals(9, 18, 0).is_empty());
    }

    #[test]
    fn index_available_only_drops_booked_slots() {
        let slots = vec![
            slot(
                "s1",
                "2024-06-03T09:00:00Z",
                "2024-06-03T09:30:00Z",
                SlotStatus::Available,
            ),
            slot(
                "s2",
                "2024-06-03T10:00:00Z",
                "2024-06-03T10:30:00Z",
                SlotStatus::Booked,
            ),
        ];
        let public = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        assert_eq!(public.len(), 1);
        assert!(public.get("2024-06-03T10:00:00Z".parse().unwrap()).is_none());

        let dashboard = SlotIndex::build(&slots, SlotFilter::All);
        assert_eq!(dashboard.len(), 2);
    }

    #[test]
    fn index_keys_by_instant_not_by_spelling() {
        let slots = vec![slot(
            "s1",
            "2024-06-03T09:00:00+00:00",
            "2024-06-03T09:30:00+00:00",
            SlotStatus::Available,
        )];
        let index = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        // Same instant written with an offset instead of Z still matches
        let key: DateTime<Utc> = "2024-06-03T11:00:00+02:00".parse().unwrap();
        assert_eq!(index.get(key).unwrap().slot_id, "s1");
    }

    #[test]
    fn duplicate_start_instants_are_last_write_wins() {
        let slots = vec![
            slot(
                "first",
                "2024-06-03T09:00:00Z",
                "2024-06-03T09:30:00Z",
                SlotStatus::Available,
            ),
            slot(
                "second",
                "2024-06-03T09:00:00Z",
                "2024-06-03T09:30:00Z",
                SlotStatus::Available,
            ),
        ];
        let index = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("2024-06-03T09:00:00Z".parse().unwrap()).unwrap().slot_id,
            "second"
        );
    }

    #[test]
    fn exactly_one_cell_occupied_for_a_single_slot() {
        let slots = vec![slot(
            "s1",
            "2024-06-03T09:00:00Z",
            "2024-06-03T09:30:00Z",
            SlotStatus::Available,
        )];
        let index = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        let week = WeekWindow::containing(date(2024, 6, 5));
        let times = time_intervals(9, 18, 30);

        let mut occupied = Vec::new();
        for day in week.days() {
            for &time in &times {
                match cell_state(&index, *day, time, utc()) {
                    CellState::Empty => {}
                    other => occupied.push((*day, time, other)),
                }
            }
        }
        assert_eq!(occupied.len(), 1);
        let (day, time, state) = &occupied[0];
        assert_eq!(*day, date(2024, 6, 3));
        assert_eq!(interval_label(*time), "09:00");
        assert!(matches!(state, CellState::Available(s) if s.slot_id == "s1"));
    }

    #[test]
    fn booked_slot_is_blocked_on_dashboard_and_absent_on_public_grid() {
        let slots = vec![slot(
            "s1",
            "2024-06-03T09:00:00Z",
            "2024-06-03T09:30:00Z",
            SlotStatus::Booked,
        )];
        let day = date(2024, 6, 3);
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let dashboard = SlotIndex::build(&slots, SlotFilter::All);
        assert!(matches!(
            cell_state(&dashboard, day, time, utc()),
            CellState::Booked(s) if s.slot_id == "s1"
        ));

        let public = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        assert_eq!(cell_state(&public, day, time, utc()), CellState::Empty);
    }

    #[test]
    fn viewer_offset_shifts_which_cell_matches() {
        // 09:00Z is 11:00 wall-clock at UTC+2
        let slots = vec![slot(
            "s1",
            "2024-06-03T09:00:00Z",
            "2024-06-03T09:30:00Z",
            SlotStatus::Available,
        )];
        let index = SlotIndex::build(&slots, SlotFilter::AvailableOnly);
        let day = date(2024, 6, 3);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let eleven = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        assert_eq!(cell_state(&index, day, nine, plus_two), CellState::Empty);
        assert!(matches!(
            cell_state(&index, day, eleven, plus_two),
            CellState::Available(_)
        ));
    }
}
