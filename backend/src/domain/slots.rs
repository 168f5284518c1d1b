//! Slot generation and the shared interval-overlap primitive.
//!
//! All intervals here are half-open: `[start, end)`. Two intervals overlap
//! when they share at least one instant, i.e. `a.start < b.end && a.end >
//! b.start`. The same predicate backs candidate generation and the
//! write-time booking validator, so the two paths cannot drift apart.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::domain::schedule::WorkingWindow;

/// Fixed candidate granularity: slots start every 15 minutes.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// Half-open overlap test over `[start_a, end_a)` and `[start_b, end_b)`.
pub fn overlaps(
    start_a: NaiveDateTime,
    end_a: NaiveDateTime,
    start_b: NaiveDateTime,
    end_b: NaiveDateTime,
) -> bool {
    start_a < end_b && end_a > start_b
}

/// An occupied half-open interval derived from a stored booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl BusyInterval {
    /// Build an interval from a booking's start and its resolved duration.
    pub fn from_start(start: NaiveDateTime, duration_minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(duration_minutes),
        }
    }

    /// Interval start (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Interval end (exclusive).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Whether the proposed `[start, end)` collides with any busy interval.
pub fn has_conflict(busy: &[BusyInterval], start: NaiveDateTime, end: NaiveDateTime) -> bool {
    busy.iter()
        .any(|interval| overlaps(start, end, interval.start(), interval.end()))
}

/// Enumerate the free start times inside a working window.
///
/// Candidates begin at the window start and advance in
/// [`SLOT_STEP_MINUTES`]-minute steps; iteration stops once the proposed
/// appointment would run past the window end, so the final candidate always
/// fits entirely inside the window. The output is fully materialised and in
/// increasing order, and is a pure function of its inputs.
pub fn free_slots(
    window: &WorkingWindow,
    busy: &[BusyInterval],
    duration_minutes: i64,
) -> Vec<NaiveTime> {
    let step = Duration::minutes(SLOT_STEP_MINUTES);
    let duration = Duration::minutes(duration_minutes);

    let mut slots = Vec::new();
    let mut candidate = window.start();
    loop {
        let proposed_end = candidate + duration;
        if proposed_end > window.end() {
            break;
        }
        if !has_conflict(busy, candidate, proposed_end) {
            slots.push(candidate.time());
        }
        candidate += step;
    }
    slots
}

/// Render a slot as a zero-padded 24-hour `HH:MM` string.
pub fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}
