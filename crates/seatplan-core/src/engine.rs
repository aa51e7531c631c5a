//! # Engine
//!
//! One call runs the whole pipeline: group → interleave → place, wrapped
//! with the empty-input refusals and a defensive post-placement capacity
//! check.
//!
//! The engine is stateless. It holds no plan between runs; callers own the
//! returned [`Seating`] and pass it to the serialization and lookup stages
//! themselves.

use crate::grouping::group_examinees;
use crate::interleave::interleave;
use crate::placement::place;
use crate::types::{Examinee, Room, RoomId, SeatAssignment, SeatplanError};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// SEATING
// =============================================================================

/// A finished seating plan: the assignments, when they were generated, and
/// how many examinees did not fit.
///
/// Immutable once produced. A new run builds a wholly new `Seating`; callers
/// replace their stored plan rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    /// Every seat assignment, in placement order.
    pub assignments: Vec<SeatAssignment>,
    /// Examinees left over after every room filled. Non-fatal; callers
    /// surface a non-zero count as a warning.
    pub unplaced: usize,
    /// When this plan was generated.
    pub generated_at: DateTime<Utc>,
}

impl Seating {
    /// Wrap a list of assignments as a plan generated now.
    #[must_use]
    pub fn new(assignments: Vec<SeatAssignment>, unplaced: usize) -> Self {
        Self {
            assignments,
            unplaced,
            generated_at: Utc::now(),
        }
    }

    /// Number of placed examinees.
    #[must_use]
    pub fn total(&self) -> usize {
        self.assignments.len()
    }

    /// Per-room assigned counts, in room-id order.
    #[must_use]
    pub fn room_counts(&self) -> BTreeMap<RoomId, usize> {
        let mut counts: BTreeMap<RoomId, usize> = BTreeMap::new();
        for assignment in &self.assignments {
            let count = counts.entry(assignment.room_id.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
        counts
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Run the full pipeline over one roster.
///
/// The caller controls reproducibility through `rng`: pass a seeded
/// generator to replay a plan, or `rand::thread_rng()` for a fresh
/// arrangement per run.
///
/// After placement, every room's assigned count is re-checked against its
/// stated capacity. The min-capped fill makes that check a tripwire, not a
/// code path; if it ever fires the run is aborted and the partial plan
/// discarded.
///
/// # Errors
///
/// - [`SeatplanError::NoExaminees`] / [`SeatplanError::NoRooms`] when either
///   input list is empty
/// - [`SeatplanError::CapacityOverflow`] if the defensive re-check fires
pub fn generate(
    examinees: Vec<Examinee>,
    rooms: &[Room],
    rng: &mut impl Rng,
) -> Result<Seating, SeatplanError> {
    if examinees.is_empty() {
        return Err(SeatplanError::NoExaminees);
    }
    if rooms.is_empty() {
        return Err(SeatplanError::NoRooms);
    }

    let groups = group_examinees(examinees);
    let sequence = interleave(groups, rng);
    let placement = place(sequence, rooms);

    verify_capacities(&placement.assignments, rooms)?;

    Ok(Seating::new(placement.assignments, placement.unplaced))
}

/// Post-hoc capacity check over a finished assignment list.
fn verify_capacities(
    assignments: &[SeatAssignment],
    rooms: &[Room],
) -> Result<(), SeatplanError> {
    let mut counts: BTreeMap<&RoomId, u32> = BTreeMap::new();
    for assignment in assignments {
        let count = counts.entry(&assignment.room_id).or_insert(0);
        *count = count.saturating_add(1);
    }

    for room in rooms {
        if let Some(&assigned) = counts.get(&room.id) {
            if assigned > room.capacity {
                return Err(SeatplanError::CapacityOverflow(
                    room.id.clone(),
                    assigned,
                    room.capacity,
                ));
            }
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ExamineeId, Subject};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn examinee(id: &str, subject: &str) -> Examinee {
        Examinee::new(ExamineeId::new(id), id, Subject::new(subject), date())
    }

    fn room(id: &str, capacity: u32) -> Room {
        Room::new(RoomId::new(id), id, capacity, "2x5")
    }

    #[test]
    fn refuses_empty_examinees() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(Vec::new(), &[room("r", 10)], &mut rng);
        assert!(matches!(result, Err(SeatplanError::NoExaminees)));
    }

    #[test]
    fn refuses_empty_rooms() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(vec![examinee("S1", "Math")], &[], &mut rng);
        assert!(matches!(result, Err(SeatplanError::NoRooms)));
    }

    #[test]
    fn places_everyone_when_capacity_suffices() {
        let examinees = vec![
            examinee("S1", "Math"),
            examinee("S2", "Math"),
            examinee("S3", "Physics"),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let seating = generate(examinees, &[room("r", 10)], &mut rng).unwrap();

        assert_eq!(seating.total(), 3);
        assert_eq!(seating.unplaced, 0);
        assert_eq!(seating.room_counts()[&RoomId::new("r")], 3);
    }

    #[test]
    fn reports_unplaced_when_rooms_overflow() {
        let examinees: Vec<Examinee> = (0..8).map(|n| examinee(&format!("S{n}"), "Math")).collect();
        let mut rng = StdRng::seed_from_u64(5);
        let seating = generate(examinees, &[room("r", 5)], &mut rng).unwrap();

        assert_eq!(seating.total(), 5);
        assert_eq!(seating.unplaced, 3);
    }

    #[test]
    fn same_seed_and_roster_replay_the_same_plan() {
        let roster = || -> Vec<Examinee> {
            (0..10)
                .map(|n| examinee(&format!("S{n}"), if n % 2 == 0 { "Math" } else { "Art" }))
                .collect()
        };
        let rooms = [room("a", 4), room("b", 8)];

        let mut rng_one = StdRng::seed_from_u64(42);
        let mut rng_two = StdRng::seed_from_u64(42);
        let first = generate(roster(), &rooms, &mut rng_one).unwrap();
        let second = generate(roster(), &rooms, &mut rng_two).unwrap();

        assert_eq!(first.assignments, second.assignments);
    }

    #[test]
    fn capacity_tripwire_rejects_an_overfilled_room() {
        // Hand-built assignment list that violates the capacity invariant;
        // the pipeline itself can never produce this shape.
        let rooms = [room("tiny", 1)];
        let assignments: Vec<SeatAssignment> = (1..=2)
            .map(|n| SeatAssignment {
                examinee_id: ExamineeId::new(format!("S{n}")),
                examinee_name: format!("S{n}"),
                subject: Subject::new("Math"),
                date: date(),
                room_id: RoomId::new("tiny"),
                room_name: "tiny".to_string(),
                seat_number: n,
                row: 1,
                column: n,
                room_capacity: 1,
                room_layout: "2x5".to_string(),
            })
            .collect();

        let result = verify_capacities(&assignments, &rooms);
        assert!(matches!(
            result,
            Err(SeatplanError::CapacityOverflow(_, 2, 1))
        ));
    }
}
